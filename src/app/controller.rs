//! Demo screen controller
//!
//! Owns the sample bars, advances them through the fill/hold scenario and
//! composes per-frame pixmaps. Presentation (PNG frames or a live window)
//! is left to the platform layer.

use std::time::Duration;

use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::app::state::{self, DemoEvent, DemoState};
use crate::domain::animation::PROGRESS_TRANSITION;
use crate::config::style::{StyleConfig, StyleError};
use crate::domain::core::Rect;
use crate::domain::progress::{Behavior, ProgressBar};
use crate::platform::frames::{FrameError, FrameSink};
use crate::ui::layout::BarLayout;
use crate::ui::renderer::{BarRenderer, RendererError};
use crate::ui::text::load_system_font;

/// Errors raised while driving the demo screen
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("bar configuration failed: {0}")]
    Style(#[from] StyleError),

    #[error("rendering failed: {0}")]
    Renderer(#[from] RendererError),

    #[error("frame output failed: {0}")]
    Frame(#[from] FrameError),
}

/// One bar on the demo screen
#[derive(Debug)]
pub struct DemoBar {
    pub name: &'static str,
    pub bar: ProgressBar,
    pub height: u32,
    /// Whether this bar follows the shared fill value; the indeterminate
    /// marquee stays at zero instead
    pub follows_fill: bool,
}

/// Shared fill speed in progress units per second
const FILL_RATE: f32 = 0.35;

const CANVAS_WIDTH: u32 = 360;
const MARGIN: i32 = 20;
const SPACING: i32 = 18;
const BAR_WIDTH: u32 = (CANVAS_WIDTH as i32 - 2 * MARGIN) as u32;

/// Drives the sample screen
pub struct DemoController {
    bars: Vec<DemoBar>,
    state: DemoState,
    fill: f32,
    /// Time left before the shared fill resumes after a restart, so the
    /// eased return to zero can play out
    grace: Duration,
    renderer: BarRenderer,
}

impl DemoController {
    /// Builds the sample screen: the five styled bars of the original demo
    /// plus an indeterminate marquee.
    pub fn new() -> Result<Self, DemoError> {
        let renderer = match load_system_font() {
            Some(data) => BarRenderer::with_font(data)?,
            None => {
                log::warn!("no system font found, text indicators are disabled");
                BarRenderer::new()
            }
        };

        let mut marquee = StyleConfig::striped_flat();
        marquee.behavior = Behavior::Indeterminate;
        marquee.initial_progress = 0.0;

        let bars = vec![
            demo_bar("flat rainbow", StyleConfig::rainbow_flat(), 24, true)?,
            demo_bar("flat indicator", StyleConfig::indicator_flat(), 24, true)?,
            demo_bar("flat striped", StyleConfig::striped_flat(), 24, true)?,
            demo_bar("rounded slim", StyleConfig::rounded_slim(), 12, true)?,
            demo_bar("rounded fat", StyleConfig::rounded_fat(), 30, true)?,
            demo_bar("indeterminate", marquee, 24, false)?,
        ];

        let mut controller = Self {
            bars,
            state: DemoState::default(),
            fill: 0.0,
            grace: Duration::ZERO,
            renderer,
        };
        controller.apply_fill();
        Ok(controller)
    }

    pub fn bars(&self) -> &[DemoBar] {
        &self.bars
    }

    pub fn state(&self) -> DemoState {
        self.state
    }

    /// Canvas dimensions fitting all bars with margins
    pub fn canvas_size(&self) -> (u32, u32) {
        let mut height = MARGIN;
        for demo_bar in &self.bars {
            height += demo_bar.height as i32 + SPACING;
        }
        height += MARGIN - SPACING;
        (CANVAS_WIDTH, height.max(1) as u32)
    }

    /// Advances the scenario and every bar by one frame of `dt`
    pub fn tick(&mut self, dt: Duration) {
        if self.grace > Duration::ZERO {
            self.grace = self.grace.saturating_sub(dt);
        } else if self.state == DemoState::Filling {
            self.fill = (self.fill + FILL_RATE * dt.as_secs_f32()).min(1.0);
            self.apply_fill();
            if self.fill >= 1.0 {
                self.state = state::process_event(self.state, DemoEvent::Completed);
            }
        }

        let before = self.state;
        self.state = state::process_event(self.state, DemoEvent::Tick(dt));
        if matches!(before, DemoState::Holding { .. }) && self.state == DemoState::Filling {
            self.restart_cycle();
        }

        for demo_bar in &mut self.bars {
            demo_bar.bar.tick(dt);
        }
    }

    fn apply_fill(&mut self) {
        for demo_bar in &mut self.bars {
            if demo_bar.follows_fill {
                demo_bar.bar.set_progress(self.fill);
            }
        }
    }

    fn restart_cycle(&mut self) {
        log::info!("demo cycle complete, restarting");
        self.fill = 0.0;
        self.grace = PROGRESS_TRANSITION;
        for demo_bar in &mut self.bars {
            if demo_bar.follows_fill {
                demo_bar.bar.set_progress_animated(0.0);
            }
        }
    }

    /// Renders the whole demo screen into one pixmap
    pub fn render_frame(&self) -> Result<Pixmap, DemoError> {
        let (width, height) = self.canvas_size();
        let mut canvas = Pixmap::new(width, height).ok_or(
            RendererError::PixmapCreationFailed { width, height },
        )?;
        canvas.fill(Color::from_rgba8(24, 24, 28, 255));

        let mut slot = Rect::new(MARGIN, MARGIN, BAR_WIDTH as i32, 0);
        for demo_bar in &self.bars {
            slot.h = demo_bar.height as i32;

            let layout = BarLayout::from_bar(&demo_bar.bar, BAR_WIDTH, demo_bar.height, 1.0);
            let rendered = self.renderer.render(&layout)?;
            canvas.draw_pixmap(
                slot.x,
                slot.y,
                rendered.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );

            slot.y = slot.bottom() + SPACING;
        }

        Ok(canvas)
    }

    /// Renders `frames` frames at `fps` into the sink
    pub fn run_frames(&mut self, frames: u32, fps: u32, sink: &mut FrameSink) -> Result<(), DemoError> {
        let dt = Duration::from_secs_f32(1.0 / fps.max(1) as f32);
        log::info!("rendering {frames} frames at {fps} fps");

        for _ in 0..frames {
            self.tick(dt);
            let frame = self.render_frame()?;
            let path = sink.write(&frame)?;
            log::debug!("wrote {}", path.display());
        }

        log::info!("done, {} frames written", sink.frames_written());
        Ok(())
    }
}

fn demo_bar(
    name: &'static str,
    config: StyleConfig,
    height: u32,
    follows_fill: bool,
) -> Result<DemoBar, DemoError> {
    Ok(DemoBar {
        name,
        bar: config.build()?,
        height,
        follows_fill,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_builds_the_sample_screen() {
        let controller = DemoController::new().unwrap();
        assert_eq!(controller.bars().len(), 6);

        let names: Vec<_> = controller.bars().iter().map(|b| b.name).collect();
        assert!(names.contains(&"flat rainbow"));
        assert!(names.contains(&"indeterminate"));
    }

    #[test]
    fn ticking_advances_the_shared_fill() {
        let mut controller = DemoController::new().unwrap();
        let before = controller.bars()[0].bar.progress();

        controller.tick(Duration::from_millis(500));
        let after = controller.bars()[0].bar.progress();
        assert!(after > before);
    }

    #[test]
    fn marquee_bar_ignores_the_shared_fill() {
        let mut controller = DemoController::new().unwrap();
        controller.tick(Duration::from_secs(1));

        let marquee = controller
            .bars()
            .iter()
            .find(|b| !b.follows_fill)
            .unwrap();
        assert_eq!(marquee.bar.progress(), 0.0);
        assert!(marquee.bar.stripes_visible());
    }

    #[test]
    fn scenario_holds_at_full_then_restarts() {
        let mut controller = DemoController::new().unwrap();

        // Run until full.
        for _ in 0..200 {
            controller.tick(Duration::from_millis(33));
            if controller.state() != DemoState::Filling {
                break;
            }
        }
        assert!(matches!(controller.state(), DemoState::Holding { .. }));
        assert_eq!(controller.bars()[0].bar.progress(), 1.0);

        // Run past the hold; the cycle restarts towards zero.
        for _ in 0..60 {
            controller.tick(Duration::from_millis(33));
        }
        assert!(controller.bars()[0].bar.progress() < 1.0);
    }

    #[test]
    fn frame_has_the_canvas_size() {
        let controller = DemoController::new().unwrap();
        let (width, height) = controller.canvas_size();

        let frame = controller.render_frame().unwrap();
        assert_eq!(frame.width(), width);
        assert_eq!(frame.height(), height);
    }
}
