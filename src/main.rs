//! Demo screen binary
//!
//! Renders the sample bars as PNG frames, or presents them live in a
//! layered window on Windows:
//!
//! ```text
//! stripebar [--out DIR] [--frames N] [--fps N] [--live]
//! ```

use std::process::ExitCode;

use stripebar::app::controller::DemoController;
use stripebar::platform::frames::FrameSink;

struct Options {
    out: String,
    frames: u32,
    fps: u32,
    live: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            out: "frames".to_string(),
            frames: 120,
            fps: 30,
            live: false,
        }
    }
}

fn print_usage() {
    eprintln!("usage: stripebar [--out DIR] [--frames N] [--fps N] [--live]");
    eprintln!("  --out DIR    frame output directory (default: frames)");
    eprintln!("  --frames N   number of frames to render (default: 120)");
    eprintln!("  --fps N      frames per second (default: 30)");
    eprintln!("  --live       present in a window instead (Windows only)");
}

fn parse_options() -> Option<Options> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => options.out = args.next()?,
            "--frames" => options.frames = args.next()?.parse().ok()?,
            "--fps" => options.fps = args.next()?.parse().ok()?,
            "--live" => options.live = true,
            _ => return None,
        }
    }

    Some(options)
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(options) = parse_options() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let mut controller = match DemoController::new() {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("failed to build the demo screen: {err}");
            return ExitCode::FAILURE;
        }
    };

    if options.live {
        return run_live(&mut controller, options.fps);
    }

    let mut sink = match FrameSink::new(&options.out) {
        Ok(sink) => sink,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match controller.run_frames(options.frames, options.fps, &mut sink) {
        Ok(()) => {
            println!(
                "{} frames written to {}",
                sink.frames_written(),
                sink.dir().display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn run_live(controller: &mut DemoController, fps: u32) -> ExitCode {
    use std::time::Duration;

    use stripebar::platform::window::PreviewWindow;

    let (width, height) = controller.canvas_size();
    let window = match PreviewWindow::new(100, 100, width, height) {
        Ok(window) => window,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let dt = Duration::from_secs_f32(1.0 / fps.max(1) as f32);
    while window.pump_messages() {
        controller.tick(dt);
        let frame = match controller.render_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = window.present(&frame) {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
        std::thread::sleep(dt);
    }

    ExitCode::SUCCESS
}

#[cfg(not(windows))]
fn run_live(_controller: &mut DemoController, _fps: u32) -> ExitCode {
    log::error!("--live is only available on Windows; use frame output instead");
    ExitCode::FAILURE
}
