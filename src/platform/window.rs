//! Live preview window (Windows)
//!
//! A borderless layered window that shows rendered frames through
//! `UpdateLayeredWindow`, so the demo animates without flicker and with
//! proper per-pixel alpha.

use std::ffi::c_void;

use thiserror::Error;
use tiny_skia::Pixmap;
use windows::core::w;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    AC_SRC_ALPHA, AC_SRC_OVER, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    DIB_RGB_COLORS, HGDIOBJ,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, PeekMessageW, PostQuitMessage,
    RegisterClassW, ShowWindow, TranslateMessage, UpdateLayeredWindow, MSG, PM_REMOVE, SW_SHOW,
    ULW_ALPHA, WM_CLOSE, WM_DESTROY, WM_QUIT, WNDCLASSW, WS_EX_LAYERED, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_POPUP,
};

/// Live presentation errors
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create preview window")]
    WindowCreationFailed,

    #[error("failed to acquire screen device context")]
    DeviceContextFailed,

    #[error("failed to create memory device context")]
    MemoryDeviceContextFailed,

    #[error("failed to create DIB section for a frame")]
    DibSectionCreationFailed,

    #[error("failed to select bitmap into memory DC")]
    BitmapSelectionFailed,

    #[error("failed to update layered window surface")]
    LayerUpdateFailed,
}

/// Borderless always-on-top window presenting rendered frames
pub struct PreviewWindow {
    hwnd: HWND,
    x: i32,
    y: i32,
}

impl PreviewWindow {
    /// Creates the window at the given screen position
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Result<Self, WindowError> {
        let class_name = w!("StripebarPreviewWindow");

        unsafe extern "system" fn preview_window_proc(
            hwnd: HWND,
            msg: u32,
            wparam: WPARAM,
            lparam: LPARAM,
        ) -> LRESULT {
            match msg {
                WM_CLOSE => {
                    unsafe {
                        let _ = DestroyWindow(hwnd);
                    }
                    LRESULT(0)
                }
                WM_DESTROY => {
                    unsafe {
                        PostQuitMessage(0);
                    }
                    LRESULT(0)
                }
                _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
            }
        }

        let hinstance = unsafe { GetModuleHandleW(None) }
            .map_err(|_| WindowError::WindowCreationFailed)?;

        let wc = WNDCLASSW {
            lpfnWndProc: Some(preview_window_proc),
            hInstance: hinstance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };

        // Re-registering an existing class fails; that is fine.
        unsafe { RegisterClassW(&wc) };

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
                class_name,
                w!("stripebar demo"),
                WS_POPUP,
                x,
                y,
                width as i32,
                height as i32,
                None,
                None,
                hinstance,
                None,
            )
        };

        if hwnd.0 == 0 {
            return Err(WindowError::WindowCreationFailed);
        }

        unsafe {
            ShowWindow(hwnd, SW_SHOW);
        }

        Ok(Self { hwnd, x, y })
    }

    /// Pumps pending messages; returns false once the window was closed
    pub fn pump_messages(&self) -> bool {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, HWND(0), 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    return false;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        true
    }

    /// Presents a rendered frame through `UpdateLayeredWindow`
    pub fn present(&self, pixmap: &Pixmap) -> Result<(), WindowError> {
        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;

        unsafe {
            let screen_dc = GetDC(HWND(0));
            if screen_dc.0 == 0 {
                return Err(WindowError::DeviceContextFailed);
            }

            let memory_dc = CreateCompatibleDC(screen_dc);
            if memory_dc.0 == 0 {
                ReleaseDC(HWND(0), screen_dc);
                return Err(WindowError::MemoryDeviceContextFailed);
            }

            let mut bitmap_info = BITMAPINFO::default();
            bitmap_info.bmiHeader = BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // top-down so rows copy in order
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            };

            let mut pixel_ptr: *mut c_void = std::ptr::null_mut();
            let dib = match CreateDIBSection(
                memory_dc,
                &bitmap_info,
                DIB_RGB_COLORS,
                &mut pixel_ptr,
                None,
                0,
            ) {
                Ok(bitmap) => bitmap,
                Err(_) => {
                    DeleteDC(memory_dc);
                    ReleaseDC(HWND(0), screen_dc);
                    return Err(WindowError::DibSectionCreationFailed);
                }
            };

            let dib_object: HGDIOBJ = dib.into();
            if pixel_ptr.is_null() {
                DeleteObject(dib_object);
                DeleteDC(memory_dc);
                ReleaseDC(HWND(0), screen_dc);
                return Err(WindowError::DibSectionCreationFailed);
            }

            {
                // GDI wants premultiplied BGRA; tiny-skia hands out
                // premultiplied RGBA.
                let src = pixmap.data();
                let dst = std::slice::from_raw_parts_mut(pixel_ptr as *mut u8, src.len());
                for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    d[0] = s[2];
                    d[1] = s[1];
                    d[2] = s[0];
                    d[3] = s[3];
                }
            }

            let old_bitmap = SelectObject(memory_dc, dib_object);
            if old_bitmap.0 == 0 {
                DeleteObject(dib_object);
                DeleteDC(memory_dc);
                ReleaseDC(HWND(0), screen_dc);
                return Err(WindowError::BitmapSelectionFailed);
            }

            let size = SIZE {
                cx: width,
                cy: height,
            };
            let dst_point = POINT { x: self.x, y: self.y };
            let src_point = POINT { x: 0, y: 0 };
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                BlendFlags: 0,
                SourceConstantAlpha: 255,
                AlphaFormat: AC_SRC_ALPHA as u8,
            };

            let update_result = UpdateLayeredWindow(
                self.hwnd,
                screen_dc,
                Some(&dst_point),
                Some(&size),
                memory_dc,
                Some(&src_point),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );

            SelectObject(memory_dc, old_bitmap);
            DeleteObject(dib_object);
            DeleteDC(memory_dc);
            ReleaseDC(HWND(0), screen_dc);

            if update_result.is_err() {
                return Err(WindowError::LayerUpdateFailed);
            }
        }

        Ok(())
    }
}

impl Drop for PreviewWindow {
    fn drop(&mut self) {
        unsafe {
            DestroyWindow(self.hwnd).ok();
        }
    }
}
