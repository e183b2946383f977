//! GDI-backed capture resources for the virtual desktop.
//!
//! Holds a desktop DC, a compatible memory DC and a compatible bitmap
//! across calls. Release is infallible and tolerant of partial
//! acquisition; failed Win32 teardown calls are discarded because the
//! handles may already be gone.

use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, RGBQUAD, SRCCOPY,
};

use super::backend::{CaptureBackend, CaptureError};

/// Cached GDI device objects for one capture region.
#[derive(Default)]
pub struct GdiBackend {
    screen_dc: Option<HDC>,
    mem_dc: Option<HDC>,
    bitmap: Option<HBITMAP>,
    old_bitmap: Option<HGDIOBJ>,
}

impl GdiBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaptureBackend for GdiBackend {
    fn acquire(&mut self, width: i32, height: i32) -> Result<(), CaptureError> {
        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(CaptureError::DeviceContext);
            }
            self.screen_dc = Some(screen_dc);

            let mem_dc = CreateCompatibleDC(screen_dc);
            if mem_dc.is_invalid() {
                self.release();
                return Err(CaptureError::MemoryDc);
            }
            self.mem_dc = Some(mem_dc);

            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            if bitmap.is_invalid() {
                self.release();
                return Err(CaptureError::Bitmap { width, height });
            }
            self.bitmap = Some(bitmap);
            self.old_bitmap = Some(SelectObject(mem_dc, bitmap));
        }
        Ok(())
    }

    fn transfer(
        &mut self,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> Result<(), CaptureError> {
        let (Some(mem_dc), Some(screen_dc)) = (self.mem_dc, self.screen_dc) else {
            return Err(CaptureError::DeviceContext);
        };
        unsafe {
            BitBlt(mem_dc, 0, 0, width, height, screen_dc, left, top, SRCCOPY)
                .map_err(|e| CaptureError::Transfer(e.message()))
        }
    }

    fn read_into(&mut self, buf: &mut [u8], width: i32, height: i32) -> Result<(), CaptureError> {
        let (Some(mem_dc), Some(bitmap)) = (self.mem_dc, self.bitmap) else {
            return Err(CaptureError::Readback);
        };

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [RGBQUAD::default()],
        };

        let lines = unsafe {
            GetDIBits(
                mem_dc,
                bitmap,
                0,
                height as u32,
                Some(buf.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            )
        };
        if lines == 0 {
            return Err(CaptureError::Readback);
        }
        Ok(())
    }

    fn release(&mut self) {
        unsafe {
            if let (Some(mem_dc), Some(old_bitmap)) = (self.mem_dc, self.old_bitmap.take()) {
                SelectObject(mem_dc, old_bitmap);
            }
            if let Some(bitmap) = self.bitmap.take() {
                let _ = DeleteObject(bitmap);
            }
            if let Some(mem_dc) = self.mem_dc.take() {
                let _ = DeleteDC(mem_dc);
            }
            if let Some(screen_dc) = self.screen_dc.take() {
                ReleaseDC(None, screen_dc);
            }
        }
    }
}

impl Drop for GdiBackend {
    fn drop(&mut self) {
        self.release();
    }
}
