//! Non-Windows stand-in backend.
//!
//! Desktop capture only exists on Windows; on other platforms every
//! acquisition fails and `capture` yields `None`.

use super::backend::{CaptureBackend, CaptureError};

#[derive(Debug, Default)]
pub struct NullBackend;

impl CaptureBackend for NullBackend {
    fn acquire(&mut self, _width: i32, _height: i32) -> Result<(), CaptureError> {
        Err(CaptureError::DeviceContext)
    }

    fn transfer(
        &mut self,
        _left: i32,
        _top: i32,
        _width: i32,
        _height: i32,
    ) -> Result<(), CaptureError> {
        Err(CaptureError::DeviceContext)
    }

    fn read_into(&mut self, _buf: &mut [u8], _width: i32, _height: i32) -> Result<(), CaptureError> {
        Err(CaptureError::Readback)
    }

    fn release(&mut self) {}
}
