//! Device-resource backend for the capture session.
//!
//! The session owns the bookkeeping (bbox cache, reusable buffer); the
//! backend owns the OS resources. Splitting them keeps the acquisition
//! lifecycle testable without a live desktop.

use thiserror::Error;

/// Failure modes of the underlying acquisition primitives.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to acquire desktop device context")]
    DeviceContext,
    #[error("failed to create compatible memory DC")]
    MemoryDc,
    #[error("failed to create compatible bitmap ({width}x{height})")]
    Bitmap { width: i32, height: i32 },
    #[error("block transfer failed: {0}")]
    Transfer(String),
    #[error("pixel readback returned no scanlines")]
    Readback,
}

/// OS-resource seam used by [`CaptureSession`](super::CaptureSession).
///
/// Contract: after `acquire` succeeds the backend holds live resources for
/// exactly the given dimensions until `release`. `release` must be
/// infallible and safe to call repeatedly, including after a failed or
/// partial `acquire`.
pub trait CaptureBackend {
    /// Acquire device resources for a region of the given dimensions.
    fn acquire(&mut self, width: i32, height: i32) -> Result<(), CaptureError>;

    /// Block-transfer the desktop region at (left, top) into the cached bitmap.
    fn transfer(&mut self, left: i32, top: i32, width: i32, height: i32)
        -> Result<(), CaptureError>;

    /// Read the cached bitmap into `buf` as top-down BGRA rows.
    ///
    /// Writes in place; `buf` is sized by the caller to `width * height * 4`.
    fn read_into(&mut self, buf: &mut [u8], width: i32, height: i32) -> Result<(), CaptureError>;

    /// Release all device resources.
    fn release(&mut self);
}
