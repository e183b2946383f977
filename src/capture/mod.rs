//! Screen Capture Layer
//!
//! Samples a rectangular desktop region into a BGR frame through a cached
//! set of GDI resources. Device objects are acquired once per region and
//! reused across calls; any acquisition or transfer failure tears the
//! session down and yields `None`, leaving the next call free to
//! re-initialize.

pub mod backend;
pub mod frame;
#[cfg(windows)]
pub mod gdi;
#[cfg(not(windows))]
pub mod null;

pub use backend::{CaptureBackend, CaptureError};
pub use frame::Frame;
#[cfg(windows)]
pub use gdi::GdiBackend;
#[cfg(not(windows))]
pub use null::NullBackend;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A capture session over the default desktop backend for this platform.
#[cfg(windows)]
pub type DesktopCapture = CaptureSession<GdiBackend>;
#[cfg(not(windows))]
pub type DesktopCapture = CaptureSession<NullBackend>;

/// Create a capture session backed by the desktop of this platform.
pub fn desktop_session() -> DesktopCapture {
    CaptureSession::new(Default::default())
}

/// Integer rectangle on the virtual desktop, half-open in width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// A box is valid when both dimensions are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.right > self.left && self.bottom > self.top
    }
}

/// Capture session with cached device resources and a reusable staging
/// buffer.
///
/// The session re-initializes its backend only when the requested bbox
/// differs from the cached one (or after a failure), so steady-state
/// capture performs no per-frame GDI object churn.
pub struct CaptureSession<B: CaptureBackend> {
    backend: B,
    last_bbox: Option<BBox>,
    initialized: bool,
    buffer: Vec<u8>,
}

impl<B: CaptureBackend> CaptureSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            last_bbox: None,
            initialized: false,
            buffer: Vec::new(),
        }
    }

    /// Capture the given region as a BGR frame.
    ///
    /// Returns `None` for a missing or degenerate bbox and for any backend
    /// failure. A `None` return always leaves the session torn down, so a
    /// subsequent call with a valid bbox can succeed.
    pub fn capture(&mut self, bbox: Option<BBox>) -> Option<Frame> {
        let bbox = bbox?;
        if !bbox.is_valid() {
            return None;
        }

        let width = bbox.width();
        let height = bbox.height();

        if !self.initialized || self.last_bbox != Some(bbox) {
            self.teardown();
            // Drop the staging buffer so its capacity tracks the new region.
            self.buffer = Vec::new();
            self.last_bbox = Some(bbox);

            if let Err(e) = self.backend.acquire(width, height) {
                debug!("capture acquire failed: {e}");
                self.teardown();
                return None;
            }
            self.initialized = true;
        }

        let needed = (width as usize) * (height as usize) * 4;
        if self.buffer.len() != needed {
            self.buffer = Vec::new();
            self.buffer.reserve_exact(needed);
            self.buffer.resize(needed, 0);
        }

        if let Err(e) = self.backend.transfer(bbox.left, bbox.top, width, height) {
            debug!("capture transfer failed: {e}");
            self.teardown();
            return None;
        }

        if let Err(e) = self.backend.read_into(&mut self.buffer, width, height) {
            debug!("capture readback failed: {e}");
            self.teardown();
            return None;
        }

        Some(Frame::from_bgra(&self.buffer, width as u32, height as u32))
    }

    /// Release all device resources. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.teardown();
        self.last_bbox = None;
        self.buffer = Vec::new();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn teardown(&mut self) {
        self.backend.release();
        self.initialized = false;
    }
}

impl<B: CaptureBackend> Drop for CaptureSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted backend that records lifecycle calls and can be told to
    /// fail a step a set number of times.
    #[derive(Default)]
    struct MockBackend {
        acquires: usize,
        releases: usize,
        live: bool,
        fail_acquires: usize,
        fail_transfers: usize,
    }

    impl CaptureBackend for MockBackend {
        fn acquire(&mut self, _width: i32, _height: i32) -> Result<(), CaptureError> {
            self.acquires += 1;
            if self.fail_acquires > 0 {
                self.fail_acquires -= 1;
                return Err(CaptureError::DeviceContext);
            }
            self.live = true;
            Ok(())
        }

        fn transfer(
            &mut self,
            _left: i32,
            _top: i32,
            _width: i32,
            _height: i32,
        ) -> Result<(), CaptureError> {
            if self.fail_transfers > 0 {
                self.fail_transfers -= 1;
                return Err(CaptureError::Transfer("stubbed".into()));
            }
            Ok(())
        }

        fn read_into(
            &mut self,
            buf: &mut [u8],
            _width: i32,
            _height: i32,
        ) -> Result<(), CaptureError> {
            for (i, b) in buf.iter_mut().enumerate() {
                *b = (i % 251) as u8;
            }
            Ok(())
        }

        fn release(&mut self) {
            if self.live {
                self.releases += 1;
            }
            self.live = false;
        }
    }

    #[test]
    fn test_capture_shape_and_idempotent_init() {
        let mut session = CaptureSession::new(MockBackend::default());
        let bbox = BBox::new(10, 20, 110, 70);

        let first = session.capture(Some(bbox)).unwrap();
        assert_eq!(first.dimensions(), (100, 50));
        assert_eq!(first.data().len(), 100 * 50 * 3);

        let second = session.capture(Some(bbox)).unwrap();
        assert_eq!(second.dimensions(), (100, 50));

        // Identical bbox: device resources were acquired exactly once.
        assert_eq!(session.backend.acquires, 1);
        assert!(session.is_initialized());
    }

    #[test]
    fn test_resize_reinitializes_and_resizes_buffer() {
        let mut session = CaptureSession::new(MockBackend::default());

        session.capture(Some(BBox::new(0, 0, 100, 50))).unwrap();
        session.capture(Some(BBox::new(0, 0, 40, 30))).unwrap();

        assert_eq!(session.backend.acquires, 2);
        assert_eq!(session.buffer.capacity(), 40 * 30 * 4);
    }

    #[test]
    fn test_invalid_bbox_returns_none_and_recovers() {
        let mut session = CaptureSession::new(MockBackend::default());

        assert!(session.capture(None).is_none());
        assert!(session.capture(Some(BBox::new(0, 0, 0, 0))).is_none());
        assert!(session.capture(Some(BBox::new(10, 10, 5, 5))).is_none());
        assert_eq!(session.backend.acquires, 0);

        // A following valid call succeeds.
        assert!(session.capture(Some(BBox::new(0, 0, 8, 8))).is_some());
    }

    #[test]
    fn test_transfer_failure_tears_down_then_recovers() {
        let mut session = CaptureSession::new(MockBackend {
            fail_transfers: 1,
            ..Default::default()
        });
        let bbox = BBox::new(0, 0, 16, 16);

        assert!(session.capture(Some(bbox)).is_none());
        assert!(!session.is_initialized());
        assert_eq!(session.backend.releases, 1);

        let frame = session.capture(Some(bbox)).unwrap();
        assert_eq!(frame.dimensions(), (16, 16));
        assert!(session.is_initialized());
    }

    #[test]
    fn test_acquire_failure_is_retriable() {
        let mut session = CaptureSession::new(MockBackend {
            fail_acquires: 1,
            ..Default::default()
        });
        let bbox = BBox::new(5, 5, 25, 15);

        assert!(session.capture(Some(bbox)).is_none());
        assert!(!session.is_initialized());

        let frame = session.capture(Some(bbox)).unwrap();
        assert_eq!(frame.dimensions(), (20, 10));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut session = CaptureSession::new(MockBackend::default());
        session.capture(Some(BBox::new(0, 0, 4, 4))).unwrap();

        session.close();
        session.close();

        assert!(!session.is_initialized());
        assert_eq!(session.backend.releases, 1);
        assert!(session.capture(Some(BBox::new(0, 0, 4, 4))).is_some());
    }

    #[test]
    fn test_bbox_validity() {
        assert!(BBox::new(0, 0, 1, 1).is_valid());
        assert!(!BBox::new(0, 0, 0, 10).is_valid());
        assert!(!BBox::new(10, 10, 5, 5).is_valid());
        assert_eq!(BBox::new(10, 20, 110, 70).width(), 100);
        assert_eq!(BBox::new(10, 20, 110, 70).height(), 50);
    }
}
