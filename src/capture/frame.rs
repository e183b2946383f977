//! Frame data structure for captured screen content

/// A captured frame, tightly packed 8-bit BGR rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Build a frame from top-down BGRA rows, dropping the alpha channel.
    pub fn from_bgra(bgra: &[u8], width: u32, height: u32) -> Self {
        let pixels = (width * height) as usize;
        debug_assert!(bgra.len() >= pixels * 4);

        let mut data = Vec::with_capacity(pixels * 3);
        for px in bgra[..pixels * 4].chunks_exact(4) {
            data.extend_from_slice(&px[..3]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw BGR bytes, row-major, three bytes per pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The (blue, green, red) triple at pixel (x, y).
    #[allow(dead_code)]
    pub fn bgr_at(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some((self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Convert to an RGB image buffer for encoding to disk.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let mut rgb = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(3) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .expect("BGR buffer length matches dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bgra_drops_alpha() {
        // Two pixels: (b=1,g=2,r=3,a=255) and (b=4,g=5,r=6,a=255)
        let bgra = [1u8, 2, 3, 255, 4, 5, 6, 255];
        let frame = Frame::from_bgra(&bgra, 2, 1);

        assert_eq!(frame.dimensions(), (2, 1));
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_bgr_at() {
        let bgra = [10u8, 20, 30, 0, 40, 50, 60, 0];
        let frame = Frame::from_bgra(&bgra, 1, 2);

        assert_eq!(frame.bgr_at(0, 0), Some((10, 20, 30)));
        assert_eq!(frame.bgr_at(0, 1), Some((40, 50, 60)));
        assert_eq!(frame.bgr_at(1, 0), None);
    }

    #[test]
    fn test_to_rgb_image_swaps_channels() {
        let bgra = [1u8, 2, 3, 255];
        let frame = Frame::from_bgra(&bgra, 1, 1);
        let img = frame.to_rgb_image();

        assert_eq!(img.get_pixel(0, 0).0, [3, 2, 1]);
    }
}
