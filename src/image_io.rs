//! The pixel grid and PNG encoding.

use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::color::Color;
use crate::error::RenderError;

/// A width x height grid of colors, row-major, y=0 at the top.
/// Out-of-range access clamps to the image rectangle rather than faulting.
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![Color::default(); (width * height) as usize] }
    }

    fn clamp_coords(&self, x: i64, y: i64) -> (u32, u32) {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        (cx, cy)
    }

    pub fn set(&mut self, x: u32, y: u32, c: Color) {
        let (cx, cy) = self.clamp_coords(x as i64, y as i64);
        self.pixels[(cy * self.width + cx) as usize] = c;
    }

    pub fn get(&self, x: i64, y: i64) -> Color {
        let (cx, cy) = self.clamp_coords(x, y);
        self.pixels[(cy * self.width + cx) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True iff every pixel is exactly black.
    pub fn is_all_black(&self) -> bool {
        self.pixels.iter().all(|c| c.is_black())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let mut buf: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.get(x as i64, y as i64).clamp();
                buf.put_pixel(
                    x,
                    y,
                    Rgb([to_byte(c.r), to_byte(c.g), to_byte(c.b)]),
                );
            }
        }
        buf.save(path).map_err(|_| RenderError::ImageSaveFailed)
    }
}

#[inline]
fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_clamps() {
        let img = Image::new(4, 4);
        let _ = img.get(-1, -1);
        let _ = img.get(100, 100);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut img = Image::new(4, 4);
        img.set(1, 2, Color::new(0.5, 0.25, 0.1));
        assert_eq!(img.get(1, 2), Color::new(0.5, 0.25, 0.1));
    }

    #[test]
    fn byte_conversion_rounds_and_clamps() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(2.0), 255);
        assert_eq!(to_byte(-1.0), 0);
    }

    #[test]
    fn fresh_image_is_all_black() {
        let img = Image::new(3, 3);
        assert!(img.is_all_black());
    }
}
