//! The pinhole camera: maps image coordinates to jittered view rays.
//!
//! Geometry is fixed by spec: image plane spans x,y in [-10,10] at z=0,
//! eye at (0,0,-20), focal distance 20. There is no user-facing camera
//! configuration (no Non-goal here — the spec simply doesn't expose one).

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray};
use crate::rng::uniform_radius;

pub const PLANE_MIN: f32 = -10.0;
pub const PLANE_MAX: f32 = 10.0;
pub const FOCAL_DISTANCE: f32 = 20.0;

pub struct Camera {
    pub eye: Point3,
    pub img_w: u32,
    pub img_h: u32,
    view_radius: f32,
}

impl Camera {
    pub fn new(img_w: u32, img_h: u32) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, -FOCAL_DISTANCE),
            img_w,
            img_h,
            view_radius: (PLANE_MAX - PLANE_MIN) / img_w as f32 / 2.0,
        }
    }

    /// Scene-space anchor of pixel (w,h) before jitter; y is inverted so
    /// row 0 maps to the top of the image.
    fn pixel_anchor(&self, w: u32, h: u32) -> (f32, f32) {
        let x = PLANE_MIN + (w as f32 / self.img_w as f32) * (PLANE_MAX - PLANE_MIN);
        let y = PLANE_MAX - (h as f32 / self.img_h as f32) * (PLANE_MAX - PLANE_MIN);
        (x, y)
    }

    /// A jittered primary ray through pixel (w,h).
    pub fn ray_for_pixel(&self, w: u32, h: u32, rng: &mut SmallRng) -> Ray {
        let (x0, y0) = self.pixel_anchor(w, h);
        let x = x0 + uniform_radius(rng, self.view_radius);
        let y = y0 + uniform_radius(rng, self.view_radius);
        let target = Point3::new(x, y, 0.0);
        Ray::new(self.eye, target - self.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_plane_extremes() {
        let cam = Camera::new(10, 10);
        let (x, y) = cam.pixel_anchor(0, 0);
        assert_eq!(x, PLANE_MIN);
        assert_eq!(y, PLANE_MAX);
    }

    #[test]
    fn ray_direction_is_unit() {
        let cam = Camera::new(10, 10);
        let mut rng = crate::rng::rng_for_row(1, 0);
        let ray = cam.ray_for_pixel(5, 5, &mut rng);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rays_originate_at_the_eye() {
        let cam = Camera::new(10, 10);
        let mut rng = crate::rng::rng_for_row(1, 0);
        let ray = cam.ray_for_pixel(0, 0, &mut rng);
        assert_eq!(ray.origin, Point3::new(0.0, 0.0, -20.0));
    }
}
