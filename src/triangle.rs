//! A triangle surface, used by the OBJ mesh loader. Intersection shares
//! the plane-and-barycentric test the wall uses.

use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray, Vec3};
use crate::material::Material;
use crate::rng::uniform;
use crate::surface::{Hit, Surface};

pub struct Triangle {
    pub v0: Point3,
    pub v1: Point3,
    pub v2: Point3,
    pub material: Arc<Material>,
    normal: Vec3,
}

impl Triangle {
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Arc<Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self { v0, v1, v2, material, normal }
    }
}

impl Surface for Triangle {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        // Moller-Trumbore.
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        if a.abs() < 1e-8 {
            return None;
        }
        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = f * edge2.dot(q);
        if t <= t_min || t >= t_max {
            return None;
        }

        Some(Hit { t, normal: self.normal, material: self.material.clone(), surface: None })
    }

    fn is_light(&self) -> bool {
        self.material.is_emissive()
    }

    fn light_point_in_grid(&self, i: usize, rng: &mut SmallRng) -> Point3 {
        // Stratify the unit square into 16 cells, jitter within the cell,
        // then fold samples outside the triangle back in (standard
        // parallelogram-to-triangle reflection).
        let row = (i / 4) as f32;
        let col = (i % 4) as f32;
        let mut u = (col + uniform(rng)) / 4.0;
        let mut v = (row + uniform(rng)) / 4.0;
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        self.v0 + edge1.scale(u) + edge2.scale(v)
    }

    fn material(&self) -> Arc<Material> {
        self.material.clone()
    }

    fn gather_light_sources(&self, out: &mut Vec<Arc<dyn Surface>>) {
        let _ = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Arc::new(Material::diffuse(Color::new(1.0, 1.0, 1.0))),
        )
    }

    #[test]
    fn ray_through_centroid_hits() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(0.0, -0.3, -5.0), Vec3(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, 1e-4, 1e3).is_some());
    }

    #[test]
    fn ray_outside_triangle_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Point3::new(5.0, 5.0, -5.0), Vec3(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, 1e-4, 1e3).is_none());
    }
}
