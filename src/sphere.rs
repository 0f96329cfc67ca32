//! A sphere surface: the quadratic ray intersection and a spherical
//! stratified grid for area-light sampling.

use std::f32::consts::PI;
use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray, Vec3};
use crate::material::Material;
use crate::rng::uniform;
use crate::surface::{Hit, Surface};

pub struct Sphere {
    pub center: Point3,
    pub radius: f32,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        Self { center, radius, material }
    }
}

impl Surface for Sphere {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let t = if t0 > t_min && t0 < t_max {
            t0
        } else if t1 > t_min && t1 < t_max {
            t1
        } else {
            return None;
        };

        let hit_point = ray.at(t);
        let normal = hit_point - self.center;
        Some(Hit { t, normal, material: self.material.clone(), surface: None })
    }

    fn is_light(&self) -> bool {
        self.material.is_emissive()
    }

    fn light_point_in_grid(&self, i: usize, rng: &mut SmallRng) -> Point3 {
        // 4x4 stratified grid over (theta, phi) on the full sphere.
        let row = (i / 4) as f32;
        let col = (i % 4) as f32;
        let theta = PI * (row + uniform(rng)) / 4.0;
        let phi = 2.0 * PI * (col + uniform(rng)) / 4.0;
        let dir = Vec3(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
        self.center + dir.scale(self.radius)
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

    fn sphere_at_origin(r: f32) -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, 0.0), r, Arc::new(Material::diffuse(Color::new(1.0, 1.0, 1.0))))
    }

    #[test]
    fn ray_through_center_hits_near_side() {
        let s = sphere_at_origin(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3(0.0, 0.0, 1.0));
        let hit = s.hit(&ray, 1e-4, 1e3).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn missed_ray_returns_none() {
        let s = sphere_at_origin(1.0);
        let ray = Ray::new(Point3::new(0.0, 5.0, -5.0), Vec3(0.0, 0.0, 1.0));
        assert!(s.hit(&ray, 1e-4, 1e3).is_none());
    }

    #[test]
    fn normal_points_away_from_center() {
        let s = sphere_at_origin(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3(0.0, 0.0, 1.0));
        let hit = s.hit(&ray, 1e-4, 1e3).unwrap();
        assert!(hit.normal.dot(Vec3(0.0, 0.0, -1.0)) > 0.0);
    }
}
