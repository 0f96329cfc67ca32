//! An ordered container of surfaces, optionally guarded by a bounding
//! sphere for early ray-miss rejection.

use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray};
use crate::material::Material;
use crate::surface::{Hit, Surface};

pub struct BoundingSphere {
    pub center: Point3,
    pub radius: f32,
}

impl BoundingSphere {
    fn hits(&self, ray: &Ray) -> bool {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        disc >= 0.0
    }
}

pub struct Group {
    pub children: Vec<Arc<dyn Surface>>,
    pub bound: Option<BoundingSphere>,
}

impl Group {
    pub fn new(children: Vec<Arc<dyn Surface>>) -> Self {
        Self { children, bound: None }
    }

    pub fn with_bounding_sphere(children: Vec<Arc<dyn Surface>>, center: Point3, radius: f32) -> Self {
        Self { children, bound: Some(BoundingSphere { center, radius }) }
    }

    pub fn push(&mut self, child: Arc<dyn Surface>) {
        self.children.push(child);
    }
}

impl Surface for Group {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        if let Some(bound) = &self.bound {
            if !bound.hits(ray) {
                return None;
            }
        }

        let mut closest_t = t_max;
        let mut best: Option<Hit> = None;
        for child in &self.children {
            if let Some(mut hit) = child.hit(ray, t_min, closest_t) {
                closest_t = hit.t;
                if hit.surface.is_none() {
                    hit.surface = Some(child.clone());
                }
                best = Some(hit);
            }
        }
        best
    }

    fn is_light(&self) -> bool {
        false
    }

    fn light_point_in_grid(&self, _i: usize, _rng: &mut SmallRng) -> Point3 {
        // A group itself is never a light; sampling it is a programmer error.
        Point3::default()
    }

    fn material(&self) -> Arc<Material> {
        Arc::new(Material::default())
    }

    fn gather_light_sources(&self, out: &mut Vec<Arc<dyn Surface>>) {
        for child in &self.children {
            if child.is_light() {
                out.push(child.clone());
            }
            child.gather_light_sources(out);
        }
    }
}
