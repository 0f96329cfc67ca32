//! An axis-aligned quadrilateral ("wall") built from four coplanar
//! corners, used both as a wall of the box scenes and as the area light.

use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray, Vec3};
use crate::material::Material;
use crate::rng::uniform;
use crate::surface::{Hit, Surface};

/// Corners ordered around the rectangle: A -> B -> C -> D -> A.
pub struct Wall {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
    pub d: Point3,
    pub material: Arc<Material>,
    normal: Vec3,
    edge_ab: Vec3,
    edge_ad: Vec3,
}

impl Wall {
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3, material: Arc<Material>) -> Self {
        let edge_ab = b - a;
        let edge_ad = d - a;
        let normal = edge_ab.cross(edge_ad).normalize();
        Self { a, b, c, d, material, normal, edge_ab, edge_ad }
    }
}

impl Surface for Wall {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.a - ray.origin).dot(self.normal) / denom;
        if t <= t_min || t >= t_max {
            return None;
        }

        let p = ray.at(t) - self.a;
        let uu = self.edge_ab.dot(self.edge_ab);
        let uv = self.edge_ab.dot(self.edge_ad);
        let vv = self.edge_ad.dot(self.edge_ad);
        let pu = p.dot(self.edge_ab);
        let pv = p.dot(self.edge_ad);

        // Solve p = s*edge_ab + r*edge_ad for (s, r) via the 2x2 normal
        // equations, then accept the hit iff both lie in [0,1].
        let denom_sr = uu * vv - uv * uv;
        if denom_sr.abs() < 1e-12 {
            return None;
        }
        let s = (pu * vv - pv * uv) / denom_sr;
        let r = (pv * uu - pu * uv) / denom_sr;
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&r) {
            return None;
        }

        Some(Hit { t, normal: self.normal, material: self.material.clone(), surface: None })
    }

    fn is_light(&self) -> bool {
        self.material.is_emissive()
    }

    fn light_point_in_grid(&self, i: usize, rng: &mut SmallRng) -> Point3 {
        let row = (i / 4) as f32;
        let col = (i % 4) as f32;
        let s = (col + uniform(rng)) / 4.0;
        let r = (row + uniform(rng)) / 4.0;
        self.a + self.edge_ab.scale(s) + self.edge_ad.scale(r)
    }

    fn material(&self) -> Arc<Material> {
        self.material.clone()
    }

    fn gather_light_sources(&self, out: &mut Vec<Arc<dyn Surface>>) {
        let _ = out;
    }
}
