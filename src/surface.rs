//! The polymorphic scene-element capability every renderable thing
//! satisfies: closest-hit queries, the light-source predicate, area-light
//! sampling, material access, and (for composites) light enumeration.

use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::{Point3, Ray, Vec3};
use crate::material::Material;

pub const T_MIN_DEFAULT: f32 = 1e-4;
pub const T_MAX_DEFAULT: f32 = 1e3;

/// The result of a closest-hit query.
///
/// `surface` identifies the leaf that was actually hit, so that a shadow
/// ray aimed at a specific light surface can check it was the one hit
/// (as opposed to some other emissive surface in the way). Leaf `hit`
/// implementations leave it `None`; the first `Group` the hit passes
/// through on the way back up fills it in with the child `Arc` that
/// produced the hit, so nested groups still resolve to the true leaf.
pub struct Hit {
    pub t: f32,
    /// Not necessarily unit length, not side-corrected.
    pub normal: Vec3,
    pub material: Arc<Material>,
    pub surface: Option<Arc<dyn Surface>>,
}

pub trait Surface: Send + Sync {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit>;

    /// True iff this surface's material is emissive.
    fn is_light(&self) -> bool;

    /// A deterministic-per-call sample point in the i-th cell of a 4x4
    /// grid (16 cells total) over the light's area, jittered within the
    /// cell so that averaging all 16 calls integrates the light.
    fn light_point_in_grid(&self, i: usize, rng: &mut SmallRng) -> Point3;

    fn material(&self) -> Arc<Material>;

    /// Appends every emissive leaf surface in subtree order.
    fn gather_light_sources(&self, out: &mut Vec<Arc<dyn Surface>>);
}

/// Identifies the hit leaf for shadow-ray targeting (see `Hit::surface`).
pub fn is_same_surface(target: &Arc<dyn Surface>, hit: &Hit) -> bool {
    match &hit.surface {
        Some(s) => Arc::ptr_eq(target, s),
        None => false,
    }
}
