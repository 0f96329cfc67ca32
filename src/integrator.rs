//! The recursive path evaluator: `trace_color` estimates radiance along
//! a ray, `trace_shadow` estimates light visibility along a ray known to
//! aim at a specific light surface. This is the centerpiece of the
//! renderer: every other module exists to feed or drive this one.

use std::f32::consts::PI;
use std::sync::Arc;

use rand::rngs::SmallRng;

use crate::algebra::Ray;
use crate::color::{sort_brightest_first, Color};
use crate::material::MaterialKind;
use crate::rng::uniform;
use crate::surface::{is_same_surface, Surface, T_MAX_DEFAULT, T_MIN_DEFAULT};

const LIGHT_SAMPLES: usize = 16; // 4x4 grid per light.
const HEMISPHERE_SAMPLES: u32 = 4; // polar (theta) stratification.
const ECLIPTIC_SAMPLES: u32 = 8; // azimuthal (phi) stratification.

const REFLECTION_FACTOR: f32 = 0.99;
const DIFFUSE_FACTOR: f32 = 0.3;
const REFRACTION_FACTOR: f32 = 0.99;

const ROULETTE_DEPTH: u32 = 2;
const MAX_DEPTH: u32 = 5;

const HEMISPHERE_STEP: f32 = PI / HEMISPHERE_SAMPLES as f32;
const ECLIPTIC_STEP: f32 = 2.0 * PI / ECLIPTIC_SAMPLES as f32;

/// Test-only instrumentation recording the deepest `depth` any call to
/// `trace_color` has reached, so the depth-ceiling invariant (never more
/// than 6 levels of recursion) can be asserted directly rather than
/// inferred from the returned color being finite.
#[cfg(test)]
pub static MAX_DEPTH_SEEN: std::sync::atomic::AtomicU32 = std::sync::atomic::AtomicU32::new(0);

/// Radiance estimate along `ray`, clamped to [0,1] per channel.
///
/// `prob` is the Russian-roulette survival probability once `depth`
/// passes `ROULETTE_DEPTH`; `hit_diffuse` records whether a diffuse
/// surface has already been encountered earlier on this path.
pub fn trace_color(
    ray: &Ray,
    scene: &dyn Surface,
    depth: u32,
    prob: f32,
    hit_diffuse: bool,
    fast_diffuse: bool,
    rng: &mut SmallRng,
) -> Color {
    let depth = depth + 1;

    #[cfg(test)]
    MAX_DEPTH_SEEN.fetch_max(depth, std::sync::atomic::Ordering::Relaxed);

    let hit = match scene.hit(ray, T_MIN_DEFAULT, T_MAX_DEFAULT) {
        Some(h) => h,
        None => return Color::default(),
    };

    let mut normal = hit.normal.normalize();
    let front_face = normal.dot(ray.direction) < 0.0;
    if !front_face {
        normal = -normal;
    }

    let material_color = hit.material.material_color;
    let emission_color = hit.material.emission_color;

    if (depth > ROULETTE_DEPTH && uniform(rng) > prob) || depth > MAX_DEPTH {
        return emission_color.clamp();
    }

    match hit.material.kind {
        MaterialKind::Diffuse => {
            if hit.material.is_emissive() {
                return if front_face { emission_color.clamp() } else { Color::default() };
            }

            let hit_point = ray.at(hit.t);

            let result = if fast_diffuse {
                direct_lighting_only(hit_point, normal, hit.material.diff_amount, material_color, scene, rng)
            } else {
                stochastic_hemisphere(
                    hit_point,
                    normal,
                    material_color,
                    scene,
                    depth,
                    prob,
                    hit_diffuse,
                    fast_diffuse,
                    rng,
                )
            };
            result.clamp()
        }

        MaterialKind::Specular => {
            let hit_point = ray.at(hit.t);
            let reflect_dir = ray.direction - normal.scale(2.0 * ray.direction.dot(normal));
            let reflect_ray = Ray::new(hit_point, reflect_dir);
            let reflected = trace_color(
                &reflect_ray,
                scene,
                depth,
                prob * REFLECTION_FACTOR,
                hit_diffuse,
                fast_diffuse,
                rng,
            );
            (emission_color + material_color * reflected).clamp()
        }

        MaterialKind::Dielectric => {
            let hit_point = ray.at(hit.t);
            let reflect_dir = ray.direction - normal.scale(2.0 * ray.direction.dot(normal));
            let reflect_ray = Ray::new(hit_point, reflect_dir);

            let (n_i, n_t) = if front_face {
                (hit.material.n_outside, hit.material.n_inside)
            } else {
                (hit.material.n_inside, hit.material.n_outside)
            };

            let eta = n_i / n_t;
            let cos_i = ray.direction.dot(normal).abs();
            let cos2_t = 1.0 - eta * eta * (1.0 - cos_i * cos_i);

            if cos2_t < 0.0 {
                // Total internal reflection.
                let reflected = trace_color(
                    &reflect_ray,
                    scene,
                    depth,
                    prob * REFLECTION_FACTOR,
                    hit_diffuse,
                    fast_diffuse,
                    rng,
                );
                return (emission_color + material_color * reflected).clamp();
            }

            let cos_t = cos2_t.sqrt();
            let refract_dir = ray.direction.scale(eta) + normal.scale(eta * cos_i - cos_t);
            let refract_ray = Ray::new(hit_point, refract_dir);

            let r_s = ((eta * cos_i - cos_t) / (eta * cos_i + cos_t)).powi(2);
            let r_p = ((eta * cos_t - cos_i) / (eta * cos_t + cos_i)).powi(2);
            let reflectance = (r_s + r_p) / 2.0;

            let reflected = trace_color(
                &reflect_ray,
                scene,
                depth,
                prob * REFLECTION_FACTOR,
                hit_diffuse,
                fast_diffuse,
                rng,
            );
            // Deliberate policy: transmitted rays get their roulette budget
            // extended by one level (see SPEC_FULL.md / DESIGN.md).
            let refracted = trace_color(
                &refract_ray,
                scene,
                depth - 1,
                prob * REFRACTION_FACTOR,
                hit_diffuse,
                fast_diffuse,
                rng,
            );

            (emission_color + material_color * (reflected * reflectance + refracted * (1.0 - reflectance))).clamp()
        }
    }
}

fn direct_lighting_only(
    hit_point: crate::algebra::Point3,
    normal: crate::algebra::Vec3,
    diff_amount: f32,
    material_color: Color,
    scene: &dyn Surface,
    rng: &mut SmallRng,
) -> Color {
    let mut lights: Vec<Arc<dyn Surface>> = Vec::new();
    scene.gather_light_sources(&mut lights);

    let mut result = Color::default();
    for light in &lights {
        let mut light_result = Color::default();
        for grid_index in 0..LIGHT_SAMPLES {
            let sample_point = light.light_point_in_grid(grid_index, rng);
            let l = (sample_point - hit_point).normalize();
            let dot_p = l.dot(normal);

            let diff_c = if dot_p > 0.0 {
                let shadow_ray = Ray::new(hit_point, l);
                let shadow_color = trace_shadow(&shadow_ray, scene, light);
                shadow_color * dot_p * diff_amount * material_color
            } else {
                Color::default()
            };
            light_result = light_result + diff_c;
        }
        light_result = (light_result * (1.0 / LIGHT_SAMPLES as f32)).clamp();
        result = result + light_result;
    }
    result
}

#[allow(clippy::too_many_arguments)]
fn stochastic_hemisphere(
    hit_point: crate::algebra::Point3,
    n: crate::algebra::Vec3,
    material_color: Color,
    scene: &dyn Surface,
    depth: u32,
    prob: f32,
    hit_diffuse: bool,
    fast_diffuse: bool,
    rng: &mut SmallRng,
) -> Color {
    use crate::algebra::Vec3;

    let w = n;
    let seed = if w.0.abs() <= 0.1 { Vec3(1.0, 0.0, 0.0) } else { Vec3(0.0, 1.0, 0.0) };
    let u = seed.cross(w).normalize();
    let v = w.cross(u);

    let mut samples = Vec::with_capacity((HEMISPHERE_SAMPLES * ECLIPTIC_SAMPLES) as usize);

    for i in 0..HEMISPHERE_SAMPLES {
        for j in 0..ECLIPTIC_SAMPLES {
            let theta = HEMISPHERE_STEP * (i as f32 + uniform(rng));
            let phi = ECLIPTIC_STEP * (j as f32 + uniform(rng));
            let sin_theta = theta.sin();

            let dir = u.scale(sin_theta * phi.cos()) + v.scale(sin_theta * phi.sin()) + w.scale(theta.cos());
            let next_ray = Ray::new(hit_point, dir);
            let next_prob = if hit_diffuse { prob * DIFFUSE_FACTOR } else { prob };

            let traced = trace_color(&next_ray, scene, depth, next_prob, true, fast_diffuse, rng);

            if hit_diffuse && (traced.r >= 0.1 || traced.g >= 0.1 || traced.b >= 0.1) {
                // Early-out: a bright contribution was found, stop averaging.
                return traced * material_color;
            }

            samples.push(traced);
        }
    }

    sort_brightest_first(&mut samples);
    let top4 = samples[0] + samples[1] + samples[2] + samples[3];
    material_color * top4 * 0.25
}

/// Estimates visibility/emission along a ray known to aim at `light`.
/// A miss is a contract violation (see spec §7): logged, treated as
/// occluded (returns black).
pub fn trace_shadow(ray: &Ray, scene: &dyn Surface, light: &Arc<dyn Surface>) -> Color {
    let hit = match scene.hit(ray, T_MIN_DEFAULT, T_MAX_DEFAULT) {
        Some(h) => h,
        None => {
            eprintln!("trace_shadow: shadow ray missed the scene entirely");
            return Color::default();
        }
    };

    if is_same_surface(light, &hit) {
        hit.material.emission_color
    } else {
        Color::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Point3, Vec3};
    use crate::color::Color;
    use crate::group::Group;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use crate::wall::Wall;

    fn seeded_rng() -> SmallRng {
        crate::rng::rng_for_row(1, 0)
    }

    #[test]
    fn miss_returns_black() {
        let scene = Group::new(vec![]);
        let ray = Ray::new(Point3::new(0.0, 0.0, -20.0), Vec3(0.0, 0.0, 1.0));
        let mut rng = seeded_rng();
        let c = trace_color(&ray, &scene, 0, 1.0, false, false, &mut rng);
        assert_eq!(c, Color::default());
    }

    #[test]
    fn emissive_front_face_returns_emission() {
        let wall: Arc<dyn Surface> = Arc::new(Wall::new(
            Point3::new(-10.0, 10.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(-10.0, -10.0, 0.0),
            Arc::new(Material::emissive(Color::new(1.0, 1.0, 1.0))),
        ));
        let scene = Group::new(vec![wall]);
        let ray = Ray::new(Point3::new(0.0, 0.0, -20.0), Vec3(0.0, 0.0, 1.0));
        let mut rng = seeded_rng();
        let c = trace_color(&ray, &scene, 0, 1.0, false, false, &mut rng);
        assert_eq!(c, Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn emissive_back_face_is_dark() {
        let wall: Arc<dyn Surface> = Arc::new(Wall::new(
            Point3::new(-10.0, 10.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(-10.0, -10.0, 0.0),
            Arc::new(Material::emissive(Color::new(1.0, 1.0, 1.0))),
        ));
        let scene = Group::new(vec![wall]);
        // Approach from the opposite side, so the ray hits the back face.
        let ray = Ray::new(Point3::new(0.0, 0.0, 20.0), Vec3(0.0, 0.0, -1.0));
        let mut rng = seeded_rng();
        let c = trace_color(&ray, &scene, 0, 1.0, false, false, &mut rng);
        assert_eq!(c, Color::default());
    }

    #[test]
    fn depth_is_bounded_by_six() {
        // A mirror facing a mirror bounces forever without the depth cap;
        // confirm we never exceed MAX_DEPTH + 1 evaluations by reading the
        // instrumented max-depth counter rather than inferring it from the
        // returned color.
        let mat = Arc::new(Material::specular(Color::new(0.99, 0.99, 0.99)));
        let s1: Arc<dyn Surface> = Arc::new(Sphere::new(Point3::new(-2.0, 0.0, 10.0), 1.0, mat.clone()));
        let s2: Arc<dyn Surface> = Arc::new(Sphere::new(Point3::new(2.0, 0.0, 10.0), 1.0, mat));
        let scene = Group::new(vec![s1, s2]);
        let ray = Ray::new(Point3::new(-2.0, 0.0, 5.0), Vec3(0.0, 0.0, 1.0));
        let mut rng = seeded_rng();
        let c = trace_color(&ray, &scene, 0, 1.0, false, false, &mut rng);
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
        assert!(
            MAX_DEPTH_SEEN.load(std::sync::atomic::Ordering::Relaxed) <= 6,
            "trace_color recursed past depth 6"
        );
    }

    #[test]
    fn total_internal_reflection_matches_specular_geometry() {
        // A ray already inside a diamond-index sphere (n_inside=2.419),
        // hitting its exit point at 45 degrees to the normal: the critical
        // angle for this index is ~24.4 degrees, so this is TIR and the
        // integrator must fall back to the reflection-only branch without
        // producing NaN.
        let dielectric = Arc::new(Material::dielectric(Color::new(0.9, 0.9, 0.9), 2.419, 1.0));
        let center = Point3::new(0.0, 0.0, 0.0);
        let radius = 3.0;
        let exit_point = Point3::new(radius, 0.0, 0.0);
        let dir = Vec3(std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2, 0.0);
        let origin = exit_point - dir;

        let sphere: Arc<dyn Surface> = Arc::new(Sphere::new(center, radius, dielectric));
        let scene = Group::new(vec![sphere]);
        let ray = Ray::new(origin, dir);
        let mut rng = seeded_rng();
        let c = trace_color(&ray, &scene, 0, 1.0, false, false, &mut rng);
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
        assert!((0.0..=1.0).contains(&c.r) && (0.0..=1.0).contains(&c.g) && (0.0..=1.0).contains(&c.b));
    }
}
