//! The three built-in scenes, reproduced from the original renderer's
//! `GetScene01`/`GetScene02`/`GetScene03` geometry and materials.

use std::path::Path;
use std::sync::Arc;

use crate::algebra::Point3;
use crate::color::Color;
use crate::group::Group;
use crate::material::Material;
use crate::mesh;
use crate::sphere::Sphere;
use crate::surface::Surface;
use crate::wall::Wall;

fn cornell_box(children: &mut Vec<Arc<dyn Surface>>) {
    let light = Wall::new(
        Point3::new(-4.0, 9.9, 14.0),
        Point3::new(4.0, 9.9, 14.0),
        Point3::new(4.0, 9.9, 6.0),
        Point3::new(-4.0, 9.9, 6.0),
        Arc::new(Material::emissive(Color::WHITE)),
    );
    children.push(Arc::new(light));

    let front = Wall::new(
        Point3::new(-10.0, 10.0, -20.0),
        Point3::new(10.0, 10.0, -20.0),
        Point3::new(10.0, -10.0, -20.0),
        Point3::new(-10.0, -10.0, -20.0),
        Arc::new(Material::diffuse(Color::new(0.5, 0.5, 0.5))),
    );
    children.push(Arc::new(front));

    let back = Wall::new(
        Point3::new(10.0, 10.0, 20.0),
        Point3::new(-10.0, 10.0, 20.0),
        Point3::new(-10.0, -10.0, 20.0),
        Point3::new(10.0, -10.0, 20.0),
        Arc::new(Material::diffuse(Color::new(0.2, 0.8, 0.2))),
    );
    children.push(Arc::new(back));

    let top = Wall::new(
        Point3::new(-10.0, 10.0, 20.0),
        Point3::new(10.0, 10.0, 20.0),
        Point3::new(10.0, 10.0, -20.0),
        Point3::new(-10.0, 10.0, -20.0),
        Arc::new(Material::diffuse(Color::new(0.95, 0.95, 0.95))),
    );
    children.push(Arc::new(top));

    let bottom = Wall::new(
        Point3::new(10.0, -10.0, 20.0),
        Point3::new(-10.0, -10.0, 20.0),
        Point3::new(-10.0, -10.0, -20.0),
        Point3::new(10.0, -10.0, -20.0),
        Arc::new(Material::diffuse(Color::new(0.95, 0.95, 0.95))),
    );
    children.push(Arc::new(bottom));

    let left = Wall::new(
        Point3::new(-10.0, -10.0, 20.0),
        Point3::new(-10.0, 10.0, 20.0),
        Point3::new(-10.0, 10.0, -20.0),
        Point3::new(-10.0, -10.0, -20.0),
        Arc::new(Material::diffuse(Color::new(0.8, 0.2, 0.2))),
    );
    children.push(Arc::new(left));

    let right = Wall::new(
        Point3::new(10.0, 10.0, 20.0),
        Point3::new(10.0, -10.0, 20.0),
        Point3::new(10.0, -10.0, -20.0),
        Point3::new(10.0, 10.0, -20.0),
        Arc::new(Material::diffuse(Color::new(0.2, 0.2, 0.8))),
    );
    children.push(Arc::new(right));
}

fn scene_01() -> Arc<dyn Surface> {
    let mut children: Vec<Arc<dyn Surface>> = Vec::new();

    let mirror = Sphere::new(
        Point3::new(-3.5, -5.0, 10.0),
        3.5,
        Arc::new(Material::specular(Color::new(0.999, 0.999, 0.999))),
    );
    children.push(Arc::new(mirror));

    let glass = Sphere::new(
        Point3::new(5.0, -5.0, 6.0),
        3.0,
        Arc::new(Material::dielectric(Color::new(0.95, 0.95, 0.95), 1.5, 1.0)),
    );
    children.push(Arc::new(glass));

    cornell_box(&mut children);
    Arc::new(Group::new(children))
}

/// `mesh_path` is the OBJ file used for the mesh object; missing or
/// malformed meshes degrade gracefully (only the mesh piece is skipped).
fn scene_02(mesh_path: &Path) -> Arc<dyn Surface> {
    let mut children: Vec<Arc<dyn Surface>> = Vec::new();

    let mesh_material = Arc::new(Material::diffuse(Color::new(1.0, 1.0, 0.0)));
    match mesh::load_obj(mesh_path, 1.0, Point3::new(0.0, -3.0, 10.0), mesh_material) {
        Ok(surface) => children.push(surface),
        Err(e) => {
            eprintln!("scene 2: mesh unavailable ({e}), rendering box without it");
        }
    }

    cornell_box(&mut children);
    Arc::new(Group::new(children))
}

fn scene_03() -> Arc<dyn Surface> {
    let mut children: Vec<Arc<dyn Surface>> = Vec::new();

    let diamond = Sphere::new(
        Point3::new(-5.0, -4.0, 7.0),
        1.5,
        Arc::new(Material::dielectric(Color::new(0.9999, 0.9999, 0.9999), 2.419, 1.5)),
    );
    children.push(Arc::new(diamond));

    let shell = Sphere::new(
        Point3::new(-5.0, -4.0, 7.0),
        3.5,
        Arc::new(Material::dielectric(Color::new(0.95, 0.95, 0.95), 1.5, 1.0)),
    );
    children.push(Arc::new(shell));

    let diamond2 = Sphere::new(
        Point3::new(5.0, -6.0, 9.0),
        3.0,
        Arc::new(Material::dielectric(Color::new(0.9999, 0.9999, 0.9999), 2.419, 1.0)),
    );
    children.push(Arc::new(diamond2));

    let mirror_inner = Sphere::new(
        Point3::new(5.0, -6.0, 9.0),
        1.0,
        Arc::new(Material::specular(Color::new(0.95, 0.95, 0.95))),
    );
    children.push(Arc::new(mirror_inner));

    cornell_box(&mut children);
    Arc::new(Group::new(children))
}

/// Builds one of the three built-in scenes. Unknown ids fall back to
/// scene 1.
pub fn build_scene(id: u32, mesh_path: &Path) -> Arc<dyn Surface> {
    match id {
        2 => scene_02(mesh_path),
        3 => scene_03(),
        _ => scene_01(),
    }
}
