//! The minimal OBJ-subset loader: `v` and `f` lines only, building a
//! bounding-sphere-guarded `Group` of triangles.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::algebra::Point3;
use crate::error::RenderError;
use crate::group::Group;
use crate::material::Material;
use crate::surface::Surface;
use crate::triangle::Triangle;

/// Parses the leading integer of an OBJ face token (`"12/4/1"` -> `12`),
/// ignoring any `/`-separated texture/normal indices, and converts the
/// 1-indexed OBJ vertex index to a 0-indexed list offset.
fn vertex_index(token: &str) -> Option<usize> {
    let leading = token.split('/').next()?;
    let index: i64 = leading.parse().ok()?;
    if index < 1 {
        None
    } else {
        Some((index - 1) as usize)
    }
}

pub fn load_obj(
    path: &Path,
    scale: f32,
    offset: Point3,
    material: Arc<Material>,
) -> Result<Arc<dyn Surface>, RenderError> {
    let contents = fs::read_to_string(path).map_err(|source| RenderError::MeshOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut positions: Vec<Point3> = Vec::new();
    let mut triangles: Vec<Arc<dyn Surface>> = Vec::new();

    let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

    for line in contents.lines() {
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else { continue };
        if tag == "#" || tag.starts_with('#') {
            continue;
        }

        match tag {
            "v" => {
                let parts: Vec<&str> = tokens.collect();
                if parts.len() < 3 {
                    return Err(RenderError::MeshParseFailed(format!(
                        "malformed vertex line: {line}"
                    )));
                }
                let parse = |s: &str| {
                    s.parse::<f32>()
                        .map_err(|_| RenderError::MeshParseFailed(format!("bad vertex coordinate: {s}")))
                };
                let x = parse(parts[0])? * scale + offset.0;
                let y = parse(parts[1])? * scale + offset.1;
                let z = parse(parts[2])? * scale + offset.2;

                min.0 = min.0.min(x);
                min.1 = min.1.min(y);
                min.2 = min.2.min(z);
                max.0 = max.0.max(x);
                max.1 = max.1.max(y);
                max.2 = max.2.max(z);

                positions.push(Point3::new(x, y, z));
            }
            "f" => {
                let parts: Vec<&str> = tokens.collect();
                if parts.len() < 3 {
                    return Err(RenderError::MeshParseFailed(format!("malformed face line: {line}")));
                }
                let i0 = vertex_index(parts[0])
                    .ok_or_else(|| RenderError::MeshParseFailed(format!("bad face index: {line}")))?;
                let i1 = vertex_index(parts[1])
                    .ok_or_else(|| RenderError::MeshParseFailed(format!("bad face index: {line}")))?;
                let i2 = vertex_index(parts[2])
                    .ok_or_else(|| RenderError::MeshParseFailed(format!("bad face index: {line}")))?;

                let v0 = *positions
                    .get(i0)
                    .ok_or_else(|| RenderError::MeshParseFailed("face references unknown vertex".into()))?;
                let v1 = *positions
                    .get(i1)
                    .ok_or_else(|| RenderError::MeshParseFailed("face references unknown vertex".into()))?;
                let v2 = *positions
                    .get(i2)
                    .ok_or_else(|| RenderError::MeshParseFailed("face references unknown vertex".into()))?;

                triangles.push(Arc::new(Triangle::new(v0, v1, v2, material.clone())));
            }
            _ => {}
        }
    }

    let center = Point3::new(
        (min.0 + max.0) / 2.0,
        (min.1 + max.1) / 2.0,
        (min.2 + max.2) / 2.0,
    );
    let extent_x = max.0 - min.0;
    let extent_y = max.1 - min.1;
    let extent_z = max.2 - min.2;
    let radius = extent_x.max(extent_y).max(extent_z) / 2.0 + 1e-3;

    Ok(Arc::new(Group::with_bounding_sphere(triangles, center, radius)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Ray, Vec3};
    use crate::color::Color;
    use std::io::Write;

    fn write_temp_obj(body: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("mc_tracer_test_{:p}.obj", body.as_ptr()));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_single_triangle() {
        let path = write_temp_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let material = Arc::new(Material::diffuse(Color::new(1.0, 1.0, 1.0)));
        let mesh = load_obj(&path, 1.0, Point3::new(0.0, 0.0, 5.0), material).unwrap();
        let ray = Ray::new(Point3::new(0.2, 0.2, -5.0), Vec3(0.0, 0.0, 1.0));
        assert!(mesh.hit(&ray, 1e-4, 1e3).is_some());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn face_index_with_slash_suffix_takes_leading_integer() {
        assert_eq!(vertex_index("12/4/1"), Some(11));
        assert_eq!(vertex_index("3"), Some(2));
    }

    #[test]
    fn missing_file_reports_mesh_open_failed() {
        let material = Arc::new(Material::diffuse(Color::new(1.0, 1.0, 1.0)));
        let result = load_obj(Path::new("/definitely/not/a/real/path.obj"), 1.0, Point3::default(), material);
        assert!(matches!(result, Err(RenderError::MeshOpenFailed { .. })));
    }

    #[test]
    fn comment_and_unknown_lines_are_ignored() {
        let path = write_temp_obj("# a comment\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng mygroup\nf 1 2 3\n");
        let material = Arc::new(Material::diffuse(Color::new(1.0, 1.0, 1.0)));
        let mesh = load_obj(&path, 1.0, Point3::default(), material).unwrap();
        let mut lights = Vec::new();
        mesh.gather_light_sources(&mut lights);
        assert!(lights.is_empty());
        let _ = fs::remove_file(path);
    }
}
