//! Material: reflection/transmission behavior plus self-emission.

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Diffuse,
    Specular,
    Dielectric,
}

#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub material_color: Color,
    pub emission_color: Color,
    pub kind: MaterialKind,
    /// Weight of the direct-lighting term used by fast (Lambertian-only) shading.
    pub diff_amount: f32,
    pub n_inside: f32,
    pub n_outside: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            material_color: Color::default(),
            emission_color: Color::default(),
            kind: MaterialKind::Diffuse,
            diff_amount: 1.0,
            n_inside: 1.5,
            n_outside: 1.0,
        }
    }
}

impl Material {
    pub fn diffuse(material_color: Color) -> Self {
        Self { material_color, ..Default::default() }
    }

    pub fn emissive(emission_color: Color) -> Self {
        Self { emission_color, ..Default::default() }
    }

    pub fn specular(material_color: Color) -> Self {
        Self {
            material_color,
            kind: MaterialKind::Specular,
            ..Default::default()
        }
    }

    pub fn dielectric(material_color: Color, n_inside: f32, n_outside: f32) -> Self {
        Self {
            material_color,
            kind: MaterialKind::Dielectric,
            n_inside,
            n_outside,
            ..Default::default()
        }
    }

    /// Emissive iff any channel of `emission_color` is nonzero.
    #[inline]
    pub fn is_emissive(&self) -> bool {
        !self.emission_color.is_black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let m = Material::default();
        assert_eq!(m.kind, MaterialKind::Diffuse);
        assert_eq!(m.diff_amount, 1.0);
        assert_eq!(m.n_inside, 1.5);
        assert_eq!(m.n_outside, 1.0);
    }

    #[test]
    fn emissive_iff_emission_nonzero() {
        assert!(!Material::diffuse(Color::new(1.0, 1.0, 1.0)).is_emissive());
        assert!(Material::emissive(Color::new(0.0, 1.0, 0.0)).is_emissive());
    }
}
