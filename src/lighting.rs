//! Lights and reflectance models.
//!
//! Light names are unique within a model and are used verbatim as identifier
//! fragments in generated declarations (`SunColor`, `SunDirection`,
//! `pin.SunDirT`), so they must be valid HLSL identifier prefixes.

use glam::Vec3;

/// Specular reflectance model used when a material declares a specular power.
///
/// A material selects its model through a lighting property; absence defaults
/// to Blinn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightingModel {
    /// Half-vector specular: `pow(max(eps, dot(normalize(E + L), N)), power)`.
    #[default]
    Blinn,
    /// Reflected-vector specular:
    /// `pow(max(eps, 2 * dot(L, N) * dot(N, E) - dot(E, L)), power)`.
    Phong,
}

/// A scene light contributing to the generated lighting code.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Omnidirectional fill light; scales the running diffuse accumulator.
    Ambient {
        /// Identifier fragment for the color uniform.
        name: String,
        /// Linear RGB color.
        color: Vec3,
    },
    /// Infinitely distant light with a world-space direction.
    Directional {
        /// Identifier fragment for the color/direction uniforms.
        name: String,
        /// Linear RGB color.
        color: Vec3,
        /// World-space direction the light travels in (not towards the light).
        direction: Vec3,
    },
}

impl Light {
    /// Creates an ambient light.
    pub fn ambient(name: impl Into<String>, color: Vec3) -> Self {
        Self::Ambient {
            name: name.into(),
            color,
        }
    }

    /// Creates a directional light.
    pub fn directional(name: impl Into<String>, color: Vec3, direction: Vec3) -> Self {
        Self::Directional {
            name: name.into(),
            color,
            direction,
        }
    }

    /// The light's name, used as an identifier fragment in generated code.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ambient { name, .. } | Self::Directional { name, .. } => name,
        }
    }

    /// The light's linear RGB color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        match self {
            Self::Ambient { color, .. } | Self::Directional { color, .. } => *color,
        }
    }
}
