//! Material data model.
//!
//! A [`Material`] is a named, ordered collection of [`MaterialProperty`]
//! entries. The property space is a small closed set of tagged variants
//! (constant colors and scalars, six texture channels, a lighting-model
//! selector, and an external custom shader), so every feature combination the
//! generator has to handle is exhaustively enumerable.
//!
//! Property names are canonical and derived from the variant (a diffuse color
//! is always `DiffuseColor`); they double as the uniform names in generated
//! code. Names are unique within a material.

use glam::{Vec2, Vec3, Vec4};
use xxhash_rust::xxh3::xxh3_64;

use crate::lighting::LightingModel;

/// An RGB or RGBA constant. The variant decides the HLSL parameter type
/// (`float3` vs `float4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Opaque color, declared as `float3`.
    Rgb(Vec3),
    /// Color with alpha, declared as `float4`.
    Rgba(Vec4),
}

impl Color {
    /// HLSL parameter type for this color.
    #[must_use]
    pub fn hlsl_type(&self) -> &'static str {
        match self {
            Self::Rgb(_) => "float3",
            Self::Rgba(_) => "float4",
        }
    }

    /// HLSL constructor literal, e.g. `float3(1, 0, 0)`.
    #[must_use]
    pub fn literal(&self) -> String {
        match self {
            Self::Rgb(v) => format!(
                "float3({}, {}, {})",
                float_literal(v.x),
                float_literal(v.y),
                float_literal(v.z)
            ),
            Self::Rgba(v) => format!(
                "float4({}, {}, {}, {})",
                float_literal(v.x),
                float_literal(v.y),
                float_literal(v.z),
                float_literal(v.w)
            ),
        }
    }
}

/// Reference to an already-resolved texture asset.
///
/// The generator never touches the asset itself; the reference is carried
/// into the parameter table so the runtime can bind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureReference {
    path: String,
}

impl TextureReference {
    /// Creates a reference from an asset path or content id.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The referenced asset path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Role of a constant color property; fixes its canonical uniform name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Diffuse,
    Specular,
    Ambient,
    Emissive,
}

impl ColorRole {
    /// Canonical uniform name for this role.
    #[must_use]
    pub fn uniform_name(self) -> &'static str {
        match self {
            Self::Diffuse => "DiffuseColor",
            Self::Specular => "SpecularColor",
            Self::Ambient => "AmbientColor",
            Self::Emissive => "EmissiveColor",
        }
    }
}

/// Role of a constant scalar property; fixes its canonical uniform name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueRole {
    SpecularPower,
    Opacity,
}

impl ValueRole {
    /// Canonical uniform name for this role.
    #[must_use]
    pub fn uniform_name(self) -> &'static str {
        match self {
            Self::SpecularPower => "SpecularPower",
            Self::Opacity => "Opacity",
        }
    }
}

/// Normal perturbation technique carried by a normal map.
///
/// The three techniques are mutually exclusive in the generated pixel stage;
/// exactly one branch is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalMapTechnique {
    /// Plain decode of the sampled normal (`sample * 2 - 1`).
    DotThreeBump,
    /// Decode plus a texture-coordinate offset along the tangent-space view
    /// direction, scaled by the map's alpha channel and the scale pair.
    Parallax,
    /// Iterative ray-march (fixed linear steps, then binary refinement)
    /// against the map's alpha channel.
    Relief,
}

impl NormalMapTechnique {
    /// Whether the pixel stage needs the tangent-space view direction.
    #[must_use]
    pub fn needs_view_direction(self) -> bool {
        matches!(self, Self::Parallax | Self::Relief)
    }
}

/// A texture channel with any per-channel payload stripped; the closed key
/// space for channel lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    Diffuse,
    Normal,
    Specular,
    Ambient,
    Emissive,
    Opacity,
}

/// Which shading channel a texture feeds; fixes its canonical uniform name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureKind {
    Diffuse,
    Normal {
        technique: NormalMapTechnique,
        /// Parallax/relief scale pair (depth scale, depth bias).
        scale: Vec2,
    },
    Specular,
    Ambient,
    Emissive,
    Opacity,
}

impl TextureKind {
    /// The channel this kind feeds, ignoring any payload.
    #[must_use]
    pub fn channel(self) -> TextureChannel {
        match self {
            Self::Diffuse => TextureChannel::Diffuse,
            Self::Normal { .. } => TextureChannel::Normal,
            Self::Specular => TextureChannel::Specular,
            Self::Ambient => TextureChannel::Ambient,
            Self::Emissive => TextureChannel::Emissive,
            Self::Opacity => TextureChannel::Opacity,
        }
    }

    /// Canonical uniform name for this texture channel.
    #[must_use]
    pub fn uniform_name(self) -> &'static str {
        match self {
            Self::Diffuse => "DiffuseMap",
            Self::Normal { .. } => "NormalMap",
            Self::Specular => "SpecularMap",
            Self::Ambient => "AmbientMap",
            Self::Emissive => "EmissiveMap",
            Self::Opacity => "OpacityMap",
        }
    }
}

/// An externally authored shader program attached to a material.
///
/// When present (exactly once), generation is skipped and these fields are
/// echoed verbatim into the output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomShader {
    /// Name identifying the external effect.
    pub name: String,
    /// External file reference (relative path to the shader source).
    pub filename: String,
    /// Parameter names declared by the external file.
    pub parameters: Vec<String>,
}

/// One shading input of a material.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialProperty {
    /// RGB/RGBA constant (diffuse, specular, ambient or emissive color).
    Color { role: ColorRole, color: Color },
    /// Scalar constant (specular power or opacity).
    Value { role: ValueRole, value: f32 },
    /// Texture reference feeding one shading channel.
    Texture {
        kind: TextureKind,
        texture: TextureReference,
    },
    /// Selects the specular reflectance model. Not shader-bound itself.
    Lighting(LightingModel),
    /// External shader passthrough.
    Custom(CustomShader),
}

impl MaterialProperty {
    /// The property's canonical name, unique within a material.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Color { role, .. } => role.uniform_name(),
            Self::Value { role, .. } => role.uniform_name(),
            Self::Texture { kind, .. } => kind.uniform_name(),
            Self::Lighting(_) => "LightingModel",
            Self::Custom(shader) => &shader.name,
        }
    }

    /// Stable canonical encoding over (name, kind, value) used by the
    /// fingerprint. Property order must never leak into this string.
    fn canonical_encoding(&self) -> String {
        match self {
            Self::Color { role, color } => {
                format!("color:{}:{}", role.uniform_name(), color.literal())
            }
            Self::Value { role, value } => {
                format!("value:{}:{}", role.uniform_name(), float_literal(*value))
            }
            Self::Texture { kind, texture } => match kind {
                TextureKind::Normal { technique, scale } => format!(
                    "texture:NormalMap:{technique:?}:{}:{}:{}",
                    float_literal(scale.x),
                    float_literal(scale.y),
                    texture.path()
                ),
                _ => format!("texture:{}:{}", kind.uniform_name(), texture.path()),
            },
            Self::Lighting(model) => format!("lighting:{model:?}"),
            Self::Custom(shader) => format!(
                "custom:{}:{}:{}",
                shader.name,
                shader.filename,
                shader.parameters.join(",")
            ),
        }
    }
}

/// Capability for properties that can seed their uniform declaration with an
/// HLSL initializer (`float3 DiffuseColor = float3(1, 0, 0);`).
pub trait ShaderDefaultValue {
    /// The initializer literal, if the property has one.
    fn shader_default_value(&self) -> Option<String>;
}

impl ShaderDefaultValue for MaterialProperty {
    fn shader_default_value(&self) -> Option<String> {
        match self {
            Self::Color { color, .. } => Some(color.literal()),
            Self::Value { value, .. } => Some(float_literal(*value)),
            Self::Texture { .. } | Self::Lighting(_) | Self::Custom(_) => None,
        }
    }
}

/// A named bundle of shading-relevant properties describing a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    properties: Vec<MaterialProperty>,
}

impl Material {
    /// Creates a material from already-validated properties.
    ///
    /// Property names are expected to be unique; this is an upstream
    /// invariant and only checked in debug builds.
    pub fn new(name: impl Into<String>, properties: Vec<MaterialProperty>) -> Self {
        debug_assert!(
            {
                let mut names: Vec<&str> = properties.iter().map(MaterialProperty::name).collect();
                names.sort_unstable();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "material property names must be unique"
        );
        Self {
            name: name.into(),
            properties,
        }
    }

    /// The material's authored name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All properties in authored order.
    #[must_use]
    pub fn properties(&self) -> &[MaterialProperty] {
        &self.properties
    }

    /// All custom-shader properties.
    pub fn custom_shaders(&self) -> impl Iterator<Item = &CustomShader> {
        self.properties.iter().filter_map(|p| match p {
            MaterialProperty::Custom(shader) => Some(shader),
            _ => None,
        })
    }

    /// Constant color for the given role, if declared.
    #[must_use]
    pub fn color(&self, role: ColorRole) -> Option<Color> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Color { role: r, color } if *r == role => Some(*color),
            _ => None,
        })
    }

    /// Constant scalar for the given role, if declared.
    #[must_use]
    pub fn value(&self, role: ValueRole) -> Option<f32> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Value { role: r, value } if *r == role => Some(*value),
            _ => None,
        })
    }

    /// Texture reference and full kind for the given channel, if declared.
    /// Matches on the channel alone, ignoring normal-map payload.
    #[must_use]
    pub fn texture(&self, channel: TextureChannel) -> Option<(TextureKind, &TextureReference)> {
        self.properties.iter().find_map(|p| match p {
            MaterialProperty::Texture { kind, texture } if kind.channel() == channel => {
                Some((*kind, texture))
            }
            _ => None,
        })
    }

    /// The declared reflectance model, or Blinn when absent.
    #[must_use]
    pub fn lighting_model(&self) -> LightingModel {
        self.properties
            .iter()
            .find_map(|p| match p {
                MaterialProperty::Lighting(model) => Some(*model),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Stable, order-independent fingerprint over the property set.
    ///
    /// Two materials with equal property sets fingerprint identically even if
    /// their properties were authored in a different order, so textually
    /// identical output collapses onto one generated name.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut entries: Vec<String> = self
            .properties
            .iter()
            .map(MaterialProperty::canonical_encoding)
            .collect();
        entries.sort_unstable();
        xxh3_64(entries.join("\n").as_bytes())
    }
}

/// Formats an `f32` the way HLSL constants are written in generated code
/// (`32`, `0.03`, `-0.025`).
#[must_use]
pub(crate) fn float_literal(value: f32) -> String {
    format!("{value}")
}
