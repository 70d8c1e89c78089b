//! Feature Analyzer.
//!
//! Derives one immutable record of flags from a material/model pair. The
//! record is computed once, before any text is planned, and is read-only
//! input to every other component: the layout planner, the uniform plan and
//! both stage emitters all branch on the same facts, which is what keeps the
//! emitted sections mutually consistent.
//!
//! Raw flags mirror the authored input (a `has_diffuse_map` property may be
//! present on a model without texture coordinates); the `uses_*` predicates
//! apply the gates that decide what actually reaches the generated code, and
//! are the single source of truth for declaration/reference pairing.

use glam::Vec2;

use crate::lighting::LightingModel;
use crate::material::{ColorRole, Material, MaterialProperty, NormalMapTechnique, TextureKind, ValueRole};
use crate::model::ModelSummary;

/// Active normal-mapping configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalMapSpec {
    /// The declared technique tag.
    pub technique: NormalMapTechnique,
    /// Parallax/relief scale pair.
    pub scale: Vec2,
}

/// Immutable feature record for one material/model combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectFeatures {
    /// Model has at least one light.
    pub has_light: bool,
    /// Model has at least one ambient light.
    pub has_ambient_light: bool,
    /// Model has at least one directional light.
    pub has_directional_light: bool,
    /// Any mesh channel declares texture-coordinate usage.
    pub has_tex_coords: bool,
    /// Material declares any texture property.
    pub has_texture_property: bool,
    /// Material declares a diffuse map.
    pub has_diffuse_map: bool,
    /// Material declares a normal map (technique and scale attached).
    pub normal_map: Option<NormalMapSpec>,
    /// Material declares a specular-power value.
    pub has_specularity: bool,
    /// Material declares an explicit ambient color.
    pub has_ambient_material: bool,
    /// Material declares a specular map.
    pub has_specular_map: bool,
    /// Material declares a constant specular color.
    pub has_specular_color: bool,
    /// Material declares a constant emissive color.
    pub has_emissive_color: bool,
    /// Material declares a constant diffuse color.
    pub has_diffuse_color: bool,
    /// Material declares a constant opacity value.
    pub has_opacity_value: bool,
    /// Material declares an opacity map.
    pub has_opacity_map: bool,
    /// Declared reflectance model, Blinn by default.
    pub lighting_model: LightingModel,
}

/// Which base-color path the pixel stage emits. Exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseColorPath {
    /// Diffuse map sample times accumulated diffuse.
    Map,
    /// Constant diffuse color times accumulated diffuse.
    Color,
    /// Accumulated diffuse alone.
    Accumulated,
}

/// Which alpha path the pixel stage emits. At most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaPath {
    /// Constant opacity value.
    Value,
    /// Alpha channel of the opacity map sample.
    Map,
    /// Implicit full opacity.
    Opaque,
}

impl EffectFeatures {
    /// Computes the feature record. Pure; total over any well-formed pair.
    #[must_use]
    pub fn analyze(material: &Material, model: &ModelSummary) -> Self {
        let mut features = Self {
            has_light: !model.lights().is_empty(),
            has_ambient_light: model.ambient_count() > 0,
            has_directional_light: model.directional_count() > 0,
            has_tex_coords: model.has_tex_coords(),
            has_texture_property: false,
            has_diffuse_map: false,
            normal_map: None,
            has_specularity: material.value(ValueRole::SpecularPower).is_some(),
            has_ambient_material: material.color(ColorRole::Ambient).is_some(),
            has_specular_map: false,
            has_specular_color: material.color(ColorRole::Specular).is_some(),
            has_emissive_color: material.color(ColorRole::Emissive).is_some(),
            has_diffuse_color: material.color(ColorRole::Diffuse).is_some(),
            has_opacity_value: material.value(ValueRole::Opacity).is_some(),
            has_opacity_map: false,
            lighting_model: material.lighting_model(),
        };

        for property in material.properties() {
            if let MaterialProperty::Texture { kind, .. } = property {
                features.has_texture_property = true;
                match kind {
                    TextureKind::Diffuse => features.has_diffuse_map = true,
                    TextureKind::Normal { technique, scale } => {
                        features.normal_map = Some(NormalMapSpec {
                            technique: *technique,
                            scale: *scale,
                        });
                    }
                    TextureKind::Specular => features.has_specular_map = true,
                    TextureKind::Opacity => features.has_opacity_map = true,
                    TextureKind::Ambient | TextureKind::Emissive => {}
                }
            }
        }

        features
    }

    /// Whether any texture is actually sampled: texture properties exist and
    /// the model provides coordinates to sample with.
    #[must_use]
    pub fn samples_textures(&self) -> bool {
        self.has_texture_property && self.has_tex_coords
    }

    /// The active normal-mapping configuration. Requires texture coordinates;
    /// a normal map on a model without them degrades to geometric normals.
    #[must_use]
    pub fn normal_mapping(&self) -> Option<NormalMapSpec> {
        self.has_tex_coords.then_some(self.normal_map).flatten()
    }

    /// Whether specular accumulation is generated: a specular power exists
    /// and at least one directional light produces a highlight.
    #[must_use]
    pub fn specular_enabled(&self) -> bool {
        self.has_specularity && self.has_directional_light
    }

    /// Whether the specular map masks the highlight.
    #[must_use]
    pub fn uses_specular_map(&self) -> bool {
        self.has_specular_map && self.has_tex_coords && self.specular_enabled()
    }

    /// Whether the constant specular color scales the highlight.
    #[must_use]
    pub fn uses_specular_color(&self) -> bool {
        self.has_specular_color && self.specular_enabled()
    }

    /// Whether the diffuse map feeds the base color.
    #[must_use]
    pub fn uses_diffuse_map(&self) -> bool {
        self.has_diffuse_map && self.has_tex_coords
    }

    /// The base-color path the pixel stage takes.
    #[must_use]
    pub fn base_color_path(&self) -> BaseColorPath {
        if self.uses_diffuse_map() {
            BaseColorPath::Map
        } else if self.has_diffuse_color {
            BaseColorPath::Color
        } else {
            BaseColorPath::Accumulated
        }
    }

    /// The alpha path the pixel stage takes. A constant opacity wins over an
    /// opacity map when both are authored.
    #[must_use]
    pub fn alpha_path(&self) -> AlphaPath {
        if self.has_opacity_value {
            AlphaPath::Value
        } else if self.has_opacity_map && self.has_tex_coords {
            AlphaPath::Map
        } else {
            AlphaPath::Opaque
        }
    }

    /// Whether the interpolated `Normal` field exists: lighting needs it, and
    /// the normal-mapping vertex code writes it unconditionally.
    #[must_use]
    pub fn needs_normal(&self) -> bool {
        self.has_light || self.normal_mapping().is_some()
    }
}
