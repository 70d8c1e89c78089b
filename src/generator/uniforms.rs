//! Uniform declaration plan.
//!
//! One pass over the material and model decides which uniforms exist, renders
//! their declaration text, and appends the matching parameter-table entries.
//! Declarations and table entries come from the same plan, and the stage
//! emitters branch on the same feature predicates, which is what guarantees
//! that every declared uniform is referenced and every referenced uniform is
//! declared.

use glam::Vec3;
use std::fmt::Write;

use crate::material::{
    float_literal, Material, MaterialProperty, ShaderDefaultValue, TextureKind,
};
use crate::lighting::Light;
use crate::model::ModelSummary;

use super::features::{AlphaPath, BaseColorPath, EffectFeatures};
use super::params::{ParameterTable, ParameterValue};

/// Rendered declaration sections of the effect document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformPlan {
    /// `ReliefScale` initializer literal, when parallax/relief is active.
    pub relief_scale: Option<String>,
    /// Material uniform declarations, one line each.
    pub material_decls: String,
    /// Light color/direction declarations, one line each.
    pub light_decls: String,
    /// Sampler blocks, one per sampled texture.
    pub samplers: String,
}

impl UniformPlan {
    /// Renders all declaration sections and appends their table entries.
    ///
    /// Table order mirrors document order: the caller has already added the
    /// camera/transform entries; this adds the relief scale, then one entry
    /// per shader-bound material property in authored order, then the light
    /// entries in model iteration order.
    #[must_use]
    pub fn build(
        material: &Material,
        model: &ModelSummary,
        features: &EffectFeatures,
        table: &mut ParameterTable,
    ) -> Self {
        let relief_scale = features
            .normal_mapping()
            .filter(|nm| nm.technique.needs_view_direction())
            .map(|nm| {
                table.insert("ReliefScale", ParameterValue::Pair(nm.scale));
                format!(
                    "float2({}, {})",
                    float_literal(nm.scale.x),
                    float_literal(nm.scale.y)
                )
            });

        let mut plan = Self {
            relief_scale,
            material_decls: String::new(),
            light_decls: String::new(),
            samplers: String::new(),
        };

        for property in material.properties() {
            if !is_shader_bound(property, features) {
                continue;
            }
            plan.declare_property(property, table);
        }

        for light in model.lights() {
            plan.declare_light(light, table);
        }

        plan
    }

    fn declare_property(&mut self, property: &MaterialProperty, table: &mut ParameterTable) {
        let (parameter_type, value) = match property {
            MaterialProperty::Color { color, .. } => {
                (color.hlsl_type(), ParameterValue::Color(*color))
            }
            MaterialProperty::Value { value, .. } => ("float", ParameterValue::Scalar(*value)),
            MaterialProperty::Texture { texture, .. } => {
                ("texture", ParameterValue::Texture(texture.clone()))
            }
            MaterialProperty::Lighting(_) | MaterialProperty::Custom(_) => return,
        };

        let name = property.name();
        if let Some(initializer) = property.shader_default_value() {
            let _ = writeln!(self.material_decls, "{parameter_type} {name} = {initializer};");
        } else {
            let _ = writeln!(self.material_decls, "{parameter_type} {name};");
        }

        if let MaterialProperty::Texture { kind, .. } = property {
            self.declare_sampler(name, *kind);
        }
        table.insert(name, value);
    }

    /// Samplers use trilinear-equivalent LINEAR filtering; every texture kind
    /// except normal maps wraps on both axes.
    fn declare_sampler(&mut self, name: &str, kind: TextureKind) {
        let _ = write!(
            self.samplers,
            "sampler {name}Sampler = sampler_state\n{{\n    texture = <{name}>;\n    magfilter = LINEAR;\n    minfilter = LINEAR;\n    mipfilter = LINEAR;\n"
        );
        if !matches!(kind, TextureKind::Normal { .. }) {
            self.samplers
                .push_str("    AddressU = wrap;\n    AddressV = wrap;\n");
        }
        self.samplers.push_str("};\n");
    }

    fn declare_light(&mut self, light: &Light, table: &mut ParameterTable) {
        match light {
            Light::Ambient { name, color } => {
                let _ = writeln!(
                    self.light_decls,
                    "float3 {name}Color = {};",
                    vec3_literal(*color)
                );
                table.insert(
                    format!("{name}Color"),
                    ParameterValue::Color(crate::material::Color::Rgb(*color)),
                );
            }
            Light::Directional {
                name,
                color,
                direction,
            } => {
                let _ = writeln!(
                    self.light_decls,
                    "float3 {name}Color = {};",
                    vec3_literal(*color)
                );
                let _ = writeln!(
                    self.light_decls,
                    "float3 {name}Direction = {};",
                    vec3_literal(*direction)
                );
                table.insert(
                    format!("{name}Color"),
                    ParameterValue::Color(crate::material::Color::Rgb(*color)),
                );
                table.insert(
                    format!("{name}Direction"),
                    ParameterValue::Direction(*direction),
                );
            }
        }
    }
}

/// Whether a property produces a uniform the generated code will reference.
///
/// Properties the bodies cannot reach (a specular power with no directional
/// light, a texture on a model without coordinates, a diffuse color shadowed
/// by a diffuse map) are left out of both the declarations and the table.
fn is_shader_bound(property: &MaterialProperty, features: &EffectFeatures) -> bool {
    use crate::material::{ColorRole, ValueRole};

    match property {
        MaterialProperty::Color { role, .. } => match role {
            ColorRole::Diffuse => features.base_color_path() == BaseColorPath::Color,
            ColorRole::Ambient | ColorRole::Emissive => true,
            ColorRole::Specular => features.uses_specular_color(),
        },
        MaterialProperty::Value { role, .. } => match role {
            ValueRole::SpecularPower => features.specular_enabled(),
            ValueRole::Opacity => features.alpha_path() == AlphaPath::Value,
        },
        MaterialProperty::Texture { kind, .. } => match kind {
            TextureKind::Diffuse => features.uses_diffuse_map(),
            TextureKind::Normal { .. } => features.normal_mapping().is_some(),
            TextureKind::Specular => features.uses_specular_map(),
            TextureKind::Opacity => features.alpha_path() == AlphaPath::Map,
            // Rejected before generation starts.
            TextureKind::Ambient | TextureKind::Emissive => false,
        },
        MaterialProperty::Lighting(_) | MaterialProperty::Custom(_) => false,
    }
}

fn vec3_literal(v: Vec3) -> String {
    format!(
        "float3({}, {}, {})",
        float_literal(v.x),
        float_literal(v.y),
        float_literal(v.z)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, ColorRole, TextureReference, ValueRole};

    #[test]
    fn specular_power_dropped_without_directional_light() {
        let material = Material::new(
            "m",
            vec![
                MaterialProperty::Value {
                    role: ValueRole::SpecularPower,
                    value: 32.0,
                },
                MaterialProperty::Color {
                    role: ColorRole::Diffuse,
                    color: Color::Rgb(Vec3::ONE),
                },
            ],
        );
        let model = ModelSummary::new(vec![], true);
        let features = EffectFeatures::analyze(&material, &model);
        let mut table = ParameterTable::new();
        let plan = UniformPlan::build(&material, &model, &features, &mut table);

        assert!(!plan.material_decls.contains("SpecularPower"));
        assert!(!table.contains("SpecularPower"));
        assert!(table.contains("DiffuseColor"));
        assert!(plan.material_decls.contains("float3 DiffuseColor = float3(1, 1, 1);"));
    }

    #[test]
    fn normal_map_sampler_omits_address_mode() {
        use crate::material::NormalMapTechnique;
        use glam::Vec2;

        let material = Material::new(
            "m",
            vec![
                MaterialProperty::Texture {
                    kind: TextureKind::Diffuse,
                    texture: TextureReference::new("d.dds"),
                },
                MaterialProperty::Texture {
                    kind: TextureKind::Normal {
                        technique: NormalMapTechnique::DotThreeBump,
                        scale: Vec2::new(0.03, -0.025),
                    },
                    texture: TextureReference::new("n.dds"),
                },
            ],
        );
        let model = ModelSummary::new(vec![], true);
        let features = EffectFeatures::analyze(&material, &model);
        let mut table = ParameterTable::new();
        let plan = UniformPlan::build(&material, &model, &features, &mut table);

        let normal_block = plan
            .samplers
            .split("sampler ")
            .find(|block| block.starts_with("NormalMapSampler"))
            .unwrap();
        assert!(!normal_block.contains("AddressU"));

        let diffuse_block = plan
            .samplers
            .split("sampler ")
            .find(|block| block.starts_with("DiffuseMapSampler"))
            .unwrap();
        assert!(diffuse_block.contains("AddressU = wrap;"));
        assert!(plan.relief_scale.is_none());
    }

    #[test]
    fn directional_light_declares_color_and_direction() {
        let material = Material::new("m", vec![]);
        let model = ModelSummary::new(
            vec![Light::directional(
                "Sun",
                Vec3::new(1.0, 0.9, 0.8),
                Vec3::new(0.0, -1.0, 0.0),
            )],
            false,
        );
        let features = EffectFeatures::analyze(&material, &model);
        let mut table = ParameterTable::new();
        let plan = UniformPlan::build(&material, &model, &features, &mut table);

        assert!(plan
            .light_decls
            .contains("float3 SunColor = float3(1, 0.9, 0.8);"));
        assert!(plan
            .light_decls
            .contains("float3 SunDirection = float3(0, -1, 0);"));
        assert!(table.contains("SunColor"));
        assert!(table.contains("SunDirection"));
    }
}
