//! Struct Layout Planner.
//!
//! Assigns texture-coordinate interpolator slots once and renders the result
//! into both the vertex-output and pixel-input structs, so the two can never
//! drift apart. Slot order is fixed: diffuse texture coordinate (when
//! sampled), world-space position, one tangent-space direction per
//! directional light (normal mapping only, in model light order), then the
//! tangent-space view direction (parallax/relief only).

use smallvec::SmallVec;
use std::fmt::Write;

use crate::model::ModelSummary;

use super::features::EffectFeatures;

/// Hands out sequential `TEXCOORD<n>` slots, starting at zero.
struct SlotAllocator {
    next: u32,
}

impl SlotAllocator {
    fn new() -> Self {
        Self { next: 0 }
    }

    fn next(&mut self) -> u32 {
        let slot = self.next;
        self.next += 1;
        slot
    }
}

/// One interpolated field shared by the vertex-output and pixel-input structs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolatorField {
    /// Field name, referenced as `output.<name>` / `pin.<name>`.
    pub name: String,
    /// HLSL type.
    pub hlsl_type: &'static str,
    /// Semantic annotation (`TEXCOORD<n>`, `POSITION`, `NORMAL`).
    pub semantic: String,
    /// Trailing comment, if any.
    comment: Option<&'static str>,
}

impl InterpolatorField {
    fn slot(name: impl Into<String>, hlsl_type: &'static str, slot: u32) -> Self {
        Self {
            name: name.into(),
            hlsl_type,
            semantic: format!("TEXCOORD{slot}"),
            comment: None,
        }
    }
}

/// The shared field plan for the two stage-boundary structs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolatorPlan {
    fields: SmallVec<[InterpolatorField; 8]>,
}

impl InterpolatorPlan {
    /// Builds the plan for one feature combination.
    #[must_use]
    pub fn build(features: &EffectFeatures, model: &ModelSummary) -> Self {
        let mut slots = SlotAllocator::new();
        let mut fields = SmallVec::new();

        if features.samples_textures() {
            fields.push(InterpolatorField::slot("TexCoord", "float2", slots.next()));
        }

        fields.push(InterpolatorField {
            name: "PositionPS".into(),
            hlsl_type: "float4",
            semantic: "POSITION".into(),
            comment: Some("Position in Projection Space"),
        });

        let mut position_ws = InterpolatorField::slot("PositionWS", "float4", slots.next());
        position_ws.comment = Some("Position in World Space");
        fields.push(position_ws);

        if features.needs_normal() {
            fields.push(InterpolatorField {
                name: "Normal".into(),
                hlsl_type: "float3",
                semantic: "NORMAL".into(),
                comment: None,
            });
        }

        if let Some(normal_map) = features.normal_mapping() {
            for light in model.directional_lights() {
                fields.push(InterpolatorField::slot(
                    format!("{}DirT", light.name()),
                    "float3",
                    slots.next(),
                ));
            }

            if normal_map.technique.needs_view_direction() {
                fields.push(InterpolatorField::slot(
                    "ViewDirectionT",
                    "float3",
                    slots.next(),
                ));
            }
        }

        Self { fields }
    }

    /// The planned fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[InterpolatorField] {
        &self.fields
    }

    /// Renders the plan as a struct definition. Called once per struct name;
    /// both renderings are field-for-field identical.
    #[must_use]
    pub fn render_struct(&self, struct_name: &str) -> String {
        let mut out = format!("struct {struct_name}\n{{\n");
        for field in &self.fields {
            let _ = write!(
                out,
                "\t{} {} : {};",
                field.hlsl_type, field.name, field.semantic
            );
            if let Some(comment) = field.comment {
                let _ = write!(out, " // {comment}");
            }
            out.push('\n');
        }
        out.push_str("};\n");
        out
    }
}

/// Renders the vertex-input struct. Inputs are not interpolated and carry
/// their own fixed semantics, so this does not consume interpolator slots.
#[must_use]
pub fn render_vertex_input(features: &EffectFeatures) -> String {
    let mut out = String::from("struct VertexShaderInput\n{\n");
    out.push_str("\tfloat4 Position : POSITION;\n");
    if features.samples_textures() {
        out.push_str("\tfloat2 TexCoord : TEXCOORD0;\n");
    }
    if features.needs_normal() {
        out.push_str("\tfloat3 Normal : NORMAL;\n");
    }
    if features.normal_mapping().is_some() {
        out.push_str("\tfloat3 Tangent : TANGENT;\n");
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::Light;
    use crate::material::{
        Material, MaterialProperty, NormalMapTechnique, TextureKind, TextureReference, ValueRole,
    };
    use glam::{Vec2, Vec3};

    fn parallax_material() -> Material {
        Material::new(
            "m",
            vec![
                MaterialProperty::Texture {
                    kind: TextureKind::Diffuse,
                    texture: TextureReference::new("d.dds"),
                },
                MaterialProperty::Texture {
                    kind: TextureKind::Normal {
                        technique: NormalMapTechnique::Parallax,
                        scale: Vec2::new(0.03, -0.025),
                    },
                    texture: TextureReference::new("n.dds"),
                },
                MaterialProperty::Value {
                    role: ValueRole::SpecularPower,
                    value: 32.0,
                },
            ],
        )
    }

    #[test]
    fn slots_are_sequential_in_fixed_order() {
        let model = ModelSummary::new(
            vec![
                Light::directional("Sun", Vec3::ONE, Vec3::NEG_Y),
                Light::directional("Moon", Vec3::splat(0.1), Vec3::Y),
            ],
            true,
        );
        let material = parallax_material();
        let features = EffectFeatures::analyze(&material, &model);
        let plan = InterpolatorPlan::build(&features, &model);

        let semantics: Vec<(&str, &str)> = plan
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.semantic.as_str()))
            .collect();
        assert_eq!(
            semantics,
            [
                ("TexCoord", "TEXCOORD0"),
                ("PositionPS", "POSITION"),
                ("PositionWS", "TEXCOORD1"),
                ("Normal", "NORMAL"),
                ("SunDirT", "TEXCOORD2"),
                ("MoonDirT", "TEXCOORD3"),
                ("ViewDirectionT", "TEXCOORD4"),
            ]
        );
    }

    #[test]
    fn both_structs_render_identical_fields() {
        let model = ModelSummary::new(vec![Light::directional("Sun", Vec3::ONE, Vec3::NEG_Y)], true);
        let material = parallax_material();
        let features = EffectFeatures::analyze(&material, &model);
        let plan = InterpolatorPlan::build(&features, &model);

        let vs_out = plan.render_struct("VertexShaderOutput");
        let ps_in = plan.render_struct("PixelShaderInput");
        assert_eq!(
            vs_out.trim_start_matches("struct VertexShaderOutput"),
            ps_in.trim_start_matches("struct PixelShaderInput"),
        );
    }

    #[test]
    fn minimal_plan_has_position_only() {
        let model = ModelSummary::new(vec![], false);
        let material = Material::new("m", vec![]);
        let features = EffectFeatures::analyze(&material, &model);
        let plan = InterpolatorPlan::build(&features, &model);

        let names: Vec<&str> = plan.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["PositionPS", "PositionWS"]);
    }
}
