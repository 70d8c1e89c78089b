//! Vertex stage body emitter.
//!
//! The vertex stage always chains the position through world, view and
//! projection and forwards the world-space position. With normal mapping it
//! builds an orthonormal tangent-space basis from the binormal (cross of
//! tangent and normal), lifts it into world space and projects each
//! directional light direction (and, for parallax/relief, the view
//! direction) into tangent space. Without normal mapping the world-space
//! normal is forwarded directly when lighting needs it.

use std::fmt::Write;

use crate::model::ModelSummary;

use super::features::EffectFeatures;

/// Renders `VertexShaderFunction`.
#[must_use]
pub fn emit(features: &EffectFeatures, model: &ModelSummary) -> String {
    let mut body = String::from(
        "VertexShaderOutput VertexShaderFunction(VertexShaderInput vin)\n{\n\
         \tVertexShaderOutput output;\n\
         \tfloat4 pos_ws = mul(vin.Position, World);\n\
         \tfloat4 pos_vs = mul(pos_ws, View);\n\
         \tfloat4 pos_ps = mul(pos_vs, Projection);\n\
         \toutput.PositionPS = pos_ps;\n\
         \toutput.PositionWS = pos_ws;\n",
    );

    if let Some(normal_map) = features.normal_mapping() {
        body.push_str(
            "\toutput.Normal = normalize(mul(vin.Normal.xyz, (float3x3)World));\n\n\
             \tfloat3 binormal = cross(vin.Tangent, vin.Normal);\n\
             \tfloat3x3 tangentToObject;\n\
             \ttangentToObject[0] = normalize(binormal);\n\
             \ttangentToObject[1] = normalize(vin.Tangent);\n\
             \ttangentToObject[2] = normalize(vin.Normal);\n\
             \tfloat3x3 tangentToWorld = mul(tangentToObject, (float3x3)World);\n\n",
        );

        for light in model.directional_lights() {
            let _ = writeln!(
                body,
                "\toutput.{name}DirT = mul(tangentToWorld, {name}Direction);",
                name = light.name()
            );
        }

        if normal_map.technique.needs_view_direction() {
            body.push_str(
                "\toutput.ViewDirectionT = mul(tangentToWorld, pos_ws.xyz - EyePosition);\n",
            );
        }
    } else if features.has_light {
        body.push_str("\toutput.Normal = normalize(mul(vin.Normal.xyz, (float3x3)World));\n");
    }

    if features.samples_textures() {
        body.push_str("\toutput.TexCoord = vin.TexCoord;\n");
    }

    body.push_str("\treturn output;\n}\n");
    body
}
