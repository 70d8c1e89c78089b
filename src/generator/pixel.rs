//! Pixel stage body emitter.
//!
//! Emission follows a fixed algorithm: normal determination (one of the
//! three mutually exclusive normal-mapping branches, or the geometric
//! normal), ambient seed, per-light diffuse/specular accumulation under the
//! selected reflectance model, emissive add, base-color selection, alpha
//! selection, final combine.

use std::fmt::Write;

use crate::lighting::{Light, LightingModel};
use crate::material::NormalMapTechnique;
use crate::model::ModelSummary;

use super::features::{AlphaPath, BaseColorPath, EffectFeatures};

/// Linear search steps of the relief ray-march.
const RELIEF_STEPS_LINEAR: u32 = 15;
/// Binary refinement steps of the relief ray-march.
const RELIEF_STEPS_BINARY: u32 = 6;

/// Renders `PixelShaderFunction`.
#[must_use]
pub fn emit(features: &EffectFeatures, model: &ModelSummary) -> String {
    let mut body = String::from("float4 PixelShaderFunction(PixelShaderInput pin) : COLOR\n{\n");

    if let Some(normal_map) = features.normal_mapping() {
        emit_normal_determination(&mut body, normal_map.technique);
    }

    emit_ambient_seed(&mut body, features);

    if features.has_light {
        emit_lighting(&mut body, features, model);
    }

    if features.has_emissive_color {
        body.push_str("\tdiffuse += EmissiveColor;\n");
    }

    match features.base_color_path() {
        BaseColorPath::Map => body.push_str(
            "\tfloat4 finalDiffuse = tex2D(DiffuseMapSampler, pin.TexCoord) * float4(diffuse, 1);\n",
        ),
        BaseColorPath::Color => {
            body.push_str("\tfloat4 finalDiffuse = float4(DiffuseColor * diffuse, 1);\n");
        }
        BaseColorPath::Accumulated => {
            body.push_str("\tfloat4 finalDiffuse = float4(diffuse, 1);\n");
        }
    }

    match features.alpha_path() {
        AlphaPath::Value => body.push_str("\tfinalDiffuse.a = Opacity;\n"),
        AlphaPath::Map => {
            body.push_str("\tfinalDiffuse.a = tex2D(OpacityMapSampler, pin.TexCoord).a;\n");
        }
        AlphaPath::Opaque => {}
    }

    body.push_str("\tfloat4 color = finalDiffuse + float4(specular, 0);\n\treturn color;\n}\n");
    body
}

/// Exactly one of the three technique branches is emitted.
fn emit_normal_determination(body: &mut String, technique: NormalMapTechnique) {
    match technique {
        NormalMapTechnique::DotThreeBump => {
            body.push_str(
                "\tfloat4 bump = tex2D(NormalMapSampler, pin.TexCoord);\n\
                 \tfloat3 normalT = normalize((bump.xyz - 0.5f) * 2.0f);\n",
            );
        }
        NormalMapTechnique::Parallax => {
            // Depth from the map's alpha channel offsets the coordinate all
            // later samples use.
            body.push_str(
                "\tfloat4 bump = tex2D(NormalMapSampler, pin.TexCoord);\n\
                 \tfloat3 normalT = normalize((bump.xyz - 0.5f) * 2.0f);\n\
                 \tfloat3 viewDirT = normalize(pin.ViewDirectionT);\n\
                 \tfloat depth = ReliefScale.x * bump.a + ReliefScale.y;\n\
                 \tpin.TexCoord = depth * viewDirT.xy + pin.TexCoord;\n",
            );
        }
        NormalMapTechnique::Relief => {
            let _ = write!(
                body,
                "\t// Relief mapping\n\
                 \tconst int numStepsLinear = {RELIEF_STEPS_LINEAR};\n\
                 \tconst int numStepsBinary = {RELIEF_STEPS_BINARY};\n\n\
                 \tfloat3 position = float3(pin.TexCoord, 0);\n\
                 \tfloat3 viewDirT = normalize(pin.ViewDirectionT);\n\n\
                 \tfloat depthBias = 1.0 - viewDirT.z;\n\
                 \tdepthBias *= depthBias;\n\
                 \tdepthBias *= depthBias;\n\
                 \tdepthBias = 1.0 - depthBias * depthBias;\n\
                 \tviewDirT.xy *= depthBias;\n\
                 \tviewDirT.xy *= ReliefScale;\n\n\
                 \tviewDirT /= viewDirT.z * numStepsLinear;\n\n\
                 \tint i;\n\
                 \tfor (i = 0; i < numStepsLinear; i++)\n\
                 \t{{\n\
                 \t\tfloat4 tex = tex2D(NormalMapSampler, position.xy);\n\
                 \t\tif (position.z < tex.w)\n\
                 \t\t{{\n\
                 \t\t\tposition += viewDirT;\n\
                 \t\t}}\n\
                 \t}}\n\n\
                 \tfor (i = 0; i < numStepsBinary; i++)\n\
                 \t{{\n\
                 \t\tviewDirT *= 0.5f;\n\
                 \t\tfloat4 tex = tex2D(NormalMapSampler, position.xy);\n\
                 \t\tif (position.z < tex.w)\n\
                 \t\t{{\n\
                 \t\t\tposition += viewDirT;\n\
                 \t\t}}\n\
                 \t\telse\n\
                 \t\t{{\n\
                 \t\t\tposition -= viewDirT;\n\
                 \t\t}}\n\
                 \t}}\n\n\
                 \tpin.TexCoord = position.xy;\n\n\
                 \tfloat3 bump = tex2D(NormalMapSampler, pin.TexCoord).xyz;\n\
                 \tfloat3 normalT = (bump - 0.5f) * 2.0f;\n\
                 \tnormalT.y = -normalT.y;\n\
                 \tnormalT.z = sqrt(1.0 - normalT.x * normalT.x - normalT.y * normalT.y);\n"
            );
        }
    }
}

/// The ambient term seeds the running diffuse accumulator. An explicit
/// ambient color arrives as a uniform; otherwise a fixed fallback constant is
/// declared locally under the same name. Ambient maps were rejected before
/// generation started.
fn emit_ambient_seed(body: &mut String, features: &EffectFeatures) {
    if !features.has_ambient_material {
        body.push_str("\tfloat3 AmbientColor = float3(1, 1, 0);\n");
    }
    body.push_str("\tfloat3 diffuse = AmbientColor;\n\tfloat3 specular = 0;\n");
}

fn emit_lighting(body: &mut String, features: &EffectFeatures, model: &ModelSummary) {
    body.push_str("\tfloat3 posToEye = EyePosition - pin.PositionWS.xyz;\n");
    if features.normal_mapping().is_some() {
        body.push_str("\tfloat3 N = normalize(normalT);\n");
    } else {
        body.push_str("\tfloat3 N = normalize(pin.Normal);\n");
    }
    body.push_str("\tfloat3 E = normalize(posToEye);\n");

    for light in model.ambient_lights() {
        let _ = writeln!(body, "\tdiffuse *= {}Color;", light.name());
    }

    if features.has_directional_light {
        body.push_str("\n\tfloat3 L;\n\tfloat dt;\n");

        for light in model.directional_lights() {
            emit_directional_light(body, features, light);
        }
    }

    if features.uses_specular_color() {
        body.push_str("\tspecular *= SpecularColor;\n");
    }
}

fn emit_directional_light(body: &mut String, features: &EffectFeatures, light: &Light) {
    let name = light.name();

    // With normal mapping the direction was projected into tangent space by
    // the vertex stage; otherwise the world-space uniform is used directly.
    let direction = if features.normal_mapping().is_some() {
        format!("pin.{name}DirT")
    } else {
        format!("{name}Direction")
    };

    let _ = write!(
        body,
        "\n\t// Directional light: {name}\n\
         \tL = -normalize({direction});\n\
         \tdt = max(0,dot(L,N));\n\
         \tdiffuse += {name}Color * dt;\n"
    );

    if !features.specular_enabled() {
        return;
    }

    body.push_str("\tif (dt != 0)\n");
    let _ = write!(body, "\t\tspecular += {name}Color");
    if features.uses_specular_map() {
        body.push_str(" * tex2D(SpecularMapSampler, pin.TexCoord)");
    }
    match features.lighting_model {
        LightingModel::Blinn => {
            body.push_str(" * pow(max(0.00001f,dot(normalize(E + L),N)), SpecularPower);\n");
        }
        LightingModel::Phong => {
            body.push_str(
                " * pow(max(0.00001f,(2 * dot(L,N) * dot(N,E) - dot(E,L))), SpecularPower);\n",
            );
        }
    }
}
