//! Effect generation.
//!
//! `generate_effect` is a pure, synchronous transformation: one call
//! consumes one material/model pair and returns one owned artifact, holding
//! no state across invocations. Generation runs in two phases: the feature
//! record, the interpolator plan and the uniform plan are built first, then
//! every textual section is rendered from those shared plans, so the two
//! stage-boundary structs and the parameter table cannot drift out of sync
//! with the emitted code.

mod features;
mod layout;
mod params;
mod pixel;
mod template_env;
mod uniforms;
mod vertex;

pub use features::{AlphaPath, BaseColorPath, EffectFeatures, NormalMapSpec};
pub use layout::{render_vertex_input, InterpolatorField, InterpolatorPlan};
pub use params::{ParameterTable, ParameterValue};
pub use uniforms::UniformPlan;

use log::{debug, trace};
use serde::Serialize;

use crate::effect::{EffectDescription, ExternalEffect, GeneratedEffect};
use crate::errors::{FxGenError, Result};
use crate::material::{Material, TextureChannel};
use crate::model::ModelSummary;

/// Generator identity written into the header comment.
const GENERATOR_IDENT: &str = concat!("fxgen ", env!("CARGO_PKG_VERSION"));

/// Options affecting document metadata, not semantics.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Timestamp for the header comment. When `None` (the default) no
    /// timestamp is written and output is byte-identical across runs.
    pub generated_at: Option<String>,
}

/// Template context; every section arrives pre-rendered.
#[derive(Serialize)]
struct EffectContext<'a> {
    name: &'a str,
    generated_by: &'a str,
    relief_scale: Option<&'a str>,
    material_uniforms: &'a str,
    light_uniforms: &'a str,
    samplers: &'a str,
    vertex_input: &'a str,
    vertex_output: &'a str,
    pixel_input: &'a str,
    vertex_body: &'a str,
    pixel_body: &'a str,
}

/// Generates the effect fitting the given material and model.
///
/// Returns the generated program and its parameter table, or the verbatim
/// passthrough when the material carries a custom shader.
///
/// # Errors
///
/// [`FxGenError::AmbiguousCustomShader`] when more than one custom shader is
/// attached; [`FxGenError::NotImplemented`] for ambient or emissive maps.
pub fn generate_effect(material: &Material, model: &ModelSummary) -> Result<EffectDescription> {
    generate_effect_with(material, model, &GeneratorOptions::default())
}

/// [`generate_effect`] with explicit [`GeneratorOptions`].
pub fn generate_effect_with(
    material: &Material,
    model: &ModelSummary,
    options: &GeneratorOptions,
) -> Result<EffectDescription> {
    let custom_count = material.custom_shaders().count();
    if custom_count > 1 {
        return Err(FxGenError::AmbiguousCustomShader {
            material: material.name().to_string(),
            count: custom_count,
        });
    }
    if let Some(shader) = material.custom_shaders().next() {
        debug!(
            "passing through custom shader '{}' for material '{}'",
            shader.name,
            material.name()
        );
        return Ok(EffectDescription::External(ExternalEffect {
            name: shader.name.clone(),
            filename: shader.filename.clone(),
            parameters: shader.parameters.clone(),
        }));
    }

    for (key, channel) in [
        (TextureChannel::Ambient, "ambient"),
        (TextureChannel::Emissive, "emissive"),
    ] {
        if material.texture(key).is_some() {
            return Err(FxGenError::NotImplemented {
                material: material.name().to_string(),
                channel,
            });
        }
    }

    let features = EffectFeatures::analyze(material, model);
    let plan = InterpolatorPlan::build(&features, model);

    let mut parameters = ParameterTable::new();
    for name in ["World", "View", "Projection", "EyePosition"] {
        parameters.insert(name, ParameterValue::CallerSupplied);
    }
    let uniforms = UniformPlan::build(material, model, &features, &mut parameters);

    let name = format!(
        "Generic-{:016x}-{}",
        material.fingerprint(),
        model.feature_id()
    );
    let filename = format!("{name}.fx");
    debug!(
        "generating effect '{name}' for material '{}' ({} lights, tex coords: {})",
        material.name(),
        model.lights().len(),
        model.has_tex_coords()
    );

    let generated_by = match &options.generated_at {
        Some(timestamp) => format!("{GENERATOR_IDENT} at {timestamp}"),
        None => GENERATOR_IDENT.to_string(),
    };
    let vertex_input = layout::render_vertex_input(&features);
    let vertex_output = plan.render_struct("VertexShaderOutput");
    let pixel_input = plan.render_struct("PixelShaderInput");
    let vertex_body = vertex::emit(&features, model);
    let pixel_body = pixel::emit(&features, model);

    let context = EffectContext {
        name: &name,
        generated_by: &generated_by,
        relief_scale: uniforms.relief_scale.as_deref(),
        material_uniforms: &uniforms.material_decls,
        light_uniforms: &uniforms.light_decls,
        samplers: &uniforms.samplers,
        vertex_input: &vertex_input,
        vertex_output: &vertex_output,
        pixel_input: &pixel_input,
        vertex_body: &vertex_body,
        pixel_body: &pixel_body,
    };

    let template = template_env::get_env()
        .get_template("effect")
        .expect("effect template not found");
    let code = template.render(&context).expect("effect template render failed");
    trace!("generated {} bytes for '{name}'", code.len());

    Ok(EffectDescription::Generated(GeneratedEffect {
        name,
        filename,
        code,
        parameters,
    }))
}
