#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]

//! Deterministic HLSL effect generation.
//!
//! Turns a [`Material`] (an unordered bag of surface properties) and a
//! [`ModelSummary`] (the scene features the shader must react to) into a
//! complete, ready-to-compile effect document plus the table of every
//! parameter the document declares.
//!
//! Identical inputs always produce byte-identical output; the effect name
//! embeds a content fingerprint of the material together with the model's
//! light counts, so equal inputs collapse onto one effect file on disk.
//!
//! ```
//! use fxgen::{generate_effect, Color, ColorRole, Material, MaterialProperty, ModelSummary};
//! use glam::Vec3;
//!
//! let material = Material::new(
//!     "red",
//!     vec![MaterialProperty::Color {
//!         role: ColorRole::Diffuse,
//!         color: Color::Rgb(Vec3::new(1.0, 0.0, 0.0)),
//!     }],
//! );
//! let model = ModelSummary::new(vec![], false);
//!
//! let effect = generate_effect(&material, &model)?;
//! assert!(effect.filename().ends_with(".fx"));
//! assert!(effect.code().unwrap().contains("DiffuseColor"));
//! # Ok::<(), fxgen::FxGenError>(())
//! ```

pub mod effect;
pub mod errors;
pub mod generator;
pub mod lighting;
pub mod material;
pub mod model;

pub use effect::{EffectDescription, ExternalEffect, GeneratedEffect};
pub use errors::{FxGenError, Result};
pub use generator::{
    generate_effect, generate_effect_with, GeneratorOptions, ParameterTable, ParameterValue,
};
pub use lighting::{Light, LightingModel};
pub use material::{
    Color, ColorRole, CustomShader, Material, MaterialProperty, NormalMapTechnique,
    TextureChannel, TextureKind, TextureReference, ValueRole,
};
pub use model::ModelSummary;
