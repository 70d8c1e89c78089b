//! Generated artifact types.
//!
//! One generation call returns one [`EffectDescription`]: either a freshly
//! generated program with its parameter table, or a verbatim echo of an
//! externally authored shader. The generator performs neither persistence nor
//! compilation; the asset pipeline saves the code under the returned filename
//! and associates the compiled program with the table.

use crate::generator::ParameterTable;

/// A fully generated effect: source text plus its bindable parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedEffect {
    /// Deterministic name (`Generic-<fingerprint>-<feature id>`).
    pub name: String,
    /// `<name>.fx`, stable across runs for identical input.
    pub filename: String,
    /// Complete effect source, both stages, ready for compilation.
    pub code: String,
    /// Uniform name → default value or caller-supplied sentinel.
    pub parameters: ParameterTable,
}

/// An externally authored shader passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEffect {
    /// The custom shader's declared name.
    pub name: String,
    /// The external file reference, verbatim.
    pub filename: String,
    /// The parameter names declared by the external file, verbatim. No table
    /// entries are synthesized for these.
    pub parameters: Vec<String>,
}

/// The single output of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectDescription {
    /// Generated from material and model features.
    Generated(GeneratedEffect),
    /// Echoed from a custom-shader material property.
    External(ExternalEffect),
}

impl EffectDescription {
    /// The effect's name, used for identification and de-duplication.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Generated(effect) => &effect.name,
            Self::External(effect) => &effect.name,
        }
    }

    /// The filename the effect should be persisted under.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Generated(effect) => &effect.filename,
            Self::External(effect) => &effect.filename,
        }
    }

    /// Generated source text, or `None` for an external passthrough.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Generated(effect) => Some(&effect.code),
            Self::External(_) => None,
        }
    }
}
