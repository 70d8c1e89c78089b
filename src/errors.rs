//! Error Types
//!
//! The generator is total over every supported feature combination, so the
//! error surface is deliberately small: ambiguous authoring input and
//! recognized-but-unimplemented texture channels. Both are deterministic
//! given the same input and always reproduce.

use thiserror::Error;

/// The error type for effect generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxGenError {
    /// A material declared more than one custom shader property.
    ///
    /// The intent is ambiguous, so it is surfaced instead of auto-resolved.
    #[error("material '{material}' declares {count} custom shaders; at most one is allowed")]
    AmbiguousCustomShader {
        /// Name of the offending material.
        material: String,
        /// Number of custom shader properties found.
        count: usize,
    },

    /// A texture channel is recognized by the data model but has no
    /// generation rule yet. Never silently degraded to a constant.
    #[error("{channel} maps are not implemented yet (material '{material}')")]
    NotImplemented {
        /// Name of the offending material.
        material: String,
        /// The unimplemented channel ("ambient" or "emissive").
        channel: &'static str,
    },
}

/// Alias for `Result<T, FxGenError>`.
pub type Result<T> = std::result::Result<T, FxGenError>;
