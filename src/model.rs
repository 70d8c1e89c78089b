//! Model feature summary.
//!
//! The generator never sees geometry. Upstream processing reduces a model to
//! the facts that influence generated code: the light list and whether any
//! mesh channel carries texture coordinates.

use crate::lighting::Light;

/// Aggregated model features consumed by the generator.
#[derive(Debug, Clone, Default)]
pub struct ModelSummary {
    lights: Vec<Light>,
    has_tex_coords: bool,
}

impl ModelSummary {
    /// Creates a summary from the model's lights and texture-coordinate
    /// presence.
    #[must_use]
    pub fn new(lights: Vec<Light>, has_tex_coords: bool) -> Self {
        Self {
            lights,
            has_tex_coords,
        }
    }

    /// All lights in model iteration order.
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Whether any mesh channel declares texture-coordinate usage.
    #[must_use]
    pub fn has_tex_coords(&self) -> bool {
        self.has_tex_coords
    }

    /// Ambient lights in model iteration order.
    pub fn ambient_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights
            .iter()
            .filter(|l| matches!(l, Light::Ambient { .. }))
    }

    /// Directional lights in model iteration order.
    pub fn directional_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights
            .iter()
            .filter(|l| matches!(l, Light::Directional { .. }))
    }

    /// Number of ambient lights.
    #[must_use]
    pub fn ambient_count(&self) -> usize {
        self.ambient_lights().count()
    }

    /// Number of directional lights.
    #[must_use]
    pub fn directional_count(&self) -> usize {
        self.directional_lights().count()
    }

    /// Short code over the light counts (`A1D2`), combined with the material
    /// fingerprint to form the generated name. Any difference in feature
    /// combination yields a distinct code.
    #[must_use]
    pub fn feature_id(&self) -> String {
        format!("A{}D{}", self.ambient_count(), self.directional_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn feature_id_counts_light_kinds() {
        let model = ModelSummary::new(
            vec![
                Light::directional("Sun", Vec3::ONE, Vec3::NEG_Y),
                Light::ambient("Sky", Vec3::splat(0.2)),
                Light::directional("Moon", Vec3::splat(0.1), Vec3::Y),
            ],
            true,
        );
        assert_eq!(model.feature_id(), "A1D2");
        assert_eq!(model.directional_count(), 2);
        assert_eq!(model.ambient_count(), 1);
    }

    #[test]
    fn empty_model() {
        let model = ModelSummary::default();
        assert_eq!(model.feature_id(), "A0D0");
        assert!(!model.has_tex_coords());
    }
}
