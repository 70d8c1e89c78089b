//! Parameter Table Builder.
//!
//! An ordered mapping from declared uniform name to the value the runtime
//! must bind. Entries are appended as each declaration section of the effect
//! document is planned, so table order mirrors document order. Backed by a
//! plain vector: the tables are small and insertion order is part of the
//! output contract.

use glam::{Vec2, Vec3};

use crate::material::{Color, TextureReference};

/// Value bound to a generated uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Bound by the caller at draw time (transforms, eye position).
    CallerSupplied,
    /// Constant color from a material property or a light.
    Color(Color),
    /// Constant scalar from a material property.
    Scalar(f32),
    /// Parallax/relief scale pair.
    Pair(Vec2),
    /// World-space light direction.
    Direction(Vec3),
    /// Texture reference to bind to the matching sampler.
    Texture(TextureReference),
}

/// Ordered uniform-name → value mapping for one generated effect.
///
/// After assembly the key set equals exactly the set of non-built-in uniform
/// names referenced by the generated document: no orphan declarations, no
/// undeclared references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    entries: Vec<(String, ParameterValue)>,
}

impl ParameterTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, or replaces the value if the name already exists
    /// (keeping its original position).
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Looks up a value by uniform name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Whether the table contains the uniform name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Uniform names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut table = ParameterTable::new();
        table.insert("World", ParameterValue::CallerSupplied);
        table.insert("SpecularPower", ParameterValue::Scalar(32.0));
        table.insert("SunColor", ParameterValue::Color(Color::Rgb(Vec3::ONE)));

        let names: Vec<_> = table.names().collect();
        assert_eq!(names, ["World", "SpecularPower", "SunColor"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut table = ParameterTable::new();
        table.insert("Opacity", ParameterValue::Scalar(1.0));
        table.insert("World", ParameterValue::CallerSupplied);
        table.insert("Opacity", ParameterValue::Scalar(0.5));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Opacity"), Some(&ParameterValue::Scalar(0.5)));
        assert_eq!(table.names().next(), Some("Opacity"));
    }
}
