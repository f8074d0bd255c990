//! Schema-file ↔ generated-file pairing.
//!
//! The mapping is supplied by the host (editor configuration); the engine
//! only looks it up. A missing entry is a normal empty result, not an
//! error.

use indexmap::IndexMap;

/// Static mapping from schema file paths to generated file paths.
///
/// Paths are workspace-relative strings; the engine never touches the
/// filesystem itself. Insertion order is preserved so diagnostics listing
/// the map stay stable.
#[derive(Debug, Clone, Default)]
pub struct PairingMap {
    forward: IndexMap<String, String>,
}

impl PairingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema → generated pair.
    pub fn insert(&mut self, schema_path: impl Into<String>, generated_path: impl Into<String>) {
        self.forward.insert(schema_path.into(), generated_path.into());
    }

    /// The generated file for a schema file.
    pub fn generated_for(&self, schema_path: &str) -> Option<&str> {
        self.forward.get(schema_path).map(String::as_str)
    }

    /// The schema file for a generated file (inverse lookup).
    pub fn schema_for(&self, generated_path: &str) -> Option<&str> {
        self.forward
            .iter()
            .find(|(_, generated)| generated.as_str() == generated_path)
            .map(|(schema, _)| schema.as_str())
    }

    /// The partner of a path in either direction.
    pub fn partner_of(&self, path: &str) -> Option<&str> {
        self.generated_for(path).or_else(|| self.schema_for(path))
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }
}

impl<S: Into<String>, G: Into<String>> FromIterator<(S, G)> for PairingMap {
    fn from_iter<T: IntoIterator<Item = (S, G)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (schema, generated) in iter {
            map.insert(schema, generated);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_work_both_ways() {
        let map: PairingMap =
            [("scripts/model/model.proto", "model/model.pb.go")].into_iter().collect();

        assert_eq!(
            map.generated_for("scripts/model/model.proto"),
            Some("model/model.pb.go")
        );
        assert_eq!(
            map.schema_for("model/model.pb.go"),
            Some("scripts/model/model.proto")
        );
        assert_eq!(map.partner_of("model/model.pb.go"), Some("scripts/model/model.proto"));
        assert_eq!(map.partner_of("unmapped.proto"), None);
    }
}
