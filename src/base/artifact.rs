//! Artifact kind detection.

use std::path::Path;

/// File extension of schema artifacts.
pub const PROTO_EXTENSION: &str = "proto";

/// File extension of generated-code artifacts.
pub const GO_EXTENSION: &str = "go";

/// Which grammar (and walker) a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A Protocol Buffers schema (`.proto`).
    Proto,
    /// Go source generated from a schema (`.pb.go` or plain `.go`).
    Go,
}

impl ArtifactKind {
    /// Detect the artifact kind from a file path. Unknown extensions are
    /// `None`; the caller reports "no correspondence available".
    pub fn from_path(path: &str) -> Option<Self> {
        match Path::new(path).extension()?.to_str()? {
            PROTO_EXTENSION => Some(Self::Proto),
            GO_EXTENSION => Some(Self::Go),
            _ => None,
        }
    }

    /// The kind on the other side of a pairing.
    pub fn partner(self) -> Self {
        match self {
            Self::Proto => Self::Go,
            Self::Go => Self::Proto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension() {
        assert_eq!(
            ArtifactKind::from_path("scripts/model/model.proto"),
            Some(ArtifactKind::Proto)
        );
        assert_eq!(
            ArtifactKind::from_path("model/model.pb.go"),
            Some(ArtifactKind::Go)
        );
        assert_eq!(ArtifactKind::from_path("README.md"), None);
        assert_eq!(ArtifactKind::from_path("noextension"), None);
    }

    #[test]
    fn partner_is_involution() {
        assert_eq!(ArtifactKind::Proto.partner(), ArtifactKind::Go);
        assert_eq!(ArtifactKind::Go.partner().partner(), ArtifactKind::Go);
    }
}
