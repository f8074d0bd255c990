//! Cross-artifact go-to-definition.

use tracing::debug;

use crate::base::{ArtifactKind, PairingMap, Position, Span};
use crate::walk::Artifact;

/// Result of a correspondence request.
#[derive(Clone, Debug)]
pub struct GotoResult {
    /// The targets to jump to. At most one in current behavior.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no correspondence found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location in the partner artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// Path of the partner artifact, as recorded in the pairing map.
    pub path: String,
    /// Span of the matched entity's declared name.
    pub span: Span,
}

/// The correspondence coordinator.
///
/// Owns no grammar knowledge: it detects the artifact kind from the path,
/// asks one walker for an address and the other to resolve it. Partner
/// text comes from the caller-supplied `fetch` closure so the engine
/// stays free of I/O.
#[derive(Debug, Default)]
pub struct Navigator {
    pairing: PairingMap,
}

impl Navigator {
    pub fn new(pairing: PairingMap) -> Self {
        Self { pairing }
    }

    pub fn pairing(&self) -> &PairingMap {
        &self.pairing
    }

    /// Find the partner-artifact location corresponding to `position` in
    /// the document at `path`. Every failure mode degrades to an empty
    /// result; nothing here returns an error to the caller.
    pub fn goto_partner(
        &self,
        path: &str,
        text: &str,
        position: Position,
        fetch: impl FnOnce(&str) -> Option<String>,
    ) -> GotoResult {
        let Some(kind) = ArtifactKind::from_path(path) else {
            debug!(path, "not a recognized artifact kind");
            return GotoResult::empty();
        };

        let source = Artifact::parse(kind, text);
        if source.error_count() > 0 {
            debug!(path, errors = source.error_count(), "source parse recovered");
        }
        let Some(address) = source.compute_address(position) else {
            // cursor was not on a supported identifier; expected, frequent
            return GotoResult::empty();
        };
        debug!(%address, "computed address");

        let Some(partner_path) = self.pairing.partner_of(path) else {
            debug!(path, "no partner mapping configured");
            return GotoResult::empty();
        };
        let Some(partner_text) = fetch(partner_path) else {
            debug!(partner_path, "partner text unavailable");
            return GotoResult::empty();
        };

        let partner = Artifact::parse(kind.partner(), &partner_text);
        if partner.error_count() > 0 {
            debug!(
                partner_path,
                errors = partner.error_count(),
                "partner parse recovered"
            );
        }
        match partner.resolve(&address) {
            Some(span) => GotoResult::single(GotoTarget {
                path: partner_path.to_string(),
                span,
            }),
            None => {
                debug!(%address, partner_path, "address did not resolve");
                GotoResult::empty()
            }
        }
    }
}
