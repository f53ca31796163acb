//! Shared error types for conformance verification

use crate::core::SignatureUnit;
use thiserror::Error;

/// Main error type for traitmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A protocol's required surface is not fully covered by the candidate.
    /// Carries the exact missing units, sorted by member name.
    #[error("{protocol} requires implementation of {}", render_units(.missing))]
    MissingMembers {
        protocol: String,
        missing: Vec<SignatureUnit>,
    },

    /// Protocol source text could not be parsed.
    #[error("invalid protocol source: {0}")]
    ProtocolSource(#[from] syn::Error),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a `MissingMembers` error with the units sorted for stable output.
    pub fn missing_members(protocol: impl Into<String>, mut missing: Vec<SignatureUnit>) -> Self {
        missing.sort();
        Self::MissingMembers {
            protocol: protocol.into(),
            missing,
        }
    }

    /// The units a failed verification reported as missing, if any.
    pub fn missing_units(&self) -> &[SignatureUnit] {
        match self {
            Self::MissingMembers { missing, .. } => missing,
            _ => &[],
        }
    }
}

fn render_units(units: &[SignatureUnit]) -> String {
    let rendered: Vec<String> = units.iter().map(|u| format!("`{u}`")).collect();
    format!("[{}]", rendered.join(", "))
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MethodSignature;

    #[test]
    fn missing_members_message_names_each_unit() {
        let err = Error::missing_members(
            "printer::Printable",
            vec![SignatureUnit::callable(
                "to_string",
                MethodSignature::new().receiver().returns("String"),
            )],
        );
        let message = err.to_string();
        assert!(message.starts_with("printer::Printable requires implementation of"));
        assert!(message.contains("to_string: fn(self) -> String"));
    }

    #[test]
    fn missing_units_are_sorted_by_name() {
        let err = Error::missing_members(
            "p::P",
            vec![
                SignatureUnit::attribute("zeta"),
                SignatureUnit::attribute("alpha"),
            ],
        );
        let names: Vec<&str> = err.missing_units().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
