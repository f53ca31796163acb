//! The subset decision at the heart of verification.

use crate::core::errors::{Error, Result};
use crate::core::SignatureUnit;
use crate::protocol::ProtocolSpec;
use std::collections::HashSet;

/// Units required but not provided, sorted by member name for stable
/// reporting.
pub fn missing_members(
    required: &HashSet<SignatureUnit>,
    provided: &HashSet<SignatureUnit>,
) -> Vec<SignatureUnit> {
    let mut missing: Vec<SignatureUnit> = required
        .iter()
        .filter(|unit| !provided.contains(unit))
        .cloned()
        .collect();
    missing.sort();
    missing
}

/// Decide whether a candidate surface covers a protocol's required surface.
///
/// Pure: no registry state is touched here. An empty required surface passes
/// against anything, so a protocol declaring no non-excluded members is
/// satisfied trivially.
pub fn check(
    candidate: &str,
    provided: &HashSet<SignatureUnit>,
    protocol: &ProtocolSpec,
) -> Result<()> {
    let required = protocol.required_surface();
    let missing = missing_members(&required, provided);
    if missing.is_empty() {
        log::debug!(
            "{candidate} satisfies {} ({} required units)",
            protocol.qualified_name(),
            required.len()
        );
        Ok(())
    } else {
        log::debug!(
            "{candidate} fails {}: {} of {} required units missing",
            protocol.qualified_name(),
            missing.len(),
            required.len()
        );
        Err(Error::missing_members(protocol.qualified_name(), missing))
    }
}
