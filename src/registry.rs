//! Conformance verification and the per-type protocol record.
//!
//! State lives in an explicit registry keyed by `TypeId`; candidate types are
//! never mutated. The registry's only write path is a successful
//! verification, so a protocol name can appear in a record only after the
//! subset check passed for that pair.

use crate::conformance::check;
use crate::core::errors::Result;
use crate::protocol::ProtocolSpec;
use crate::surface::{extract, Describe};
use im::{HashMap, OrdSet};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;

/// Commit policy for multi-protocol batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Check every protocol first; commit nothing unless all pass.
    #[default]
    Atomic,
    /// Commit each success immediately. A batch failing on its k-th check
    /// leaves the earlier successes recorded.
    PerProtocol,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    qualified_name: String,
    protocols: OrdSet<String>,
}

/// Registry mapping type identity to the accumulated set of satisfied
/// protocol names.
#[derive(Debug, Default)]
pub struct ConformanceRegistry {
    entries: RwLock<HashMap<TypeId, TypeEntry>>,
}

static GLOBAL: Lazy<ConformanceRegistry> = Lazy::new(ConformanceRegistry::default);

impl ConformanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry behind the module-level entry points.
    pub fn global() -> &'static ConformanceRegistry {
        &GLOBAL
    }

    /// Verify a candidate against one or more protocols with the default
    /// atomic commit policy.
    pub fn verify_and_register<T: Describe + 'static>(
        &self,
        protocols: &[&ProtocolSpec],
    ) -> Result<()> {
        self.verify_and_register_with::<T>(protocols, BatchMode::default())
    }

    /// Verify a candidate against one or more protocols.
    ///
    /// Protocols are checked in reverse declaration order, each against the
    /// same candidate surface, computed once. A failed check never removes
    /// anything already recorded; what a failed *batch* leaves behind is
    /// governed by `mode`. Re-verifying an already-satisfied pair succeeds
    /// and leaves the record unchanged.
    pub fn verify_and_register_with<T: Describe + 'static>(
        &self,
        protocols: &[&ProtocolSpec],
        mode: BatchMode,
    ) -> Result<()> {
        let candidate = T::qualified_name();
        let provided = extract(&T::member_listing());
        log::debug!(
            "verifying {candidate} against {} protocol(s), {} provided units",
            protocols.len(),
            provided.len()
        );

        match mode {
            BatchMode::Atomic => {
                for protocol in protocols.iter().rev() {
                    check(candidate, &provided, protocol)?;
                }
                let names: Vec<&str> = protocols.iter().map(|p| p.qualified_name()).collect();
                self.commit(TypeId::of::<T>(), candidate, &names);
            }
            BatchMode::PerProtocol => {
                for protocol in protocols.iter().rev() {
                    check(candidate, &provided, protocol)?;
                    self.commit(TypeId::of::<T>(), candidate, &[protocol.qualified_name()]);
                }
            }
        }
        Ok(())
    }

    /// Record satisfied protocols for a type. Single write-lock acquisition,
    /// so concurrent verifications of the same type cannot lose updates.
    fn commit(&self, key: TypeId, qualified_name: &str, protocol_names: &[&str]) {
        let mut entries = self.entries.write();
        let mut entry = entries.get(&key).cloned().unwrap_or_else(|| TypeEntry {
            qualified_name: qualified_name.to_string(),
            protocols: OrdSet::new(),
        });
        for name in protocol_names {
            entry.protocols.insert((*name).to_string());
        }
        log::debug!(
            "{qualified_name} now satisfies {} protocol(s)",
            entry.protocols.len()
        );
        entries.insert(key, entry);
    }

    /// Sorted protocol names the type has been verified to satisfy; empty if
    /// no verification ever succeeded.
    pub fn protocols_implemented<T: 'static>(&self) -> Vec<String> {
        self.protocols_implemented_by_id(TypeId::of::<T>())
    }

    /// Same as [`Self::protocols_implemented`], keyed directly by `TypeId`
    /// for callers that only hold an erased identity.
    pub fn protocols_implemented_by_id(&self, key: TypeId) -> Vec<String> {
        self.entries
            .read()
            .get(&key)
            .map(|entry| entry.protocols.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a specific protocol has been recorded for the type.
    pub fn implements_protocol<T: 'static>(&self, protocol_name: &str) -> bool {
        self.entries
            .read()
            .get(&TypeId::of::<T>())
            .is_some_and(|entry| entry.protocols.contains(protocol_name))
    }

    /// Recorded display name for a type, if any verification succeeded.
    pub fn qualified_name_of(&self, key: TypeId) -> Option<String> {
        self.entries
            .read()
            .get(&key)
            .map(|entry| entry.qualified_name.clone())
    }
}

/// Decorator-equivalent entry point: verify `T` against the given protocols
/// on the process-wide registry and record the successes.
pub fn implements<T: Describe + 'static>(protocols: &[&ProtocolSpec]) -> Result<()> {
    ConformanceRegistry::global().verify_and_register::<T>(protocols)
}

/// Sorted protocol names recorded for `T` on the process-wide registry.
pub fn get_protocols_implemented<T: 'static>() -> Vec<String> {
    ConformanceRegistry::global().protocols_implemented::<T>()
}
