//! Member-surface extraction for dynamically described types.
//!
//! A [`MemberListing`] is the runtime description of a type's members: its
//! own declarations plus an optional parent listing it inherits from.
//! [`extract`] turns a listing into the normalized set of
//! [`SignatureUnit`]s that participates in conformance comparison, applying
//! the process-wide exclusion policy along the way.

use crate::core::{MemberDescriptor, MethodSignature, SignatureUnit};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The two text-conversion members. They are compared only when the subject
/// declares them itself; a stock default installed by the host machinery is
/// treated as absent.
pub const TEXT_CONVERSION_MEMBERS: [&str; 2] = ["display", "debug"];

/// Structural hooks present on every described type regardless of its own
/// capability: the subtype registration hook, the annotation container, the
/// weak-reference slot, and the raw member dictionary.
const STRUCTURAL_HOOKS: [&str; 4] = ["subtype_hook", "annotations", "weak_ref", "member_dict"];

/// Who put a member on the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberOrigin {
    /// Written by the subject's own author.
    Declared,
    /// Stock implementation installed by the host machinery.
    Default,
}

/// What a declared member is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberPayload {
    /// A callable with an inspectable signature.
    Callable(MethodSignature),
    /// A native member whose signature cannot be inspected. Skipped on both
    /// sides of a comparison, which biases toward leniency.
    Opaque,
    /// A plain data attribute.
    Attribute,
}

/// A single member declaration on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    pub payload: MemberPayload,
    pub origin: MemberOrigin,
}

/// Runtime description of a type's member surface: own declarations plus an
/// optional parent chain. Own declarations shadow inherited ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberListing {
    members: Vec<MemberDecl>,
    parent: Option<Box<MemberListing>>,
}

impl MemberListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a callable member.
    pub fn method(self, name: impl Into<String>, signature: MethodSignature) -> Self {
        self.push(name, MemberPayload::Callable(signature), MemberOrigin::Declared)
    }

    /// Record a stock callable installed by the host machinery rather than
    /// written by the subject's author.
    pub fn default_method(self, name: impl Into<String>, signature: MethodSignature) -> Self {
        self.push(name, MemberPayload::Callable(signature), MemberOrigin::Default)
    }

    /// Declare a plain data attribute.
    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.push(name, MemberPayload::Attribute, MemberOrigin::Declared)
    }

    /// Declare a native member with no inspectable signature.
    pub fn opaque(self, name: impl Into<String>) -> Self {
        self.push(name, MemberPayload::Opaque, MemberOrigin::Declared)
    }

    /// Set the parent listing this one inherits from.
    pub fn inherit(mut self, parent: MemberListing) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    fn push(mut self, name: impl Into<String>, payload: MemberPayload, origin: MemberOrigin) -> Self {
        self.members.push(MemberDecl {
            name: name.into(),
            payload,
            origin,
        });
        self
    }

    /// Resolve the full surface: walk the parent chain, letting own
    /// declarations shadow inherited ones of the same name. Later
    /// declarations on the same listing also shadow earlier ones.
    pub fn resolved(&self) -> BTreeMap<&str, &MemberDecl> {
        let mut surface = match &self.parent {
            Some(parent) => parent.resolved(),
            None => BTreeMap::new(),
        };
        for decl in &self.members {
            surface.insert(decl.name.as_str(), decl);
        }
        surface
    }

    /// Names of all resolved members, in lexicographic order.
    pub fn member_names(&self) -> Vec<String> {
        self.resolved().keys().map(|name| name.to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.parent.is_none()
    }
}

/// Seam between compile-time types and the runtime engine: a candidate type
/// describes its own member surface.
pub trait Describe {
    /// Stable identity used in records and error messages.
    fn qualified_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The member surface this type exposes at runtime.
    fn member_listing() -> MemberListing;
}

/// Surface every described type answers through the description machinery
/// itself, independent of its own capability. These members can neither
/// cause nor prevent a conformance match.
fn machinery_listing() -> MemberListing {
    MemberListing::new()
        .method("type_name", MethodSignature::new().receiver().returns("String"))
        .method("type_id", MethodSignature::new().receiver().returns("TypeId"))
        .method(
            "module_path",
            MethodSignature::new().receiver().returns("String"),
        )
        .method("doc", MethodSignature::new().receiver().returns("Option<String>"))
        .method(
            "member_names",
            MethodSignature::new().receiver().returns("Vec<String>"),
        )
        .method(
            "has_member",
            MethodSignature::new()
                .receiver()
                .param("name", "&str")
                .returns("bool"),
        )
}

/// Names excluded from both sides of every comparison, derived once from the
/// machinery surface plus the fixed structural hooks.
static EXCLUSIONS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut names: HashSet<String> = machinery_listing()
        .member_names()
        .into_iter()
        .collect();
    names.extend(STRUCTURAL_HOOKS.iter().map(|hook| hook.to_string()));
    names
});

/// Whether a member name is structurally present on every described type and
/// therefore never meaningful for conformance.
pub fn is_excluded(name: &str) -> bool {
    EXCLUSIONS.contains(name)
}

/// Compute the comparable member surface of a listing.
///
/// Pure function of the listing at call time. Excluded names and opaque
/// members are skipped; `display`/`debug` count only when the subject
/// declares them itself.
pub fn extract(listing: &MemberListing) -> HashSet<SignatureUnit> {
    let mut units = HashSet::new();
    for (name, decl) in listing.resolved() {
        if is_excluded(name) {
            continue;
        }
        if TEXT_CONVERSION_MEMBERS.contains(&name) && decl.origin == MemberOrigin::Default {
            continue;
        }
        match &decl.payload {
            MemberPayload::Callable(signature) => {
                units.insert(SignatureUnit {
                    name: name.to_string(),
                    descriptor: MemberDescriptor::Callable(signature.clone()),
                });
            }
            MemberPayload::Opaque => {
                log::trace!("skipping opaque member `{name}`");
            }
            MemberPayload::Attribute => {
                units.insert(SignatureUnit {
                    name: name.to_string(),
                    descriptor: MemberDescriptor::Attribute,
                });
            }
        }
    }
    units
}
