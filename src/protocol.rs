//! Capability protocol descriptions.

use crate::core::{MethodSignature, SignatureUnit};
use crate::surface::{extract, MemberListing};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A capability protocol: the member surface a candidate type may be checked
/// against, identified by its fully qualified name. Protocols are not
/// versioned; identity is the name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSpec {
    qualified_name: String,
    listing: MemberListing,
}

impl ProtocolSpec {
    pub fn new(qualified_name: impl Into<String>, listing: MemberListing) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            listing,
        }
    }

    pub fn builder(qualified_name: impl Into<String>) -> ProtocolBuilder {
        ProtocolBuilder {
            qualified_name: qualified_name.into(),
            listing: MemberListing::new(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn listing(&self) -> &MemberListing {
        &self.listing
    }

    /// The normalized surface a candidate must cover.
    pub fn required_surface(&self) -> HashSet<SignatureUnit> {
        extract(&self.listing)
    }
}

/// Builder for [`ProtocolSpec`].
#[derive(Debug, Clone)]
pub struct ProtocolBuilder {
    qualified_name: String,
    listing: MemberListing,
}

impl ProtocolBuilder {
    /// Require a callable member.
    pub fn method(mut self, name: impl Into<String>, signature: MethodSignature) -> Self {
        self.listing = self.listing.method(name, signature);
        self
    }

    /// Require a plain data attribute.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.listing = self.listing.attribute(name);
        self
    }

    /// Extend another protocol: its members are required here too, with this
    /// protocol's own declarations shadowing same-named ones.
    pub fn extends(mut self, parent: &ProtocolSpec) -> Self {
        self.listing = self.listing.inherit(parent.listing.clone());
        self
    }

    pub fn build(self) -> ProtocolSpec {
        ProtocolSpec {
            qualified_name: self.qualified_name,
            listing: self.listing,
        }
    }
}
