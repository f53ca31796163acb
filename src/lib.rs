// Export modules for library usage
pub mod conformance;
pub mod core;
pub mod parse;
pub mod protocol;
pub mod registry;
pub mod surface;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result};
pub use crate::core::{
    normalize_annotation, MemberDescriptor, MethodSignature, Param, ParamKind, SignatureUnit,
};

pub use crate::surface::{
    extract, is_excluded, Describe, MemberDecl, MemberListing, MemberOrigin, MemberPayload,
    TEXT_CONVERSION_MEMBERS,
};

pub use crate::conformance::{check, missing_members};

pub use crate::protocol::{ProtocolBuilder, ProtocolSpec};

pub use crate::registry::{
    get_protocols_implemented, implements, BatchMode, ConformanceRegistry,
};

pub use crate::parse::{parse_trait, parse_trait_in_module};
