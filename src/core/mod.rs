pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamKind {
    /// The subject itself (`self` in method position).
    Receiver,
    /// An ordinary named parameter.
    Positional,
    /// A trailing catch-all parameter.
    Variadic,
}

/// A single parameter in a normalized callable signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    /// Normalized type annotation, when one is declared.
    pub annotation: Option<String>,
    /// Default value expression, when the member accepts one.
    pub default: Option<String>,
}

/// Normalized shape of a callable member: ordered parameters plus an optional
/// return annotation. Two signatures are interchangeable iff they are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    pub params: Vec<Param>,
    pub returns: Option<String>,
}

impl MethodSignature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the receiver parameter.
    pub fn receiver(mut self) -> Self {
        self.params.push(Param {
            name: "self".to_string(),
            kind: ParamKind::Receiver,
            annotation: None,
            default: None,
        });
        self
    }

    /// Add a required named parameter with a type annotation.
    pub fn param(mut self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind: ParamKind::Positional,
            annotation: Some(normalize_annotation(&annotation.into())),
            default: None,
        });
        self
    }

    /// Add a named parameter carrying a default value.
    pub fn defaulted(
        mut self,
        name: impl Into<String>,
        annotation: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind: ParamKind::Positional,
            annotation: Some(normalize_annotation(&annotation.into())),
            default: Some(default.into()),
        });
        self
    }

    /// Add a trailing variadic parameter.
    pub fn variadic(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind: ParamKind::Variadic,
            annotation: None,
            default: None,
        });
        self
    }

    /// Set the return annotation.
    pub fn returns(mut self, annotation: impl Into<String>) -> Self {
        self.returns = Some(normalize_annotation(&annotation.into()));
        self
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match param.kind {
                ParamKind::Receiver => write!(f, "self")?,
                ParamKind::Positional => {
                    write!(f, "{}", param.name)?;
                    if let Some(annotation) = &param.annotation {
                        write!(f, ": {annotation}")?;
                    }
                    if let Some(default) = &param.default {
                        write!(f, " = {default}")?;
                    }
                }
                ParamKind::Variadic => write!(f, "...{}", param.name)?,
            }
        }
        write!(f, ")")?;
        if let Some(returns) = &self.returns {
            write!(f, " -> {returns}")?;
        }
        Ok(())
    }
}

/// Descriptor half of a signature unit: either a callable's normalized shape
/// or the sentinel marking a plain data attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberDescriptor {
    Callable(MethodSignature),
    Attribute,
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberDescriptor::Callable(sig) => write!(f, "{sig}"),
            MemberDescriptor::Attribute => write!(f, "attribute"),
        }
    }
}

/// One comparable unit of a member surface: `(name, descriptor)`.
///
/// A member with the same name but a different descriptor is a different
/// unit, so a name-only match never satisfies a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureUnit {
    pub name: String,
    pub descriptor: MemberDescriptor,
}

impl SignatureUnit {
    pub fn callable(name: impl Into<String>, signature: MethodSignature) -> Self {
        Self {
            name: name.into(),
            descriptor: MemberDescriptor::Callable(signature),
        }
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: MemberDescriptor::Attribute,
        }
    }
}

impl fmt::Display for SignatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.descriptor)
    }
}

/// Normalize a type annotation so that authored strings and token-printed
/// strings compare equal. Whitespace survives only between two identifier
/// characters (`dyn Fn`, `&'a str`), never around punctuation.
pub fn normalize_annotation(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for piece in raw.split_whitespace() {
        if let (Some(prev), Some(next)) = (out.chars().last(), piece.chars().next()) {
            if is_ident_char(prev) && is_ident_char(next) {
                out.push(' ');
            }
        }
        out.push_str(piece);
    }
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
