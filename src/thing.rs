//! Core entity model: typed IDs and the four Thing variants.
//!
//! Every addressable graph entity is a [`Thing`] — a Resource, Literal,
//! Predicate, or Class — identified by a [`ThingId`] that is unique across
//! all four namespaces. The sum type with exhaustive matching replaces the
//! dynamic-dispatch polymorphism of classic OO designs: consumers cannot
//! forget a variant.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Maximum accepted label length, in characters.
pub const MAX_LABEL_LENGTH: usize = 8164;

/// Opaque identifier for a [`Thing`], unique across all four namespaces.
///
/// Allocated IDs follow the `R…`/`L…`/`P…`/`C…` prefix convention, but
/// well-known vocabulary entries use stable names like `hasAuthors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ThingId(String);

impl ThingId {
    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of an allocated ID (`R123` → `123`), if any.
    ///
    /// Used as a deterministic tie-break when ordering by timestamp.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits: String = self.0.chars().skip_while(|c| !c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

impl From<&str> for ThingId {
    fn from(raw: &str) -> Self {
        ThingId(raw.to_owned())
    }
}

impl From<String> for ThingId {
    fn from(raw: String) -> Self {
        ThingId(raw)
    }
}

impl std::fmt::Display for ThingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name(raw.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id! {
    /// Identifier of the contributor responsible for a mutation.
    ContributorId
}

opaque_id! {
    /// Identifier of an observatory curating a resource.
    ObservatoryId
}

opaque_id! {
    /// Identifier of an organization curating a resource.
    OrganizationId
}

impl ContributorId {
    /// Placeholder used when no contributor information is available.
    pub fn unknown() -> Self {
        ContributorId("00000000-0000-0000-0000-000000000000".into())
    }
}

/// Listing visibility of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Default,
    Featured,
    Unlisted,
    /// Soft-deleted; excluded from all default listings.
    Deleted,
}

/// How the content of a resource was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExtractionMethod {
    #[default]
    Unknown,
    Manual,
    Automatic,
}

/// A graph node carrying a mutable class set.
///
/// The class set determines the polymorphic role of the resource: a Resource
/// tagged `Comparison` behaves as a comparison, and mutating the set is how
/// the same physical node transitions between content-type roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ThingId,
    pub label: String,
    pub classes: BTreeSet<ThingId>,
    pub created_by: ContributorId,
    /// Milliseconds since the UNIX epoch.
    pub created_at: u64,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub visibility: Visibility,
    pub verified: Option<bool>,
}

impl Resource {
    /// Whether this resource carries the given class.
    pub fn is_a(&self, class: &ThingId) -> bool {
        self.classes.contains(class)
    }
}

/// A terminal value node. Never updated in place by workflows; replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub id: ThingId,
    pub label: String,
    /// XSD datatype, defaults to `xsd:string`.
    pub datatype: String,
    pub created_by: ContributorId,
    pub created_at: u64,
}

/// Default literal datatype.
pub const XSD_STRING: &str = "xsd:string";

/// Boolean literal datatype.
pub const XSD_BOOLEAN: &str = "xsd:boolean";

/// Edge-type vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub id: ThingId,
    pub label: String,
    pub created_by: ContributorId,
    pub created_at: u64,
}

/// Taxonomy entry, optionally linked to an external ontology term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ThingId,
    pub label: String,
    /// External ontology URI; at most one Class may hold a given URI.
    pub uri: Option<String>,
    pub created_by: ContributorId,
    pub created_at: u64,
}

/// Any addressable graph entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thing {
    Resource(Resource),
    Literal(Literal),
    Predicate(Predicate),
    Class(Class),
}

impl Thing {
    pub fn id(&self) -> &ThingId {
        match self {
            Thing::Resource(r) => &r.id,
            Thing::Literal(l) => &l.id,
            Thing::Predicate(p) => &p.id,
            Thing::Class(c) => &c.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Thing::Resource(r) => &r.label,
            Thing::Literal(l) => &l.label,
            Thing::Predicate(p) => &p.label,
            Thing::Class(c) => &c.label,
        }
    }

    pub fn created_at(&self) -> u64 {
        match self {
            Thing::Resource(r) => r.created_at,
            Thing::Literal(l) => l.created_at,
            Thing::Predicate(p) => p.created_at,
            Thing::Class(c) => c.created_at,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Thing::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Thing::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Thing::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Thing::Predicate(_))
    }
}

/// Validate a label against the store-level invariants.
pub fn validate_label(label: &str) -> Result<(), GraphError> {
    if label.trim().is_empty() {
        return Err(GraphError::InvalidLabel {
            reason: "label must not be blank".into(),
        });
    }
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(GraphError::InvalidLabel {
            reason: format!("label exceeds {MAX_LABEL_LENGTH} characters"),
        });
    }
    Ok(())
}

/// Current time in milliseconds since the UNIX epoch.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
