//! Identities of host types, members and methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A host type, identified by name.
///
/// Generic definitions may carry an arity suffix (``List`1``); it is
/// stripped by [`TypeRef::display_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name without a generic arity suffix.
    pub fn display_name(&self) -> &str {
        match self.name.find('`') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    #[default]
    Property,
}

/// A declared field or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    pub declaring_type: TypeRef,
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
}

impl MemberRef {
    pub fn property(declaring_type: TypeRef, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            kind: MemberKind::Property,
        }
    }

    pub fn field(declaring_type: TypeRef, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            kind: MemberKind::Field,
        }
    }

    /// `Type.name`, the key used by annotation tables.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type.name, self.name)
    }
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub declaring_type: TypeRef,
    pub name: String,
}

impl MethodRef {
    pub fn new(declaring_type: TypeRef, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type.name, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_generic_arity() {
        assert_eq!(TypeRef::new("List`1").display_name(), "List");
        assert_eq!(TypeRef::new("Dictionary`2").display_name(), "Dictionary");
        assert_eq!(TypeRef::new("Point").display_name(), "Point");
    }

    #[test]
    fn test_qualified_names() {
        let ty = TypeRef::new("Page");
        assert_eq!(MemberRef::field(ty.clone(), "title").qualified_name(), "Page.title");
        assert_eq!(MethodRef::new(ty, "render").qualified_name(), "Page.render");
    }
}
