//! Map-backed annotation metadata.
//!
//! Declarations are keyed by name: types by their type name, members and
//! methods by `Type.name`.
//!
//! ```toml
//! [annotations.types]
//! Page = "this"
//!
//! [annotations.members]
//! "Helpers.version" = "global"
//! "Widget.title" = "on-this"
//!
//! [annotations.methods]
//! "Helpers.format" = "global"
//! ```

use crate::ir::{MemberRef, MethodRef, TypeRef};
use crate::traits::{AnnotationLookup, ContextAnnotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AnnotationTable {
    /// Type name -> annotation.
    pub types: HashMap<String, ContextAnnotation>,
    /// `Type.member` -> annotation.
    pub members: HashMap<String, ContextAnnotation>,
    /// `Type.method` -> annotation.
    pub methods: HashMap<String, ContextAnnotation>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotate_type(mut self, ty: &TypeRef, annotation: ContextAnnotation) -> Self {
        self.types.insert(ty.name.clone(), annotation);
        self
    }

    pub fn annotate_member(mut self, member: &MemberRef, annotation: ContextAnnotation) -> Self {
        self.members.insert(member.qualified_name(), annotation);
        self
    }

    pub fn annotate_method(mut self, method: &MethodRef, annotation: ContextAnnotation) -> Self {
        self.methods.insert(method.qualified_name(), annotation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.members.is_empty() && self.methods.is_empty()
    }
}

impl AnnotationLookup for AnnotationTable {
    fn type_annotation(&self, ty: &TypeRef) -> Option<ContextAnnotation> {
        self.types.get(&ty.name).copied()
    }

    fn member_annotation(&self, member: &MemberRef) -> Option<ContextAnnotation> {
        self.members.get(&member.qualified_name()).copied()
    }

    fn method_annotation(&self, method: &MethodRef) -> Option<ContextAnnotation> {
        self.methods.get(&method.qualified_name()).copied()
    }
}
