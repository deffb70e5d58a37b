//! Decides how members and methods of captured values are referenced.

use crate::ir::{MemberRef, MethodRef, TypeRef};
use crate::traits::{AnnotationLookup, ContextAnnotation, MemberReplacement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `this.label`
    AsThis,
    /// Bare `label`.
    AsGlobalLabel,
    /// Not a property path: the captured value itself is serialized.
    AsCapturedLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub mode: RenderMode,
}

pub struct ContextResolver<'a> {
    annotations: &'a dyn AnnotationLookup,
    replacement: Option<&'a MemberReplacement>,
}

impl<'a> ContextResolver<'a> {
    pub fn new(
        annotations: &'a dyn AnnotationLookup,
        replacement: Option<&'a MemberReplacement>,
    ) -> Self {
        Self {
            annotations,
            replacement,
        }
    }

    /// The rendered name of `member`: the replacement hook's result, or the
    /// declared name.
    pub fn label(&self, member: &MemberRef, simple_member: bool) -> String {
        match self.replacement {
            Some(replace) => replace(member, simple_member),
            None => member.name.clone(),
        }
    }

    /// Resolve a member read on a captured instance of `instance_type`.
    pub fn resolve_member(
        &self,
        member: &MemberRef,
        instance_type: &TypeRef,
        simple_member: bool,
    ) -> Resolution {
        let label = self.label(member, simple_member);
        if self.annotations.type_annotation(instance_type) == Some(ContextAnnotation::This) {
            return Resolution {
                label,
                mode: RenderMode::AsThis,
            };
        }
        match self.annotations.member_annotation(member) {
            Some(ContextAnnotation::OnThis) => Resolution {
                label,
                mode: RenderMode::AsThis,
            },
            // Globals keep their declared name; the hook's label is dropped.
            Some(_) => Resolution {
                label: member.name.clone(),
                mode: RenderMode::AsGlobalLabel,
            },
            None => Resolution {
                label,
                mode: RenderMode::AsCapturedLiteral,
            },
        }
    }

    /// Resolve a method call. `None` means the method has no annotated
    /// rendering and the caller must fall back to a property-path call.
    pub fn resolve_method(
        &self,
        method: &MethodRef,
        instance_type: Option<&TypeRef>,
    ) -> Option<RenderMode> {
        if instance_type.and_then(|ty| self.annotations.type_annotation(ty))
            == Some(ContextAnnotation::This)
        {
            return Some(RenderMode::AsThis);
        }
        self.annotations
            .method_annotation(method)
            .map(|annotation| match annotation {
                ContextAnnotation::OnThis => RenderMode::AsThis,
                _ => RenderMode::AsGlobalLabel,
            })
    }
}
