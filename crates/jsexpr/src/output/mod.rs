//! JavaScript emission.

pub mod context;
pub mod javascript;
pub mod literal;

pub use context::{ContextResolver, RenderMode, Resolution};
pub use javascript::{Translator, binary_symbol};
pub use literal::{instant_to_binary, serialize};
