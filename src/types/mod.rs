pub mod directive;
pub mod span;
