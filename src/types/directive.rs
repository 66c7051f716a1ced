//! Captured directive records emitted by the scanners.
//!
//! Each record borrows its captured fields from the buffer it was scanned
//! from and carries [`Span`]s pointing back into that buffer for error
//! reporting. Bodies are kept as spans because the same body text is
//! re-expanded multiple times by the loop passes.

use crate::types::span::Span;

/// A mixin reference, e.g. `{#mixin footer}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixinRef<'s> {
    pub name: &'s str,
    /// Span of the name within the buffer.
    pub span: Span,
}

/// A variable reference, e.g. `{ user.name }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRef<'s> {
    pub path: &'s str,
    /// Span of the path within the buffer.
    pub span: Span,
}

/// A conditional block, e.g. `{#if flag} yes {#else} no {/if}`.
///
/// Modeled as a tagged two-branch node: a mandatory condition and `then`
/// span plus an optional `else` span. Chained `else if` branches are not
/// part of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfElse<'s> {
    pub cond: &'s str,
    /// Span of the condition text within the buffer.
    pub cond_span: Span,
    pub then_body: Span,
    pub else_body: Option<Span>,
}

/// Which keyword spelled a collection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    ForEach,
    ForOf,
}

impl LoopKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::ForEach => "forEach",
            Self::ForOf => "forOf",
        }
    }
}

/// A collection loop, e.g. `{#forEach x in items} {- x.n -} {/forEach}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForLoop<'s> {
    pub var: &'s str,
    pub collection: &'s str,
    /// Span of the collection name within the buffer.
    pub collection_span: Span,
    pub body: Span,
}

/// An indexed loop, e.g. `{#arr items x=0<length x++} {- v[x] -} {/arr}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrLoop<'s> {
    pub header: ArrHeader<'s>,
    pub body: Span,
}

/// The parsed header of an indexed loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrHeader<'s> {
    pub collection: &'s str,
    /// Span of the collection name within the buffer.
    pub collection_span: Span,
    pub var: &'s str,
    pub init: Bound,
    pub cmp: Cmp,
    pub target: Bound,
    pub step: Step,
}

/// An initial or target bound: a numeric literal or the `length` keyword,
/// which resolves to the collection's element count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Number(f64),
    Length,
}

/// The loop comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Lt,
    Gt,
    Le,
    Ge,
}

impl Cmp {
    /// Whether `iter <cmp> target` holds. Returns false for NaN operands,
    /// which ends the loop.
    pub fn holds(self, iter: f64, target: f64) -> bool {
        match self {
            Self::Lt => iter < target,
            Self::Gt => iter > target,
            Self::Le => iter <= target,
            Self::Ge => iter >= target,
        }
    }
}

/// The step expression applied to the iterator after each expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Incr,
    Decr,
    Add(f64),
    Sub(f64),
    Mul(f64),
    Div(f64),
}

impl Step {
    pub fn apply(self, iter: f64) -> f64 {
        match self {
            Self::Incr => iter + 1.0,
            Self::Decr => iter - 1.0,
            Self::Add(n) => iter + n,
            Self::Sub(n) => iter - n,
            Self::Mul(n) => iter * n,
            Self::Div(n) => iter / n,
        }
    }
}
