//! The directive resolution pipeline.
//!
//! Stages run exactly once per instantiation, in a fixed order, each making
//! a single left to right pass over the entire current buffer. A stage never
//! rescans text it produced itself, so directive text introduced by a
//! substitution is only seen by later stages. The ordering is load bearing:
//! mixin bodies are inlined before variables resolve, and conditions are
//! settled before any loop body is expanded.

mod cond;
mod iter;
mod range;
pub(crate) mod value;

use crate::scan;
use crate::types::directive::LoopKind;
use crate::{Error, Options, Result, Value};

pub(crate) fn pipeline(body: &str, ctx: &Value, options: Options) -> Result<String> {
    let stage = strip_comments(body);
    let stage = inline_mixins(&stage, ctx)?;
    let stage = interpolate(&stage, ctx)?;
    let stage = conditionals(&stage, ctx);
    let stage = loops(&stage, ctx, LoopKind::ForEach)?;
    let stage = loops(&stage, ctx, LoopKind::ForOf)?;
    let stage = indexed(&stage, ctx)?;
    Ok(if options.strip_whitespace {
        stage.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        stage
    })
}

/// Remove `/* … */` comments. An unclosed comment is left verbatim.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some(offset) = source[i..].find("/*") {
        let at = i + offset;
        match source[at + 2..].find("*/") {
            Some(end) => {
                out.push_str(&source[i..at]);
                i = at + 2 + end + 2;
            }
            None => break,
        }
    }
    out.push_str(&source[i..]);
    out
}

/// Replace each mixin directive with the referenced mixin's body. The body
/// is not rescanned for mixins, but its other directives are resolved by
/// the later stages.
fn inline_mixins(source: &str, ctx: &Value) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some((span, mixin)) = scan::next_mixin(source, i) {
        out.push_str(&source[i..span.start]);
        let mixins = value::lookup(source, mixin.span, ctx, "mixins")?;
        match value::lookup(source, mixin.span, mixins, mixin.name)? {
            Value::Mixin(m) => out.push_str(m.body()),
            value => {
                return Err(Error::span(
                    format!("expected mixin, found {}", value.human()),
                    source,
                    mixin.span,
                ));
            }
        }
        i = span.end;
    }
    out.push_str(&source[i..]);
    Ok(out)
}

fn interpolate(source: &str, ctx: &Value) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some((span, var)) = scan::next_var(source, i) {
        out.push_str(&source[i..span.start]);
        let value = value::lookup_path(source, var.span, ctx, var.path)?;
        value::write_value(&mut out, source, var.span, value)?;
        i = span.end;
    }
    out.push_str(&source[i..]);
    Ok(out)
}

/// Keep exactly one branch of each conditional block. This stage is
/// infallible: a condition that does not match the grammar leaves the whole
/// block verbatim, and a missing identifier is simply falsy.
fn conditionals(source: &str, ctx: &Value) -> String {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some((span, node)) = scan::next_if(source, i) {
        out.push_str(&source[i..span.start]);
        match cond::parse(node.cond) {
            Some(condition) => {
                if cond::eval(&condition, ctx) {
                    out.push_str(&source[node.then_body]);
                } else if let Some(body) = node.else_body {
                    out.push_str(&source[body]);
                }
            }
            None => out.push_str(&source[span]),
        }
        i = span.end;
    }
    out.push_str(&source[i..]);
    out
}

fn loops(source: &str, ctx: &Value, kind: LoopKind) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some((span, node)) = scan::next_for(source, i, kind) {
        out.push_str(&source[i..span.start]);
        iter::expand(&mut out, source, &node, ctx)?;
        i = span.end;
    }
    out.push_str(&source[i..]);
    Ok(out)
}

fn indexed(source: &str, ctx: &Value) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while let Some((span, node)) = scan::next_arr(source, i) {
        out.push_str(&source[i..span.start]);
        range::expand(&mut out, source, &node, ctx)?;
        i = span.end;
    }
    out.push_str(&source[i..]);
    Ok(out)
}
