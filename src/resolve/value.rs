//! Resolving references against the context and rendering values as text.

use crate::types::span::Span;
use crate::{Error, Result, Value};

impl Value {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Mixin(_) => "mixin",
        }
    }

    /// Truthiness for bare conditions. Zero, the empty string, and none are
    /// falsy; lists, maps, and mixins are always truthy.
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Mixin(_) => true,
        }
    }
}

/// Resolve a dot notation path against the context.
///
/// `span` must be the span of `path` within `source`; per segment spans are
/// derived from it so errors underline the failing segment.
pub fn lookup_path<'a>(source: &str, span: Span, ctx: &'a Value, path: &str) -> Result<&'a Value> {
    let mut value = ctx;
    let mut offset = 0;
    for segment in path.split('.') {
        let start = span.start + offset;
        value = lookup(source, Span::from(start..start + segment.len()), value, segment)?;
        offset += segment.len() + 1;
    }
    Ok(value)
}

/// Resolve a single path segment against a value.
pub(crate) fn lookup<'a>(
    source: &str,
    span: Span,
    value: &'a Value,
    segment: &str,
) -> Result<&'a Value> {
    match value {
        Value::List(list) => match segment.parse::<usize>() {
            Ok(i) => list
                .get(i)
                .ok_or_else(|| Error::span("index out of bounds", source, span)),
            Err(_) => Err(Error::span("cannot index list with string", source, span)),
        },
        Value::Map(map) => map
            .get(segment)
            .ok_or_else(|| Error::span("not found in this context", source, span)),
        value => Err(Error::span(
            format!("cannot index into {}", value.human()),
            source,
            span,
        )),
    }
}

/// Append the text form of `value` to `out`.
///
/// `None` renders as the empty string and scalars use their display form.
/// Lists, maps, and mixins have no text form and raise an error.
pub fn write_value(out: &mut String, source: &str, span: Span, value: &Value) -> Result<()> {
    match value {
        Value::None => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        value => {
            return Err(Error::span(
                format!(
                    "expected renderable value, but reference resolved to {}",
                    value.human()
                ),
                source,
                span,
            ));
        }
    }
    Ok(())
}
