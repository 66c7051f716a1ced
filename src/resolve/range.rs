//! Expansion of indexed loops.

use crate::resolve::value::{lookup_path, write_value};
use crate::scan;
use crate::types::directive::{ArrLoop, Bound};
use crate::types::span::Span;
use crate::{Error, Result, Value};

/// Hard ceiling on the number of expansions of a single loop. A step that
/// never converges on the target stops here instead of hanging the caller.
pub(crate) const MAX_ITERATIONS: usize = 10_000;

pub fn expand(out: &mut String, source: &str, node: &ArrLoop<'_>, ctx: &Value) -> Result<()> {
    let header = &node.header;
    let collection = lookup_path(source, header.collection_span, ctx, header.collection)?;
    let init = bound(source, header.collection_span, header.init, collection)?;
    let target = bound(source, header.collection_span, header.target, collection)?;

    let mut iter = init;
    for _ in 0..MAX_ITERATIONS {
        if !header.cmp.holds(iter, target) {
            break;
        }
        expand_body(out, source, node, collection, iter)?;
        iter = header.step.apply(iter);
    }
    Ok(())
}

fn bound(source: &str, span: Span, bound: Bound, collection: &Value) -> Result<f64> {
    match bound {
        Bound::Number(n) => Ok(n),
        Bound::Length => match collection {
            Value::List(list) => Ok(list.len() as f64),
            Value::Map(map) => Ok(map.len() as f64),
            value => Err(Error::span(
                format!("cannot take the length of {}", value.human()),
                source,
                span,
            )),
        },
    }
}

fn expand_body(
    out: &mut String,
    source: &str,
    node: &ArrLoop<'_>,
    collection: &Value,
    iter: f64,
) -> Result<()> {
    let mut i = node.body.start;
    while let Some((span, content)) = scan::next_placeholder(source, i, node.body.end) {
        out.push_str(&source[i..span.start]);
        if indexed(content, node.header.var) {
            let element = element_at(source, span, collection, iter)?;
            write_value(out, source, span, element)?;
        } else {
            out.push_str(&source[span]);
        }
        i = span.end;
    }
    out.push_str(&source[i..node.body.end]);
    Ok(())
}

/// Whether the placeholder content has the form `name[<var>]`.
fn indexed(content: &str, var: &str) -> bool {
    content
        .strip_suffix(']')
        .and_then(|rest| rest.find('[').map(|at| (&rest[..at], &rest[at + 1..])))
        .map_or(false, |(name, index)| !name.is_empty() && index == var)
}

/// Index into the collection with the current iterator value, which must be
/// a non-negative integer. Keyed mappings are indexed by the decimal string
/// form of the iterator.
fn element_at<'a>(source: &str, span: Span, collection: &'a Value, iter: f64) -> Result<&'a Value> {
    if !iter.is_finite() || iter < 0.0 || iter.fract() != 0.0 {
        return Err(Error::span(
            format!("iterator value {iter} is not a valid index"),
            source,
            span,
        ));
    }
    let index = iter as usize;
    match collection {
        Value::List(list) => list
            .get(index)
            .ok_or_else(|| Error::span("index out of bounds", source, span)),
        Value::Map(map) => map
            .get(&index.to_string())
            .ok_or_else(|| Error::span("index out of bounds", source, span)),
        value => Err(Error::span(
            format!("cannot index into {}", value.human()),
            source,
            span,
        )),
    }
}
