//! Expansion of collection loops.

use crate::resolve::value::{lookup, lookup_path, write_value};
use crate::scan;
use crate::types::directive::ForLoop;
use crate::{Error, Result, Value};

/// Expand a collection loop: one copy of the body per element, with the
/// placeholders that reference the loop variable substituted per element.
/// Both loop spellings share this expansion.
pub fn expand(out: &mut String, source: &str, node: &ForLoop<'_>, ctx: &Value) -> Result<()> {
    let collection = lookup_path(source, node.collection_span, ctx, node.collection)?;
    match collection {
        Value::List(list) => {
            for element in list {
                expand_body(out, source, node, element)?;
            }
        }
        // Keyed mappings iterate their values in key enumeration order.
        Value::Map(map) => {
            for element in map.values() {
                expand_body(out, source, node, element)?;
            }
        }
        value => {
            return Err(Error::span(
                format!("cannot iterate over {}", value.human()),
                source,
                node.collection_span,
            ));
        }
    }
    Ok(())
}

fn expand_body(out: &mut String, source: &str, node: &ForLoop<'_>, element: &Value) -> Result<()> {
    let mut i = node.body.start;
    while let Some((span, content)) = scan::next_placeholder(source, i, node.body.end) {
        out.push_str(&source[i..span.start]);
        if content == node.var {
            write_value(out, source, span, element)?;
        } else if let Some(field) = field_of(content, node.var) {
            let value = lookup(source, span, element, field)?;
            write_value(out, source, span, value)?;
        } else {
            // Not this loop's variable, leave the placeholder verbatim.
            out.push_str(&source[span]);
        }
        i = span.end;
    }
    out.push_str(&source[i..node.body.end]);
    Ok(())
}

/// `x.a.b` reads field `a`: only the first segment after the dot is used.
fn field_of<'s>(content: &'s str, var: &str) -> Option<&'s str> {
    let rest = content.strip_prefix(var)?.strip_prefix('.')?;
    Some(rest.split('.').next().unwrap_or(rest))
}
