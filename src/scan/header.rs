//! Parser for the indexed loop header, e.g. `items x=0<length x++`.

use unicode_ident::{is_xid_continue, is_xid_start};

use crate::types::directive::{ArrHeader, Bound, Cmp, Step};
use crate::types::span::Span;

/// Parse the header text at `span` within `source`.
///
/// The header has exactly three whitespace-separated fields: the collection
/// reference, the iterator assignment with its comparison, and the step
/// expression. Returns `None` when the text does not match, in which case
/// the whole directive is left verbatim.
pub fn parse(source: &str, span: Span) -> Option<ArrHeader<'_>> {
    let header = &source[span];
    let mut fields = header.split_whitespace();
    let collection = fields.next()?;
    let assign = fields.next()?;
    let step = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    // The collection is the first non-whitespace run, so its first
    // occurrence in the header is its position.
    let offset = header.find(collection)?;
    let start = span.start + offset;
    let collection_span = Span::from(start..start + collection.len());

    let eq = assign.find('=')?;
    let var = &assign[..eq];
    if !is_ident(var) {
        return None;
    }
    let expr = &assign[eq + 1..];
    let op_at = expr.find(['<', '>'])?;
    let rest = &expr[op_at..];
    let (cmp, op_len) = if rest.starts_with("<=") {
        (Cmp::Le, 2)
    } else if rest.starts_with(">=") {
        (Cmp::Ge, 2)
    } else if rest.starts_with('<') {
        (Cmp::Lt, 1)
    } else {
        (Cmp::Gt, 1)
    };
    let init = bound(&expr[..op_at])?;
    let target = bound(&expr[op_at + op_len..])?;
    let step = step_expr(step, var)?;

    Some(ArrHeader {
        collection,
        collection_span,
        var,
        init,
        cmp,
        target,
        step,
    })
}

fn bound(s: &str) -> Option<Bound> {
    if s == "length" {
        Some(Bound::Length)
    } else {
        s.parse().ok().map(Bound::Number)
    }
}

/// The step must start with the iterator variable, followed by `++`, `--`,
/// or a compound assignment with a numeric operand.
fn step_expr(s: &str, var: &str) -> Option<Step> {
    let op = s.strip_prefix(var)?;
    match op {
        "++" => Some(Step::Incr),
        "--" => Some(Step::Decr),
        _ => {
            let operand = op.get(2..)?.parse().ok()?;
            match &op[..2] {
                "+=" => Some(Step::Add(operand)),
                "-=" => Some(Step::Sub(operand)),
                "*=" => Some(Step::Mul(operand)),
                "/=" => Some(Step::Div(operand)),
                _ => None,
            }
        }
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_xid_start(c) || c == '_' => chars.all(is_xid_continue),
        _ => false,
    }
}
