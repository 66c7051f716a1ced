//! Scanners for the directive kinds recognized by the pipeline.
//!
//! Each scanner walks the buffer with a cursor and returns the leftmost
//! complete directive at or after `from`, together with its captured fields
//! as borrowed slices. Text that fails to match a directive's shape is simply
//! not matched, which is what makes malformed directives pass through
//! instantiation verbatim.
//!
//! Directive tags permit at most one whitespace character after `{` and
//! before `}`.

pub mod header;

use crate::types::directive::{ArrLoop, ForLoop, IfElse, LoopKind, MixinRef, VarRef};
use crate::types::span::Span;

/// Returns the next `{#mixin <name>}` directive.
pub fn next_mixin(source: &str, from: usize) -> Option<(Span, MixinRef<'_>)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(found) = mixin_at(source, at) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn mixin_at(source: &str, at: usize) -> Option<(Span, MixinRef<'_>)> {
    let i = open_tag(source, at, "mixin")?;
    let i = eat(source, i, " ")?;
    let close = i + source[i..].find(['{', '}'])?;
    if !source[close..].starts_with('}') {
        return None;
    }
    let name = trim_ws1_end(&source[i..close]);
    if name.is_empty() {
        return None;
    }
    Some((
        Span::from(at..close + 1),
        MixinRef {
            name,
            span: Span::from(i..i + name.len()),
        },
    ))
}

/// Returns the next `{ <dotted.path> }` variable reference. The path must
/// not contain whitespace or any of `#`, `/`, `-`, `{`, `}`.
pub fn next_var(source: &str, from: usize) -> Option<(Span, VarRef<'_>)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(found) = var_at(source, at) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn var_at(source: &str, at: usize) -> Option<(Span, VarRef<'_>)> {
    let i = eat(source, at, "{")?;
    let start = skip_ws1(source, i);
    let mut end = start;
    for c in source[start..].chars() {
        if c.is_whitespace() || matches!(c, '#' | '/' | '-' | '{' | '}') {
            break;
        }
        end += c.len_utf8();
    }
    if end == start {
        return None;
    }
    let j = skip_ws1(source, end);
    let j = eat(source, j, "}")?;
    Some((
        Span::from(at..j),
        VarRef {
            path: &source[start..end],
            span: Span::from(start..end),
        },
    ))
}

/// Returns the next `{#if <cond>} … {#else} … {/if}` block as a tagged
/// two-branch node. The condition text is captured raw; parsing it is the
/// evaluator's concern.
pub fn next_if(source: &str, from: usize) -> Option<(Span, IfElse<'_>)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(found) = if_at(source, at) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn if_at(source: &str, at: usize) -> Option<(Span, IfElse<'_>)> {
    let i = open_tag(source, at, "if")?;
    let i = eat(source, i, " ")?;
    let close = i + source[i..].find('}')?;
    if source[i..close].contains('{') {
        return None;
    }
    let cond = trim_ws1_end(&source[i..close]);
    let cond_span = Span::from(i..i + cond.len());
    let body_start = close + 1;
    let (close_at, end) = find_close(source, body_start, "if")?;
    let node = match find_else(source, body_start, close_at) {
        Some((else_at, else_end)) => IfElse {
            cond,
            cond_span,
            then_body: Span::from(body_start..else_at),
            else_body: Some(Span::from(else_end..close_at)),
        },
        None => IfElse {
            cond,
            cond_span,
            then_body: Span::from(body_start..close_at),
            else_body: None,
        },
    };
    Some((Span::from(at..end), node))
}

fn find_else(source: &str, from: usize, until: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while let Some(offset) = source[i..until].find('{') {
        let at = i + offset;
        if let Some(end) = else_tag(source, at) {
            if end <= until {
                return Some((at, end));
            }
        }
        i = at + 1;
    }
    None
}

fn else_tag(source: &str, at: usize) -> Option<usize> {
    let i = eat(source, at, "{")?;
    let i = skip_ws1(source, i);
    let i = eat(source, i, "#else")?;
    let i = skip_ws1(source, i);
    eat(source, i, "}")
}

/// Returns the next collection loop of the given spelling.
pub fn next_for(source: &str, from: usize, kind: LoopKind) -> Option<(Span, ForLoop<'_>)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(found) = for_at(source, at, kind) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn for_at(source: &str, at: usize, kind: LoopKind) -> Option<(Span, ForLoop<'_>)> {
    let i = open_tag(source, at, kind.keyword())?;
    let i = eat(source, i, " ")?;
    let (var, i) = word(source, i)?;
    let i = eat(source, i, " in ")?;
    let (collection, j) = word(source, i)?;
    let collection_span = Span::from(i..j);
    let j = skip_ws1(source, j);
    let body_start = eat(source, j, "}")?;
    let (close_at, end) = find_close(source, body_start, kind.keyword())?;
    Some((
        Span::from(at..end),
        ForLoop {
            var,
            collection,
            collection_span,
            body: Span::from(body_start..close_at),
        },
    ))
}

/// Returns the next `{#arr <header>} … {/arr}` indexed loop. A header that
/// does not parse means no match, so the whole block is left verbatim.
pub fn next_arr(source: &str, from: usize) -> Option<(Span, ArrLoop<'_>)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(found) = arr_at(source, at) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn arr_at(source: &str, at: usize) -> Option<(Span, ArrLoop<'_>)> {
    let i = open_tag(source, at, "arr")?;
    let i = eat(source, i, " ")?;
    let close = i + source[i..].find('}')?;
    if source[i..close].contains('{') {
        return None;
    }
    let text = trim_ws1_end(&source[i..close]);
    let header = header::parse(source, Span::from(i..i + text.len()))?;
    let body_start = close + 1;
    let (close_at, end) = find_close(source, body_start, "arr")?;
    Some((
        Span::from(at..end),
        ArrLoop {
            header,
            body: Span::from(body_start..close_at),
        },
    ))
}

/// Returns the next `{- <content> -}` placeholder ending before `until`.
pub fn next_placeholder(source: &str, from: usize, until: usize) -> Option<(Span, &str)> {
    let mut i = from;
    while let Some(offset) = source[i..until].find("{-") {
        let at = i + offset;
        if let Some(found) = placeholder_at(source, at, until) {
            return Some(found);
        }
        i = at + 1;
    }
    None
}

fn placeholder_at(source: &str, at: usize, until: usize) -> Option<(Span, &str)> {
    let body = &source[..until];
    let start = skip_ws1(body, at + 2);
    let mut j = start;
    while j < body.len() {
        if body[j..].starts_with("-}") {
            break;
        }
        let c = body[j..].chars().next()?;
        if c.is_whitespace() {
            // At most one whitespace character before the end marker.
            let k = j + c.len_utf8();
            if body[k..].starts_with("-}") {
                return (j > start).then(|| (Span::from(at..k + 2), &body[start..j]));
            }
            return None;
        }
        j += c.len_utf8();
    }
    if !body[j..].starts_with("-}") {
        return None;
    }
    (j > start).then(|| (Span::from(at..j + 2), &body[start..j]))
}

fn open_tag(source: &str, at: usize, keyword: &str) -> Option<usize> {
    let i = eat(source, at, "{")?;
    let i = skip_ws1(source, i);
    let i = eat(source, i, "#")?;
    eat(source, i, keyword)
}

fn close_tag(source: &str, at: usize, keyword: &str) -> Option<usize> {
    let i = eat(source, at, "{")?;
    let i = skip_ws1(source, i);
    let i = eat(source, i, "/")?;
    let i = skip_ws1(source, i);
    let i = eat(source, i, keyword)?;
    let i = skip_ws1(source, i);
    eat(source, i, "}")
}

fn find_close(source: &str, from: usize, keyword: &str) -> Option<(usize, usize)> {
    let mut i = from;
    while let Some(offset) = source[i..].find('{') {
        let at = i + offset;
        if let Some(end) = close_tag(source, at, keyword) {
            return Some((at, end));
        }
        i = at + 1;
    }
    None
}

fn eat(source: &str, i: usize, token: &str) -> Option<usize> {
    source[i..].starts_with(token).then(|| i + token.len())
}

/// Advance past at most one whitespace character.
fn skip_ws1(source: &str, i: usize) -> usize {
    match source[i..].chars().next() {
        Some(c) if c.is_whitespace() => i + c.len_utf8(),
        _ => i,
    }
}

/// Trim at most one trailing whitespace character.
fn trim_ws1_end(s: &str) -> &str {
    match s.chars().next_back() {
        Some(c) if c.is_whitespace() => &s[..s.len() - c.len_utf8()],
        _ => s,
    }
}

fn word(source: &str, i: usize) -> Option<(&str, usize)> {
    let mut end = i;
    for c in source[i..].chars() {
        if c.is_whitespace() || matches!(c, '{' | '}') {
            break;
        }
        end += c.len_utf8();
    }
    (end > i).then(|| (&source[i..end], end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::directive::{Bound, Cmp, Step};

    #[test]
    fn scan_mixin() {
        let source = "lorem {#mixin footer} ipsum";
        let (span, mixin) = next_mixin(source, 0).unwrap();
        assert_eq!(&source[span], "{#mixin footer}");
        assert_eq!(mixin.name, "footer");
        assert_eq!(&source[mixin.span], "footer");
    }

    #[test]
    fn scan_mixin_spaced() {
        let source = "{ #mixin footer }";
        let (span, mixin) = next_mixin(source, 0).unwrap();
        assert_eq!(&source[span], source);
        assert_eq!(mixin.name, "footer");
    }

    #[test]
    fn scan_mixin_unclosed() {
        assert_eq!(next_mixin("{#mixin footer", 0), None);
    }

    #[test]
    fn scan_var() {
        let source = "lorem { ipsum.dolor } sit";
        let (span, var) = next_var(source, 0).unwrap();
        assert_eq!(&source[span], "{ ipsum.dolor }");
        assert_eq!(var.path, "ipsum.dolor");
    }

    #[test]
    fn scan_var_tight() {
        let source = "{ipsum}";
        let (span, var) = next_var(source, 0).unwrap();
        assert_eq!(&source[span], "{ipsum}");
        assert_eq!(var.path, "ipsum");
    }

    #[test]
    fn scan_var_skips_directives() {
        // Tags starting with `#`, `/`, or `-` are not variable references.
        assert_eq!(next_var("{#if x} {/if} {- x -}", 0), None);
    }

    #[test]
    fn scan_var_skips_spaced_out() {
        // More than one whitespace character fails to match.
        assert_eq!(next_var("{  ipsum }", 0), None);
    }

    #[test]
    fn scan_if_else() {
        let source = "{#if flag} yes {#else} no {/if}";
        let (span, node) = next_if(source, 0).unwrap();
        assert_eq!(&source[span], source);
        assert_eq!(node.cond, "flag");
        assert_eq!(&source[node.then_body], " yes ");
        assert_eq!(&source[node.else_body.unwrap()], " no ");
    }

    #[test]
    fn scan_if_without_else() {
        let source = "a {#if flag}b{/if} c";
        let (span, node) = next_if(source, 0).unwrap();
        assert_eq!(&source[span], "{#if flag}b{/if}");
        assert_eq!(&source[node.then_body], "b");
        assert_eq!(node.else_body, None);
    }

    #[test]
    fn scan_if_unclosed() {
        assert_eq!(next_if("{#if flag} yes", 0), None);
    }

    #[test]
    fn scan_for_each() {
        let source = "{#forEach x in items}{- x.n -}{/forEach}";
        let (span, node) = next_for(source, 0, LoopKind::ForEach).unwrap();
        assert_eq!(&source[span], source);
        assert_eq!(node.var, "x");
        assert_eq!(node.collection, "items");
        assert_eq!(&source[node.collection_span], "items");
        assert_eq!(&source[node.body], "{- x.n -}");
    }

    #[test]
    fn scan_for_of_is_not_for_each() {
        let source = "{#forOf x in items}{- x -}{/forOf}";
        assert_eq!(next_for(source, 0, LoopKind::ForEach), None);
        assert!(next_for(source, 0, LoopKind::ForOf).is_some());
    }

    #[test]
    fn scan_arr() {
        let source = "{#arr items x=0<length x++}{- v[x] -}{/arr}";
        let (span, node) = next_arr(source, 0).unwrap();
        assert_eq!(&source[span], source);
        assert_eq!(node.header.collection, "items");
        assert_eq!(node.header.var, "x");
        assert_eq!(node.header.init, Bound::Number(0.0));
        assert_eq!(node.header.cmp, Cmp::Lt);
        assert_eq!(node.header.target, Bound::Length);
        assert_eq!(node.header.step, Step::Incr);
        assert_eq!(&source[node.body], "{- v[x] -}");
    }

    #[test]
    fn scan_arr_bad_header() {
        assert_eq!(next_arr("{#arr items x=0?3 x++}{/arr}", 0), None);
    }

    #[test]
    fn scan_placeholder() {
        let source = "a {- x.n -} b";
        let (span, content) = next_placeholder(source, 0, source.len()).unwrap();
        assert_eq!(&source[span], "{- x.n -}");
        assert_eq!(content, "x.n");
    }

    #[test]
    fn scan_placeholder_tight() {
        let source = "{-x-}";
        let (span, content) = next_placeholder(source, 0, source.len()).unwrap();
        assert_eq!(&source[span], "{-x-}");
        assert_eq!(content, "x");
    }

    #[test]
    fn scan_placeholder_bounded() {
        // The placeholder must end before `until`.
        let source = "{- x -}";
        assert_eq!(next_placeholder(source, 0, source.len() - 1), None);
    }

    #[test]
    fn scan_placeholder_indexed() {
        let source = "{- v[x] -}";
        let (_, content) = next_placeholder(source, 0, source.len()).unwrap();
        assert_eq!(content, "v[x]");
    }
}
