//! Parsing and evaluation of conditions.
//!
//! A condition is an optionally negated identifier, optionally followed by a
//! single `==` or `!=` comparison against a literal. There are no boolean
//! combinators and the literal cannot contain whitespace.

use crate::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'s> {
    negated: bool,
    ident: &'s str,
    test: Option<(Op, &'s str)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
}

pub fn parse(cond: &str) -> Option<Condition<'_>> {
    let (negated, rest) = match cond.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, cond),
    };
    let end = rest.find(['!', '=', ' ']).unwrap_or(rest.len());
    let ident = &rest[..end];
    if ident.is_empty() {
        return None;
    }
    let mut rest = &rest[end..];
    if let Some(r) = rest.strip_prefix(' ') {
        rest = r;
    }
    if rest.is_empty() {
        return Some(Condition {
            negated,
            ident,
            test: None,
        });
    }
    let (op, rest) = if let Some(r) = rest.strip_prefix("==") {
        (Op::Eq, r)
    } else if let Some(r) = rest.strip_prefix("!=") {
        (Op::Ne, r)
    } else {
        return None;
    };
    let literal = rest.strip_prefix(' ').unwrap_or(rest);
    if literal.is_empty() || literal.chars().any(char::is_whitespace) {
        return None;
    }
    Some(Condition {
        negated,
        ident,
        test: Some((op, literal)),
    })
}

/// Evaluate against the merged context.
///
/// The identifier is a single direct key in the context map, never a dotted
/// path. A missing key evaluates as none, which is falsy, never an error.
pub fn eval(cond: &Condition<'_>, ctx: &Value) -> bool {
    let value = match ctx {
        Value::Map(map) => map.get(cond.ident),
        _ => None,
    };
    let value = value.unwrap_or(&Value::None);
    match (cond.negated, cond.test) {
        (false, None) => value.is_truthy(),
        (true, None) => !value.is_truthy(),
        (negated, Some((Op::Eq, literal))) => literal_eq(value, literal) != negated,
        (negated, Some((Op::Ne, literal))) => literal_eq(value, literal) == negated,
    }
}

/// The literal is interpreted according to the value's type, so `7`, `7.0`,
/// `true`, and `bob` all compare as expected.
fn literal_eq(value: &Value, literal: &str) -> bool {
    match value {
        Value::Bool(b) => literal.parse::<bool>().map_or(false, |l| l == *b),
        Value::Integer(n) => literal.parse::<f64>().map_or(false, |l| l == *n as f64),
        Value::Float(n) => literal.parse::<f64>().map_or(false, |l| l == *n),
        Value::String(s) => s == literal,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn check(cond: &str, ctx: &Value) -> bool {
        eval(&parse(cond).unwrap(), ctx)
    }

    #[test]
    fn parse_bare() {
        let cond = parse("flag").unwrap();
        assert_eq!(cond.negated, false);
        assert_eq!(cond.ident, "flag");
        assert_eq!(cond.test, None);
    }

    #[test]
    fn parse_negated() {
        let cond = parse("!flag").unwrap();
        assert_eq!(cond.negated, true);
        assert_eq!(cond.ident, "flag");
    }

    #[test]
    fn parse_comparison() {
        let cond = parse("name == bob").unwrap();
        assert_eq!(cond.ident, "name");
        assert_eq!(cond.test, Some((Op::Eq, "bob")));

        let cond = parse("name!=bob").unwrap();
        assert_eq!(cond.test, Some((Op::Ne, "bob")));
    }

    #[test]
    fn parse_rejects() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("!"), None);
        assert_eq!(parse("a = b"), None);
        assert_eq!(parse("a === b"), None);
        assert_eq!(parse("a =="), None);
        assert_eq!(parse("a == b c"), None);
    }

    #[test]
    fn eval_truthiness() {
        let ctx = value! {
            yes: true,
            no: false,
            zero: 0,
            num: 3,
            empty: "",
            name: "bob",
            items: [],
            nothing: None,
        };
        assert!(check("yes", &ctx));
        assert!(!check("no", &ctx));
        assert!(!check("zero", &ctx));
        assert!(check("num", &ctx));
        assert!(!check("empty", &ctx));
        assert!(check("name", &ctx));
        assert!(check("items", &ctx));
        assert!(!check("nothing", &ctx));
        assert!(!check("missing", &ctx));
    }

    #[test]
    fn eval_negation() {
        let ctx = value! { yes: true };
        assert!(!check("!yes", &ctx));
        assert!(check("!missing", &ctx));
    }

    #[test]
    fn eval_comparisons() {
        let ctx = value! { name: "bob", age: 42, ratio: 0.5, ok: true };
        assert!(check("name == bob", &ctx));
        assert!(!check("name == alice", &ctx));
        assert!(check("name != alice", &ctx));
        assert!(check("age == 42", &ctx));
        assert!(check("age == 42.0", &ctx));
        assert!(check("ratio == 0.5", &ctx));
        assert!(check("ok == true", &ctx));
        assert!(!check("ok == yes", &ctx));
    }

    #[test]
    fn eval_negated_comparisons() {
        let ctx = value! { name: "bob" };
        assert!(!check("!name == bob", &ctx));
        assert!(check("!name == alice", &ctx));
        // A negated `!=` behaves like `==`.
        assert!(!check("!name != alice", &ctx));
        assert!(check("!name != bob", &ctx));
    }

    #[test]
    fn eval_missing_never_equal() {
        let ctx = value! {};
        assert!(!check("missing == bob", &ctx));
        assert!(check("missing != bob", &ctx));
    }
}
