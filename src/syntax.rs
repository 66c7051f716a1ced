//! The template syntax.
//!
//! This module only carries documentation.
//!
//! # Tags
//!
//! Directive tags permit at most one whitespace character after the opening
//! brace and before the closing brace, so `{ #if flag }` and `{#if flag}`
//! are equivalent. Text that fails to match a directive's shape is not an
//! error; it passes through to the output verbatim.
//!
//! # Comments
//!
//! `/* … */` comments are removed before any directive resolves, so a
//! commented out directive never runs. An unclosed comment is left verbatim.
//!
//! # Mixins
//!
//! ```text
//! {#mixin footer}
//! ```
//!
//! Replaced by the body of the mixin named `footer` in the `mixins` context
//! key. The body is not rescanned for further mixins, but its variables,
//! conditionals, and loops are resolved as usual.
//!
//! # Variables
//!
//! ```text
//! { user.name }
//! ```
//!
//! Replaced by the value at the dot notation path. The path must not
//! contain whitespace or any of `#`, `/`, `-`, `{`, `}`. It is an error if
//! any segment of the path is missing or if the final value is a list or a
//! map.
//!
//! # Conditionals
//!
//! ```text
//! {#if admin} yes {#else} no {/if}
//! {#if !draft} published {/if}
//! {#if name == bob} hi bob {/if}
//! {#if count != 0} some {/if}
//! ```
//!
//! Exactly one branch is kept; the `{#else}` branch is optional. The
//! condition is a single optionally negated identifier, optionally compared
//! against a whitespace free literal with `==` or `!=`. The identifier is
//! looked up directly in the context; a missing identifier is falsy. Zero,
//! the empty string, `false`, and none are falsy; everything else is
//! truthy.
//!
//! # Collection loops
//!
//! ```text
//! {#forEach x in items} <li>{- x.name -}</li> {/forEach}
//! {#forOf x in items} <li>{- x -}</li> {/forOf}
//! ```
//!
//! Both spellings behave identically. The body is emitted once per element
//! of the collection: lists in order, maps by their values in key order.
//! Within the body, `{- x -}` is the element itself and `{- x.name -}` is
//! the element's `name` field; only the first segment after the dot is
//! used. Placeholders naming anything other than the loop variable are left
//! verbatim.
//!
//! # Indexed loops
//!
//! ```text
//! {#arr items x=0<length x++} <li>{- v[x] -}</li> {/arr}
//! {#arr items i=5>=0 i--} {- v[i] -} {/arr}
//! {#arr items i=0<8 i+=2} {- v[i] -} {/arr}
//! ```
//!
//! The header names the collection, the iterator with its initial value and
//! comparison, and the step. Bounds are numeric literals or the `length`
//! keyword. The comparison is one of `<`, `>`, `<=`, `>=`; the step is
//! `++`, `--`, or one of `+=`, `-=`, `*=`, `/=` with a numeric operand.
//! Within the body, `{- v[x] -}` is the element at the current iterator
//! value, which must be a non-negative integer when indexing. A loop that
//! never converges on its target stops after 10000 expansions.
