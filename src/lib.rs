//! A small directive based text templating engine.
//!
//! Templates are plain text carrying five kinds of directive:
//!
//! - Mixin inclusion: `{#mixin footer}`
//! - Variable interpolation: `{ user.name }`
//! - Conditionals: `{#if admin} yes {#else} no {/if}`
//! - Collection loops: `{#forEach x in items} {- x.name -} {/forEach}`
//! - Indexed loops: `{#arr items i=0<length i++} {- v[i] -} {/arr}`
//!
//! `/* … */` comments are stripped before any directive resolves. The full
//! grammar lives in the [`syntax`] module.
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct, which holds default data
//! merged into every instantiation. Use [`Engine::template()`] to get a
//! [`Template`] handle and [`Template::instantiate()`] to produce the final
//! text from query parameters, call level data, and [`Options`].
//!
//! ```
//! use stromme::{value, Engine, Options};
//!
//! let engine = Engine::new();
//! let template = engine.template("<h1>{ title }</h1>");
//!
//! let result = template.instantiate(
//!     [("page", "1")],
//!     value! { title: "Hello" },
//!     Options::default(),
//! )?;
//! assert_eq!(result, "<h1>Hello</h1>");
//! # Ok::<(), stromme::Error>(())
//! ```
//!
//! The query parameters are always available in the context under the
//! `query` key.
//!
//! ```
//! use stromme::{value, Engine, Options};
//!
//! let engine = Engine::new();
//! let result = engine
//!     .template("page { query.page }")
//!     .instantiate([("page", "2")], value! {}, Options::default())?;
//! assert_eq!(result, "page 2");
//! # Ok::<(), stromme::Error>(())
//! ```
//!
//! # Mixins
//!
//! A mixin is another template's body, embedded by name. Compile the inner
//! template with [`Template::compile_to_mixin()`] and pass it in the
//! reserved `mixins` key of the context.
//!
//! ```
//! use stromme::{value, Engine, Options};
//!
//! let engine = Engine::new();
//! let footer = engine.template("<footer>fin</footer>").compile_to_mixin();
//!
//! let result = engine
//!     .template("<main></main>{#mixin footer}")
//!     .instantiate(
//!         std::iter::empty::<(&str, &str)>(),
//!         value! { mixins: { footer: footer } },
//!         Options::default(),
//!     )?;
//! assert_eq!(result, "<main></main><footer>fin</footer>");
//! # Ok::<(), stromme::Error>(())
//! ```
//!
//! # Features
//!
//! The `serde` feature is enabled by default. It provides the [`to_value`]
//! function, the [`Engine::with_data()`] constructor, and the
//! [`Template::instantiate()`] method which accept any serializable data.
//! Without it, construct contexts with the [`value!`] macro or [`Value`]'s
//! `From` impls and use the `*_from` variants.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod macros;
mod resolve;
mod scan;
pub mod syntax;
mod types;
mod value;

use std::fmt;

pub use crate::error::{Error, Result};
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{List, Map, Value};

/// Boundary markers wrapped around every template body.
const BEGIN_MARKER: &str = "<template>";
const END_MARKER: &str = "</template>";

/// The compilation and instantiation engine.
///
/// Holds default data that is merged into the context of every
/// instantiation. Call level data wins on key collision.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    defaults: Map<String, Value>,
}

/// A template handle: the original source plus its marker wrapped form.
///
/// Handles are immutable. Every instantiation builds its context and output
/// from scratch, so a handle can be reused freely.
#[derive(Debug, Clone)]
pub struct Template<'engine> {
    engine: &'engine Engine,
    raw: String,
    wrapped: String,
}

/// A sub-template's body text, stripped of boundary markers.
///
/// Built with [`Template::compile_to_mixin()`] and passed to instantiation
/// under the reserved `mixins` context key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixin {
    body: String,
}

/// Options recognized by [`Template::instantiate()`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Remove every whitespace character from the final output.
    pub strip_whitespace: bool,
}

impl Engine {
    /// Construct an engine with no default data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with default data.
    ///
    /// # Errors
    ///
    /// If `defaults` is not a [`Value::Map`].
    pub fn with_value(defaults: Value) -> Result<Self> {
        match defaults {
            Value::Map(defaults) => Ok(Self { defaults }),
            value => Err(Error::msg(format!(
                "default data must be a map, found {}",
                value.human()
            ))),
        }
    }

    /// Construct an engine with serializable default data, which must
    /// serialize to a map.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn with_data<S>(defaults: S) -> Result<Self>
    where
        S: serde::Serialize,
    {
        Self::with_value(to_value(defaults)?)
    }

    /// Create a template handle for the given source.
    ///
    /// The source is wrapped in `<template>` boundary markers unless it
    /// already carries them. Wrapping adds no padding, so a marker wrapped
    /// body round trips byte for byte.
    pub fn template(&self, source: &str) -> Template<'_> {
        let raw = source.to_string();
        let wrapped = if source.contains(BEGIN_MARKER) {
            raw.clone()
        } else {
            format!("{BEGIN_MARKER}{source}{END_MARKER}")
        };
        Template {
            engine: self,
            raw,
            wrapped,
        }
    }
}

impl Template<'_> {
    /// Returns the original template source.
    pub fn source(&self) -> &str {
        &self.raw
    }

    /// Strip the boundary markers, returning the body for embedding in
    /// another template.
    pub fn compile_to_mixin(&self) -> Mixin {
        Mixin {
            body: self.wrapped.replace(BEGIN_MARKER, "").replace(END_MARKER, ""),
        }
    }

    /// Instantiate the template with serializable data, which must
    /// serialize to a map or to none.
    ///
    /// The context is built fresh for this call: the engine's default data,
    /// then `data` (which wins on key collision), then the query parameters
    /// as a flat string map under the `query` key.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn instantiate<Q, K, V, S>(&self, query: Q, data: S, options: Options) -> Result<String>
    where
        Q: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        S: serde::Serialize,
    {
        self.instantiate_from(query, to_value(data)?, options)
    }

    /// Instantiate the template with a [`Value`] context, which must be a
    /// [`Value::Map`] or [`Value::None`].
    pub fn instantiate_from<Q, K, V>(&self, query: Q, data: Value, options: Options) -> Result<String>
    where
        Q: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let ctx = self.merge(query, data)?;
        let mixin = self.compile_to_mixin();
        resolve::pipeline(mixin.body(), &ctx, options)
    }

    /// Merge into a fresh context. Neither the engine defaults nor the
    /// caller's data are mutated.
    fn merge<Q, K, V>(&self, query: Q, data: Value) -> Result<Value>
    where
        Q: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.engine.defaults.clone();
        match data {
            Value::Map(data) => merged.extend(data),
            Value::None => {}
            value => {
                return Err(Error::msg(format!(
                    "instantiation data must be a map, found {}",
                    value.human()
                )));
            }
        }
        let params: Map<String, Value> = query
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        merged.insert(String::from("query"), Value::Map(params));
        Ok(Value::Map(merged))
    }
}

impl Mixin {
    /// Returns the body text.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
