// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! Builds Gremlin traversal text together with a table of bound parameters.
//!
//! ```
//! use gremlin_gen::prelude::*;
//!
//! let g = Traversal::new()
//!     .call("V", args![])
//!     .call("has", args!["name", "marko"]);
//! let rendered = g.render().unwrap();
//!
//! assert!(rendered.query.starts_with("g.V().has("));
//! assert_eq!(rendered.bindings.len(), 2);
//! ```

pub mod config;
pub mod protocol;
pub mod traversal;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        args,
        config::GremlinConfig,
        protocol::{GremlinError, RenderedQuery, Value},
        traversal::{
            Traversal, TraversalBuilder,
            args::Arg,
            binder::{Bindings, Param},
            predicates::{Predicate, PredicateKind},
            statements::{Conditional, Direction, GetEdge, Statement},
        },
    };
}
