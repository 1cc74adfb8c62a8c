use std::fmt;

use serde::Serialize;

use crate::{protocol::GremlinError, traversal::binder::Bindings};

/// Output of rendering a traversal: the query text and every parameter
/// extracted from it, including those bound inside nested traversals.
///
/// Serializes to the Gremlin Server request body: `{"gremlin": ..., "bindings": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedQuery {
    #[serde(rename = "gremlin")]
    pub query: String,
    pub bindings: Bindings,
}

impl RenderedQuery {
    pub fn new(query: impl Into<String>, bindings: Bindings) -> Self {
        Self {
            query: query.into(),
            bindings,
        }
    }

    pub fn to_request_json(&self) -> Result<String, GremlinError> {
        Ok(sonic_rs::to_string(self)?)
    }
}

impl fmt::Display for RenderedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}
