//! Parameter binding.
//!
//! Every traversal owns a [`ParamBinder`]. Explicit [`ParamBinder::bind`] calls land in
//! it directly; literals met while rendering are bound into a copy of it, so rendering
//! never mutates the traversal. Nested traversals get their own scope which is seeded
//! with the enclosing scope's bindings and merged back into it once the nested
//! traversal has been rendered.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::{config::MAX_SEED_LENGTH, protocol::Value};

/// A named value. Passing one as an argument writes `name` into the query and
/// records the pair in the binding table.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Parameter name to value, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(IndexMap<String, Value>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// First name bound to a value equal to `value`.
    pub fn name_of(&self, value: &Value) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the value previously held under `name`, if any.
    pub fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        self.0.insert(name, value)
    }

    /// Copies every pair of `other` in, keeping names. Incoming values win.
    pub fn absorb(&mut self, other: &Bindings) {
        for (name, value) in other.iter() {
            self.0.insert(name.to_string(), value.clone());
        }
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cuts a per-traversal seed from a fresh v4 uuid.
pub(crate) fn new_seed(length: usize) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let length = length.clamp(1, MAX_SEED_LENGTH);
    id[id.len() - length..].to_string()
}

#[derive(Debug, Clone)]
pub struct ParamBinder {
    prefix: String,
    seed: String,
    counter: u64,
    bindings: Bindings,
}

impl ParamBinder {
    pub fn new(prefix: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            seed: seed.into(),
            counter: 0,
            bindings: Bindings::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Binds `value`, returning the name it is exposed under.
    ///
    /// With an explicit `name` the pair is recorded as given; a newer value replaces an
    /// older one under the same name. Without one, a string equal to an existing binding
    /// name resolves to that binding, then a value equal to an existing value reuses
    /// its name, and only then is `<prefix>_<seed>_<counter>` generated.
    ///
    /// The counter advances on every call, dedup hits included, and again past any
    /// generated name that is already taken.
    ///
    /// Numbers compare by value across widths, so `1i32`, `1i64` and `1.0f64` share one
    /// parameter, which keeps the type of the first value bound.
    pub fn bind(&mut self, value: impl Into<Value>, name: Option<&str>) -> Param {
        let value = value.into();
        self.counter += 1;

        let (name, value) = match name {
            Some(name) => (name.to_string(), value),
            None => match self.lookup(&value) {
                Some(existing) => existing,
                None => (self.fresh_name(), value),
            },
        };

        if let Some(previous) = self.bindings.insert(name.clone(), value.clone()) {
            if previous != value {
                warn!(
                    name = %name,
                    previous = %previous,
                    value = %value,
                    "binding name reused with a different value"
                );
            }
        }
        trace!(name = %name, kind = value.to_variant_string(), "bound parameter");

        Param { name, value }
    }

    pub fn bind_param(&mut self, param: &Param) -> Param {
        self.bind(param.value.clone(), Some(&param.name))
    }

    pub fn bind_many<I, V>(&mut self, values: I) -> Vec<Param>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values.into_iter().map(|value| self.bind(value, None)).collect()
    }

    pub fn bind_named<I, N, V>(&mut self, pairs: I) -> Vec<Param>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| self.bind(value, Some(name.as_ref())))
            .collect()
    }

    /// Generated names never shadow a binding already in the table. A scope cloned
    /// from the same seed as its parent starts over at the same counter, so taken
    /// names are skipped.
    fn fresh_name(&mut self) -> String {
        loop {
            let name = format!("{}_{}_{}", self.prefix, self.seed, self.counter);
            if !self.bindings.contains_name(&name) {
                return name;
            }
            self.counter += 1;
        }
    }

    fn lookup(&self, value: &Value) -> Option<(String, Value)> {
        if let Some(existing) = value.as_str().and_then(|name| {
            self.bindings
                .get(name)
                .map(|bound| (name.to_string(), bound.clone()))
        }) {
            return Some(existing);
        }
        self.bindings
            .name_of(value)
            .map(|name| (name.to_string(), value.clone()))
    }

    pub(crate) fn absorb(&mut self, bindings: &Bindings) {
        self.bindings.absorb(bindings);
    }

    /// Opens the render scope of a nested traversal owning `child`.
    ///
    /// The child's own bindings are published to this scope first, then the
    /// returned scope receives everything visible here so that equal values
    /// resolve to the names already in use.
    pub(crate) fn enter_child(&mut self, child: &ParamBinder) -> ParamBinder {
        self.absorb(&child.bindings);
        let mut scope = child.clone();
        scope.absorb(&self.bindings);
        scope
    }

    /// Merges a finished child scope back up.
    pub(crate) fn leave_child(&mut self, scope: ParamBinder) {
        self.absorb(&scope.bindings);
    }

    pub(crate) fn reset(&mut self, seed: String) {
        self.seed = seed;
        self.counter = 0;
        self.bindings = Bindings::new();
    }
}
