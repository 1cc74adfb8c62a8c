// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! Traversal construction and rendering.
//!
//! A [`Traversal`] is a forward linked chain of [`Step`]s that starts at the graph
//! variable. Steps are appended through [`TraversalBuilder`] and only turned into text
//! by [`Traversal::render`], which also collects every parameter bound along the way,
//! including those of nested traversals, predicates and statements.

use core::fmt;
use std::fmt::Display;

use tracing::{debug, error, trace};

use crate::{
    config::GremlinConfig,
    protocol::{GremlinError, RenderedQuery, Value, error::StepError},
    traversal::{
        binder::{Param, ParamBinder, new_seed},
        steps::{Step, StepId, StepKind},
    },
};

pub mod args;
pub mod binder;
pub mod builder;
pub mod predicates;
pub mod statements;
pub mod steps;

pub use builder::TraversalBuilder;

#[derive(Debug, Clone)]
pub struct Traversal {
    /// Arena of steps; removed steps leave an empty slot behind.
    steps: Vec<Option<Step>>,
    tail: StepId,
    binder: ParamBinder,
    return_variable: Option<String>,
    config: GremlinConfig,
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

impl Traversal {
    pub fn new() -> Self {
        Self::with_config(GremlinConfig::default())
    }

    pub fn with_config(config: GremlinConfig) -> Self {
        let binder = ParamBinder::new(
            config.param_prefix.clone(),
            new_seed(config.seed_length),
        );
        Self {
            steps: vec![Some(Step::graph_variable(config.graph_variable.clone()))],
            tail: StepId::ROOT,
            binder,
            return_variable: None,
            config,
        }
    }

    /// Anonymous traversal, rooted at `__`.
    pub fn anon() -> Self {
        Self::anon_with_config(GremlinConfig::default())
    }

    pub fn anon_with_config(config: GremlinConfig) -> Self {
        let mut traversal = Self::with_config(config);
        let anon_variable = traversal.config.anon_variable.clone();
        traversal.set_graph_variable(anon_variable);
        traversal
    }

    pub fn config(&self) -> &GremlinConfig {
        &self.config
    }

    pub fn graph_variable(&self) -> &str {
        match self.steps.first().and_then(Option::as_ref).map(|step| &step.kind) {
            Some(StepKind::GraphVariable(text)) => text,
            _ => "",
        }
    }

    pub fn set_graph_variable(&mut self, graph_variable: impl Into<String>) {
        if let Some(Some(root)) = self.steps.first_mut() {
            root.kind = StepKind::GraphVariable(graph_variable.into());
        }
    }

    pub fn return_variable(&self) -> Option<&str> {
        self.return_variable.as_deref()
    }

    /// `Some(name)` prefixes the query with `name = `; `None` removes it.
    pub fn set_return_variable(&mut self, return_variable: Option<&str>) {
        self.return_variable = return_variable.map(str::to_string);
    }

    pub fn binder(&self) -> &ParamBinder {
        &self.binder
    }

    /// Binds a value up front so the returned [`Param`] can be passed as an argument.
    pub fn bind(&mut self, value: impl Into<Value>, name: Option<&str>) -> Param {
        self.binder.bind(value, name)
    }

    pub fn bind_many<I, V>(&mut self, values: I) -> Vec<Param>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.binder.bind_many(values)
    }

    pub fn bind_named<I, N, V>(&mut self, pairs: I) -> Vec<Param>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        self.binder.bind_named(pairs)
    }

    /// Drops every step and binding, draws a new seed and restores the configured
    /// graph variable.
    pub fn reset(&mut self) {
        self.steps = vec![Some(Step::graph_variable(self.config.graph_variable.clone()))];
        self.tail = StepId::ROOT;
        self.binder.reset(new_seed(self.config.seed_length));
        self.return_variable = None;
    }

    pub fn root(&self) -> StepId {
        StepId::ROOT
    }

    pub fn tail(&self) -> StepId {
        self.tail
    }

    /// Number of steps after the graph variable.
    pub fn len(&self) -> usize {
        self.steps.iter().flatten().count().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.get(id.0).and_then(Option::as_ref)
    }

    /// Ids in chain order, root first.
    pub fn step_ids(&self) -> Result<Vec<StepId>, StepError> {
        let mut ids = Vec::with_capacity(self.steps.len());
        let mut current = Some(StepId::ROOT);
        while let Some(id) = current {
            let step = self.step(id).ok_or(StepError::Dangling(id))?;
            if ids.len() >= self.steps.len() {
                return Err(StepError::MalformedChain);
            }
            ids.push(id);
            current = step.next;
        }
        Ok(ids)
    }

    pub fn steps(&self) -> Result<Vec<&Step>, StepError> {
        self.step_ids()?
            .into_iter()
            .map(|id| self.step(id).ok_or(StepError::Dangling(id)))
            .collect()
    }

    /// Links `step` after the current tail.
    pub fn push_step(&mut self, mut step: Step) -> StepId {
        step.next = None;
        let id = StepId(self.steps.len());
        trace!(step = %id, kind = ?step.kind, "appending step");

        self.steps.push(Some(step));
        if let Some(Some(tail)) = self.steps.get_mut(self.tail.0) {
            tail.next = Some(id);
        }
        self.tail = id;
        id
    }

    /// Unlinks the step at `id` and hands it back, so it can be pushed onto another
    /// traversal.
    pub fn remove_step(&mut self, id: StepId) -> Result<Step, StepError> {
        if id == StepId::ROOT {
            return Err(StepError::RootRemoval);
        }

        let ids = self.step_ids()?;
        let position = ids
            .iter()
            .position(|candidate| *candidate == id)
            .ok_or(StepError::NotInChain(id))?;
        let previous = ids[position - 1];

        let mut step = self.steps[id.0].take().ok_or(StepError::Dangling(id))?;
        if let Some(Some(previous_step)) = self.steps.get_mut(previous.0) {
            previous_step.next = step.next;
        }
        if self.tail == id {
            self.tail = previous;
        }
        step.next = None;
        Ok(step)
    }

    /// Renders the query and its binding table. Rendering does not alter the traversal.
    pub fn render(&self) -> Result<RenderedQuery, GremlinError> {
        let mut binder = self.binder.clone();
        let query = self.render_with(&mut binder)?;
        let bindings = binder.into_bindings();
        debug!(query = %query, bindings = bindings.len(), "rendered traversal");
        Ok(RenderedQuery::new(query, bindings))
    }

    /// Renders as an argument of a traversal whose render scope is `parent`.
    pub(crate) fn render_nested(&self, parent: &mut ParamBinder) -> Result<String, GremlinError> {
        let mut scope = parent.enter_child(&self.binder);
        let query = self.render_with(&mut scope)?;
        parent.leave_child(scope);
        Ok(query)
    }

    fn render_with(&self, binder: &mut ParamBinder) -> Result<String, GremlinError> {
        let mut query = String::new();
        let mut previous: Option<&Step> = None;

        for id in self.step_ids()? {
            let step = self.step(id).ok_or(StepError::Dangling(id))?;
            let text = step.render(binder, &self.config)?;

            if let Some(previous) = previous {
                let separator = step.separator().as_str();
                let after_blank_root =
                    previous.is_graph_variable() && self.graph_variable().is_empty();
                if !separator.is_empty() && !previous.is_raw() && !after_blank_root {
                    query.push_str(separator);
                }
            }
            query.push_str(&text);
            previous = Some(step);
        }

        match &self.return_variable {
            Some(variable) => Ok(format!("{variable} = {query}")),
            None => Ok(query),
        }
    }
}

impl Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(rendered) => write!(f, "{}", rendered.query),
            Err(e) => {
                error!(error = %e, "failed to render traversal");
                Err(fmt::Error)
            }
        }
    }
}
