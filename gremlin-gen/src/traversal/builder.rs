//! Fluent step builders shared by [`Traversal`] and [`Predicate`](super::predicates::Predicate).

use std::mem;

use tracing::debug;

use crate::{
    protocol::{GremlinError, error::StepError},
    traversal::{
        Traversal,
        args::Arg,
        predicates::PredicateKind,
        statements::Statement,
        steps::{Function, Index, Step, StepKind},
    },
};

pub trait TraversalBuilder: Sized {
    fn traversal(&self) -> &Traversal;

    fn traversal_mut(&mut self) -> &mut Traversal;

    fn append(mut self, step: Step) -> Self {
        self.traversal_mut().push_step(step);
        self
    }

    /// `.name`
    fn attr(self, name: impl Into<String>) -> Self {
        self.append(Step::attribute(name))
    }

    /// `.name(P1, P2)` with literal arguments bound.
    fn call(self, name: impl Into<String>, args: Vec<Arg>) -> Self {
        self.append(Step::function(Function::new(name, args)))
    }

    /// `name(P1, P2)` without the leading `.`
    fn call_raw(self, name: impl Into<String>, args: Vec<Arg>) -> Self {
        self.append(Step::function(Function::new(name, args).raw()))
    }

    /// `.name(a, b)` with literal arguments written as text.
    fn call_unbound(self, name: impl Into<String>, args: Vec<Arg>) -> Self {
        self.append(Step::function(Function::new(name, args).unbound()))
    }

    fn call_raw_unbound(self, name: impl Into<String>, args: Vec<Arg>) -> Self {
        self.append(Step::function(Function::new(name, args).raw().unbound()))
    }

    fn call_predicate(self, kind: PredicateKind, args: Vec<Arg>) -> Self {
        self.append(Step::function(Function::predicate(kind, args)))
    }

    /// Turns the attribute at the tail into a call with `args`.
    ///
    /// The call is unbound when the last argument is a predicate. An attribute
    /// carrying a predicate's declared name (`IN`, `AND`, `lt`, ...) renders the
    /// predicate's function name instead.
    fn invoke(mut self, args: Vec<Arg>) -> Result<Self, GremlinError> {
        let tail = self.traversal().tail();
        let name = match self.traversal().step(tail).map(|step| &step.kind) {
            Some(StepKind::Attribute(name)) => name.clone(),
            _ => return Err(StepError::NotCallable(tail).into()),
        };
        self.traversal_mut().remove_step(tail)?;

        let unbound = args.last().is_some_and(Arg::is_predicate);
        let function = match name.parse::<PredicateKind>() {
            Ok(kind) => Function::predicate(kind, args),
            Err(_) => Function::new(name, args),
        };
        let function = if unbound { function.unbound() } else { function };

        Ok(self.append(Step::function(function)))
    }

    /// `[i]` or `[start..stop]`
    fn index(self, index: impl Into<Index>) -> Self {
        self.append(Step::index(index))
    }

    /// `range(start, end)`
    fn range(self, start: impl Into<Arg>, end: impl Into<Arg>) -> Self {
        self.call_raw_unbound("range", vec![start.into(), end.into()])
    }

    /// `{body}`
    fn close(self, body: impl Into<Arg>) -> Self {
        self.append(Step::closure(body, Vec::<String>::new()))
    }

    /// `{a,b -> body}`
    fn close_with<I, S>(self, body: impl Into<Arg>, captures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(Step::closure(body, captures))
    }

    fn raw(self, payload: impl Into<Arg>) -> Self {
        self.append(Step::raw(payload))
    }

    fn apply_statement(mut self, statement: &dyn Statement) -> Result<Self, GremlinError> {
        debug!(statement = ?statement, "applying statement");
        let traversal = mem::take(self.traversal_mut());
        *self.traversal_mut() = statement.build(traversal)?;
        Ok(self)
    }

    fn with_graph_variable(mut self, graph_variable: impl Into<String>) -> Self {
        self.traversal_mut().set_graph_variable(graph_variable);
        self
    }

    fn with_return_variable(mut self, return_variable: Option<&str>) -> Self {
        self.traversal_mut().set_return_variable(return_variable);
        self
    }
}

impl TraversalBuilder for Traversal {
    fn traversal(&self) -> &Traversal {
        self
    }

    fn traversal_mut(&mut self) -> &mut Traversal {
        self
    }
}
