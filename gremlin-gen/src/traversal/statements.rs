//! Reusable traversal fragments.
//!
//! A statement is configured up front and then applied with [`Statement::build`], which
//! takes a traversal by value and hands back the traversal with the fragment appended.
//! Statements are never mutated by `build`, so one statement can be applied to any
//! number of traversals.

use core::fmt;
use std::{fmt::Debug, fmt::Display, str::FromStr, sync::Arc};

use crate::{
    protocol::{GremlinError, error::StatementError},
    traversal::{Traversal, args::Arg, binder::new_seed, builder::TraversalBuilder},
};

pub trait Statement: Debug + Send + Sync {
    fn build(&self, traversal: Traversal) -> Result<Traversal, GremlinError>;
}

/// `if(c){b}elseif(c){b}else{b}`
///
/// Conditions and bodies are written as text. Clears the graph variable of the
/// traversal it is built onto.
#[derive(Debug, Clone, Default)]
pub struct Conditional {
    if_clause: Option<(Arg, Arg)>,
    elif_clauses: Vec<(Arg, Arg)>,
    else_body: Option<Arg>,
}

impl Conditional {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_if(mut self, condition: impl Into<Arg>, body: impl Into<Arg>) -> Self {
        self.if_clause = Some((condition.into(), body.into()));
        self
    }

    pub fn set_elif(mut self, condition: impl Into<Arg>, body: impl Into<Arg>) -> Self {
        self.elif_clauses.push((condition.into(), body.into()));
        self
    }

    pub fn set_else(mut self, body: impl Into<Arg>) -> Self {
        self.else_body = Some(body.into());
        self
    }
}

impl Statement for Conditional {
    fn build(&self, traversal: Traversal) -> Result<Traversal, GremlinError> {
        let (condition, body) = self.if_clause.clone().ok_or(StatementError::MissingIf)?;

        let mut traversal = traversal
            .with_graph_variable("")
            .call_raw_unbound("if", vec![condition])
            .close(body);

        for (condition, body) in &self.elif_clauses {
            traversal = traversal
                .call_raw_unbound("elseif", vec![condition.clone()])
                .close(body.clone());
        }

        if let Some(body) = &self.else_body {
            traversal = traversal.raw("else").close(body.clone());
        }

        Ok(traversal)
    }
}

impl From<Conditional> for Arg {
    fn from(statement: Conditional) -> Self {
        Arg::Statement(Arc::new(statement))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    Both,
}

impl Direction {
    fn edge_step(&self) -> &'static str {
        match self {
            Direction::In => "inE",
            Direction::Out => "outE",
            Direction::Both => "bothE",
        }
    }

    /// Step leading from the edge to the vertex across from the origin.
    fn vertex_step(&self) -> &'static str {
        match self {
            Direction::In => "outV",
            Direction::Out => "inV",
            Direction::Both => "otherV",
        }
    }
}

impl FromStr for Direction {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "both" => Ok(Direction::Both),
            _ => Err(StatementError::UnsupportedDirection(s.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
            Direction::Both => write!(f, "both"),
        }
    }
}

/// Looks up the edge with `label` between two vertices:
///
/// `V(origin).bothE(label).as('alias').otherV().hasId(destination).select('alias')`
#[derive(Debug, Clone)]
pub struct GetEdge {
    origin: Arg,
    destination: Arg,
    label: Arg,
    direction: Direction,
    alias: String,
    bind: bool,
}

impl GetEdge {
    pub fn new(
        origin: impl Into<Arg>,
        destination: impl Into<Arg>,
        label: impl Into<Arg>,
        direction: Direction,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            label: label.into(),
            direction,
            alias: format!("edge_{}", new_seed(5)),
            bind: true,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Writes ids and label as text, e.g. when they are sub-traversals.
    pub fn unbound(mut self) -> Self {
        self.bind = false;
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Statement for GetEdge {
    fn build(&self, traversal: Traversal) -> Result<Traversal, GremlinError> {
        let alias = format!("'{}'", self.alias);
        let call = |traversal: Traversal, name: &str, arg: &Arg| {
            if self.bind {
                traversal.call(name, vec![arg.clone()])
            } else {
                traversal.call_unbound(name, vec![arg.clone()])
            }
        };

        let traversal = call(traversal, "V", &self.origin);
        let traversal = call(traversal, self.direction.edge_step(), &self.label)
            .call_unbound("as", vec![Arg::from(alias.as_str())])
            .call(self.direction.vertex_step(), vec![]);
        let traversal = call(traversal, "hasId", &self.destination)
            .call_unbound("select", vec![Arg::from(alias)]);

        Ok(traversal)
    }
}

impl From<GetEdge> for Arg {
    fn from(statement: GetEdge) -> Self {
        Arg::Statement(Arc::new(statement))
    }
}
