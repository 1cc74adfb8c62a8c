use core::fmt;
use std::{fmt::Display, str::FromStr};

use crate::{
    config::GremlinConfig,
    protocol::{GremlinError, RenderedQuery, error::PredicateError},
    traversal::{
        Traversal,
        args::Arg,
        builder::TraversalBuilder,
        steps::{Function, Step},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    P,
    Pp,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Inside,
    Outside,
    Between,
    Within,
    Without,
    Not,
    Is,
    Select,
    As,
    And,
    In,
    Custom(String),
}

impl PredicateKind {
    pub fn custom(name: impl Into<String>) -> Self {
        PredicateKind::Custom(name.into())
    }

    /// Name the predicate is declared under. `NOT`, `IS`, `AS`, `AND` and `IN` are
    /// upper case so they don't collide with host keywords.
    pub fn declared_name(&self) -> &str {
        match self {
            PredicateKind::P => "p",
            PredicateKind::Pp => "pp",
            PredicateKind::Eq => "eq",
            PredicateKind::Neq => "neq",
            PredicateKind::Lt => "lt",
            PredicateKind::Lte => "lte",
            PredicateKind::Gt => "gt",
            PredicateKind::Gte => "gte",
            PredicateKind::Inside => "inside",
            PredicateKind::Outside => "outside",
            PredicateKind::Between => "between",
            PredicateKind::Within => "within",
            PredicateKind::Without => "without",
            PredicateKind::Not => "NOT",
            PredicateKind::Is => "IS",
            PredicateKind::Select => "select",
            PredicateKind::As => "AS",
            PredicateKind::And => "AND",
            PredicateKind::In => "IN",
            PredicateKind::Custom(name) => name,
        }
    }

    /// Name written into the query.
    pub fn function_name(&self) -> &str {
        match self {
            PredicateKind::Not => "not",
            PredicateKind::Is => "is",
            PredicateKind::As => "as",
            PredicateKind::And => "and",
            PredicateKind::In => "in",
            other => other.declared_name(),
        }
    }
}

impl FromStr for PredicateKind {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p" => Ok(PredicateKind::P),
            "pp" => Ok(PredicateKind::Pp),
            "eq" => Ok(PredicateKind::Eq),
            "neq" => Ok(PredicateKind::Neq),
            "lt" => Ok(PredicateKind::Lt),
            "lte" => Ok(PredicateKind::Lte),
            "gt" => Ok(PredicateKind::Gt),
            "gte" => Ok(PredicateKind::Gte),
            "inside" => Ok(PredicateKind::Inside),
            "outside" => Ok(PredicateKind::Outside),
            "between" => Ok(PredicateKind::Between),
            "within" => Ok(PredicateKind::Within),
            "without" => Ok(PredicateKind::Without),
            "NOT" => Ok(PredicateKind::Not),
            "IS" => Ok(PredicateKind::Is),
            "select" => Ok(PredicateKind::Select),
            "AS" => Ok(PredicateKind::As),
            "AND" => Ok(PredicateKind::And),
            "IN" => Ok(PredicateKind::In),
            other => Err(PredicateError::Unknown(other.to_string())),
        }
    }
}

impl Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function_name())
    }
}

/// A single named condition, e.g. `lt(P)`, usable wherever an argument is.
///
/// It is a traversal with an empty graph variable whose first step calls the
/// predicate, so further steps can be chained onto it: `lt(P).out()`.
#[derive(Debug, Clone)]
pub struct Predicate {
    kind: PredicateKind,
    traversal: Traversal,
}

impl Predicate {
    pub fn new(kind: PredicateKind, args: Vec<Arg>) -> Self {
        Self::with_config(kind, args, GremlinConfig::default())
    }

    pub fn with_config(kind: PredicateKind, args: Vec<Arg>, config: GremlinConfig) -> Self {
        let mut traversal = Traversal::with_config(config);
        traversal.set_graph_variable("");
        traversal.push_step(Step::function(Function::predicate(kind.clone(), args)));
        Self { kind, traversal }
    }

    /// A predicate outside the built-in set, rendered under `name` as given.
    pub fn custom(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::custom(name), args)
    }

    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    pub fn into_traversal(self) -> Traversal {
        self.traversal
    }

    pub fn render(&self) -> Result<RenderedQuery, GremlinError> {
        self.traversal.render()
    }

    pub fn p(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::P, args)
    }

    pub fn pp(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Pp, args)
    }

    pub fn eq(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Eq, vec![value.into()])
    }

    pub fn neq(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Neq, vec![value.into()])
    }

    pub fn lt(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Lt, vec![value.into()])
    }

    pub fn lte(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Lte, vec![value.into()])
    }

    pub fn gt(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Gt, vec![value.into()])
    }

    pub fn gte(value: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Gte, vec![value.into()])
    }

    pub fn inside(low: impl Into<Arg>, high: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Inside, vec![low.into(), high.into()])
    }

    pub fn outside(low: impl Into<Arg>, high: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Outside, vec![low.into(), high.into()])
    }

    pub fn between(low: impl Into<Arg>, high: impl Into<Arg>) -> Self {
        Self::new(PredicateKind::Between, vec![low.into(), high.into()])
    }

    pub fn within(values: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Within, values)
    }

    pub fn without(values: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Without, values)
    }

    pub fn not(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Not, args)
    }

    pub fn is(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Is, args)
    }

    pub fn select(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::Select, args)
    }

    pub fn as_(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::As, args)
    }

    pub fn and(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::And, args)
    }

    pub fn in_(args: Vec<Arg>) -> Self {
        Self::new(PredicateKind::In, args)
    }
}

impl TraversalBuilder for Predicate {
    fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    fn traversal_mut(&mut self) -> &mut Traversal {
        &mut self.traversal
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.traversal)
    }
}
