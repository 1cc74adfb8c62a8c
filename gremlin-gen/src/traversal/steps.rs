use core::fmt;
use std::{fmt::Display, ops::Range};

use crate::{
    config::GremlinConfig,
    protocol::GremlinError,
    traversal::{args::Arg, binder::ParamBinder, predicates::PredicateKind},
};

/// Address of a step inside the arena of the traversal that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub(crate) usize);

impl StepId {
    pub const ROOT: StepId = StepId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Text placed in front of a step when it follows another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Period,
    Empty,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Period => ".",
            Separator::Empty => "",
        }
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether literal arguments are lifted into the binding table or written as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bound,
    Unbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Single(i64),
    Range(i64, i64),
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Single(start) => write!(f, "[{start}]"),
            Index::Range(start, stop) => write!(f, "[{start}..{stop}]"),
        }
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl From<i32> for Index {
    fn from(value: i32) -> Self {
        Index::Single(i64::from(value))
    }
}

impl From<i64> for Index {
    fn from(value: i64) -> Self {
        Index::Single(value)
    }
}

impl From<usize> for Index {
    fn from(value: usize) -> Self {
        Index::Single(saturating_i64(value))
    }
}

impl From<Range<i32>> for Index {
    fn from(range: Range<i32>) -> Self {
        Index::Range(i64::from(range.start), i64::from(range.end))
    }
}

impl From<Range<i64>> for Index {
    fn from(range: Range<i64>) -> Self {
        Index::Range(range.start, range.end)
    }
}

impl From<Range<usize>> for Index {
    fn from(range: Range<usize>) -> Self {
        Index::Range(saturating_i64(range.start), saturating_i64(range.end))
    }
}

/// What a function step is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    Name(String),
    /// Named by a predicate, so reserved words render as their keyword.
    Predicate(PredicateKind),
}

impl Callee {
    pub fn name(&self) -> &str {
        match self {
            Callee::Name(name) => name,
            Callee::Predicate(kind) => kind.function_name(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub callee: Callee,
    pub args: Vec<Arg>,
    pub resolution: Resolution,
    pub separator: Separator,
}

impl Function {
    /// A bound call joined with `.`
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            callee: Callee::Name(name.into()),
            args,
            resolution: Resolution::Bound,
            separator: Separator::Period,
        }
    }

    pub fn predicate(kind: PredicateKind, args: Vec<Arg>) -> Self {
        Self {
            callee: Callee::Predicate(kind),
            args,
            resolution: Resolution::Bound,
            separator: Separator::Period,
        }
    }

    pub fn unbound(mut self) -> Self {
        self.resolution = Resolution::Unbound;
        self
    }

    /// Drops the leading `.`
    pub fn raw(mut self) -> Self {
        self.separator = Separator::Empty;
        self
    }

    pub fn name(&self) -> &str {
        self.callee.name()
    }

    fn render(
        &self,
        binder: &mut ParamBinder,
        config: &GremlinConfig,
    ) -> Result<String, GremlinError> {
        let args = self
            .args
            .iter()
            .map(|arg| arg.resolve(binder, self.resolution, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", self.name(), args.join(", ")))
    }
}

#[derive(Debug, Clone)]
pub struct Closure {
    pub body: Arg,
    pub captures: Vec<String>,
}

impl Closure {
    fn render(
        &self,
        binder: &mut ParamBinder,
        config: &GremlinConfig,
    ) -> Result<String, GremlinError> {
        let body = self.body.resolve(binder, Resolution::Unbound, config)?;
        if self.captures.is_empty() {
            Ok(format!("{{{body}}}"))
        } else {
            Ok(format!("{{{} -> {body}}}", self.captures.join(",")))
        }
    }
}

#[derive(Debug, Clone)]
pub enum StepKind {
    /// Root of every chain; its text may be empty.
    GraphVariable(String),
    Attribute(String),
    Function(Function),
    Index(Index),
    Closure(Closure),
    /// Inserted verbatim. Suppresses the separator of the step after it.
    Raw(Arg),
}

/// A link in a traversal's step chain.
#[derive(Debug, Clone)]
pub struct Step {
    pub kind: StepKind,
    pub(crate) next: Option<StepId>,
}

impl Step {
    pub fn new(kind: StepKind) -> Self {
        Self { kind, next: None }
    }

    pub fn graph_variable(text: impl Into<String>) -> Self {
        Self::new(StepKind::GraphVariable(text.into()))
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::new(StepKind::Attribute(name.into()))
    }

    pub fn function(function: Function) -> Self {
        Self::new(StepKind::Function(function))
    }

    pub fn index(index: impl Into<Index>) -> Self {
        Self::new(StepKind::Index(index.into()))
    }

    pub fn closure<I, S>(body: impl Into<Arg>, captures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(StepKind::Closure(Closure {
            body: body.into(),
            captures: captures.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn raw(payload: impl Into<Arg>) -> Self {
        Self::new(StepKind::Raw(payload.into()))
    }

    pub fn next(&self) -> Option<StepId> {
        self.next
    }

    pub fn separator(&self) -> Separator {
        match &self.kind {
            StepKind::Attribute(_) => Separator::Period,
            StepKind::Function(function) => function.separator,
            StepKind::GraphVariable(_)
            | StepKind::Index(_)
            | StepKind::Closure(_)
            | StepKind::Raw(_) => Separator::Empty,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.kind, StepKind::Raw(_))
    }

    pub fn is_graph_variable(&self) -> bool {
        matches!(self.kind, StepKind::GraphVariable(_))
    }

    /// Renders this step alone, binding literal arguments into `binder`.
    pub(crate) fn render(
        &self,
        binder: &mut ParamBinder,
        config: &GremlinConfig,
    ) -> Result<String, GremlinError> {
        match &self.kind {
            StepKind::GraphVariable(text) | StepKind::Attribute(text) => Ok(text.clone()),
            StepKind::Function(function) => function.render(binder, config),
            StepKind::Index(index) => Ok(index.to_string()),
            StepKind::Closure(closure) => closure.render(binder, config),
            StepKind::Raw(payload) => payload.resolve(binder, Resolution::Unbound, config),
        }
    }
}
