use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::traversal::steps::StepId;

#[derive(Debug, Error)]
pub enum GremlinError {
    #[error("{0}")]
    Statement(#[from] StatementError),
    #[error("{0}")]
    Step(#[from] StepError),
    #[error("{0}")]
    Predicate(#[from] PredicateError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Couldn't serialize request: {0}")]
    Serialize(#[from] sonic_rs::Error),
}

impl Serialize for GremlinError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.to_string())
    }
}

impl GremlinError {
    pub fn code(&self) -> &'static str {
        match self {
            GremlinError::Statement(_) => "STATEMENT_ERROR",
            GremlinError::Step(_) => "STEP_ERROR",
            GremlinError::Predicate(_) => "PREDICATE_ERROR",
            GremlinError::Config(_) => "CONFIG_ERROR",
            GremlinError::Serialize(_) => "SERIALIZE_ERROR",
        }
    }
}

/// Raised while a statement is applied to a traversal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("Conditional statement needs both an if clause and a body")]
    MissingIf,
    #[error("Unsupported edge direction `{0}`, expected one of: in, out, both")]
    UnsupportedDirection(String),
}

/// Step chain precondition violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Step chain does not terminate")]
    MalformedChain,
    #[error("Step chain links to missing step {0}")]
    Dangling(StepId),
    #[error("The graph variable step can't be removed")]
    RootRemoval,
    #[error("Step {0} is not part of this traversal")]
    NotInChain(StepId),
    #[error("Step {0} is not an attribute and can't be invoked")]
    NotCallable(StepId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredicateError {
    #[error("Unknown predicate `{0}`")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Couldn't read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Couldn't write config: {0}")]
    Write(#[from] toml::ser::Error),
    #[error("Seed length must be between 1 and 32, got {0}")]
    InvalidSeedLength(usize),
}
