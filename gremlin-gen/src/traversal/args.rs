use std::sync::Arc;

use crate::{
    config::GremlinConfig,
    protocol::{GremlinError, Value},
    traversal::{
        Traversal, TraversalBuilder,
        binder::{Param, ParamBinder},
        predicates::Predicate,
        statements::Statement,
        steps::Resolution,
    },
};

/// Builds a `Vec<Arg>` from anything convertible into [`Arg`].
///
/// ```
/// use gremlin_gen::{args, traversal::args::Arg};
///
/// let args: Vec<Arg> = args!["name", 29, true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::traversal::args::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::traversal::args::Arg::from($arg)),+]
    };
}

/// An argument handed to a step. Resolved to text when the owning traversal renders.
#[derive(Debug, Clone)]
pub enum Arg {
    Literal(Value),
    /// Always bound under its own name.
    Param(Param),
    Traversal(Box<Traversal>),
    Predicate(Box<Predicate>),
    /// Built onto a fresh traversal at render time.
    Statement(Arc<dyn Statement>),
    /// Rendered as a `[a, b]` list.
    Seq(Vec<Arg>),
}

impl Arg {
    pub fn is_predicate(&self) -> bool {
        matches!(self, Arg::Predicate(_))
    }

    pub fn statement(statement: impl Statement + 'static) -> Self {
        Arg::Statement(Arc::new(statement))
    }

    pub(crate) fn resolve(
        &self,
        binder: &mut ParamBinder,
        resolution: Resolution,
        config: &GremlinConfig,
    ) -> Result<String, GremlinError> {
        match self {
            Arg::Param(param) => Ok(binder.bind_param(param).name),
            Arg::Traversal(traversal) => traversal.render_nested(binder),
            Arg::Predicate(predicate) => predicate.traversal().render_nested(binder),
            Arg::Statement(statement) => statement
                .build(Traversal::with_config(config.clone()))?
                .render_nested(binder),
            Arg::Seq(items) => {
                let items = items
                    .iter()
                    .map(|item| item.resolve(binder, resolution, config))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", items.join(", ")))
            }
            Arg::Literal(value) => match resolution {
                Resolution::Bound => Ok(binder.bind(value.clone(), None).name),
                Resolution::Unbound => Ok(value.to_string()),
            },
        }
    }
}

macro_rules! literal_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_arg!(
    &str, String, &String, bool, f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, u128,
);

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Literal(value)
    }
}

impl From<Param> for Arg {
    fn from(param: Param) -> Self {
        Arg::Param(param)
    }
}

impl From<&Param> for Arg {
    fn from(param: &Param) -> Self {
        Arg::Param(param.clone())
    }
}

impl From<Traversal> for Arg {
    fn from(traversal: Traversal) -> Self {
        Arg::Traversal(Box::new(traversal))
    }
}

impl From<Predicate> for Arg {
    fn from(predicate: Predicate) -> Self {
        Arg::Predicate(Box::new(predicate))
    }
}

impl From<Arc<dyn Statement>> for Arg {
    fn from(statement: Arc<dyn Statement>) -> Self {
        Arg::Statement(statement)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::Seq(items.into_iter().map(Into::into).collect())
    }
}
