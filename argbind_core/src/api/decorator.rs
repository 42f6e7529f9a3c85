use std::sync::Arc;

use crate::api::AbstractParameter;
use crate::model::{Kwargs, Value};

type DecorateFn = Arc<dyn Fn(Value, &Kwargs) -> Result<Value, String> + Send + Sync>;
type InsertFn = Arc<dyn Fn(&InsertContext) -> Value + Send + Sync>;

/// Post-processes the value of the parameter it is attached to.
///
/// The decorator declares its own named parameters.
/// These appear on the command line alongside the decorated parameter, and are bound into a scope private to it.
/// Once the decorated parameter itself is read, the decorator function receives its converted value along with those
/// privately bound values, and produces the final value.
///
/// Decorator parameters may themselves be decorated, to any depth.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{AbstractParameter, ArgumentDecorator, Value};
///
/// let upper = ArgumentDecorator::new(|value, kwargs| {
///     let text = value.to_string();
///     match kwargs.get("upper") {
///         Some(Value::Bool(true)) => Ok(Value::Str(text.to_uppercase())),
///         _ => Ok(Value::Str(text)),
///     }
/// })
/// .add(AbstractParameter::named("upper").alias("u").default(false));
/// let word = AbstractParameter::positional("word").decorated(upper);
/// ```
#[derive(Clone)]
pub struct ArgumentDecorator {
    pub(crate) parameters: Vec<AbstractParameter>,
    function: DecorateFn,
}

impl std::fmt::Debug for ArgumentDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentDecorator")
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl ArgumentDecorator {
    /// Create an argument decorator from its function.
    /// An `Err` is reported to the user as a bad value for the decorated parameter.
    pub fn new(
        function: impl Fn(Value, &Kwargs) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parameters: Vec::default(),
            function: Arc::new(function),
        }
    }

    /// Declare a parameter of the decorator.
    /// Decorator parameters must be named; they are bound by name only.
    pub fn add(mut self, parameter: AbstractParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub(crate) fn apply(&self, value: Value, kwargs: &Kwargs) -> Result<Value, String> {
        (self.function)(value, kwargs)
    }
}

/// What an [`Inserter`] knows about the invocation.
#[derive(Debug)]
pub struct InsertContext<'a> {
    invocation: &'a str,
}

impl<'a> InsertContext<'a> {
    pub(crate) fn new(invocation: &'a str) -> Self {
        Self { invocation }
    }

    /// The name the program was invoked as (including any sub-command).
    pub fn invocation(&self) -> &str {
        self.invocation
    }
}

/// Computes a parameter's value at bind time, without reading any tokens.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{AbstractParameter, Inserter};
///
/// let name = AbstractParameter::positional("name").inserter(Inserter::invocation_name());
/// ```
#[derive(Clone)]
pub struct Inserter(InsertFn);

impl std::fmt::Debug for Inserter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Inserter").finish()
    }
}

impl Inserter {
    /// Create an inserter from its function.
    pub fn new(function: impl Fn(&InsertContext) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(function))
    }

    /// Insert the invocation name as a `Value::Str`.
    pub fn invocation_name() -> Self {
        Self::new(|context| Value::from(context.invocation()))
    }

    pub(crate) fn insert(&self, context: &InsertContext) -> Value {
        (self.0)(context)
    }
}
