use std::collections::BTreeMap;

/// A coerced command line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, the result of the identity conversion.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean, as produced by flags.
    Bool(bool),
    /// An ordered collection, as produced by multi-valued parameters.
    List(Vec<Value>),
}

impl Value {
    /// View this value as text, if it is a `Value::Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as an integer, if it is a `Value::Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View this value as a boolean, if it is a `Value::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// View this value as a list, if it is a `Value::List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => write!(
                f,
                "[{}]",
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// The bound named values, keyed by argument name.
pub type Kwargs = BTreeMap<String, Value>;

/// How a parameter is declared on the callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Bound by position (or by name, when it declares a default).
    Positional,
    /// Collects every remaining positional value.
    VarPositional,
    /// Bound by name only.
    Named,
    /// Collects unknown named values; has no command line grammar.
    VarNamed,
}

/// Generic markers applicable to any parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The parameter must be given, even though it would otherwise be optional.
    Required,
    /// Once read, every following token is positional.
    LastOption,
    /// The parameter does not appear in usage or help output.
    Undocumented,
    /// The parameter stays positional even when it declares a default.
    Positional,
}

/// The cardinality of a multi-valued parameter.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Between `min` and `max` values, inclusive.
    Range(usize, usize),
    /// At least `min` values.
    Lower(usize),
}

impl Bound {
    /// The minimum number of values.
    pub fn lower(&self) -> usize {
        match self {
            Bound::Range(n, _) => *n,
            Bound::Lower(n) => *n,
        }
    }

    /// The maximum number of values, if there is one.
    pub fn upper(&self) -> Option<usize> {
        match self {
            Bound::Range(_, n) => Some(*n),
            Bound::Lower(_) => None,
        }
    }

    pub(crate) fn at_least(self, minimum: usize) -> Self {
        match self {
            Bound::Range(n, m) => Bound::Range(std::cmp::max(n, minimum), std::cmp::max(m, minimum)),
            Bound::Lower(n) => Bound::Lower(std::cmp::max(n, minimum)),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Range(n, m) if n == m => write!(f, "{n}"),
            Bound::Range(n, m) => write!(f, "{n}..{m}"),
            Bound::Lower(n) => write!(f, "{n}.."),
        }
    }
}

/// The alternate target an invocation was redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Display the help message.
    Help,
    /// Display the program version.
    Version,
    /// Display the accepted values of a mapped parameter.
    ListValues {
        /// The display name of the mapped parameter.
        parameter: String,
    },
    /// A user-defined alternate action or sub-command.
    Named(String),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Help => write!(f, "help"),
            Action::Version => write!(f, "version"),
            Action::ListValues { parameter } => write!(f, "list values of {parameter}"),
            Action::Named(name) => write!(f, "{name}"),
        }
    }
}
