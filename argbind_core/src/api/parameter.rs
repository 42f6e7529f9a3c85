use std::collections::HashSet;

use crate::api::{ArgumentDecorator, Converter, Inserter};
use crate::model::{Bound, Flag, Kind, Value};

/// A normalized description of one parameter of a callable.
///
/// This is the input to the signature compiler: it describes *what the callable declares*, and the compiler decides
/// which command line grammar that maps to.
/// * A `Kind::Positional` without a default becomes a positional argument.
/// With a default it becomes an option (`--name=VALUE`), unless marked with [`Flag::Positional`].
/// * A `Kind::VarPositional` becomes a catch-all, absorbing every remaining positional token.
/// * A `Kind::Named` becomes an option; a flag if its converter is [`Converter::boolean`] or its default is a boolean.
/// * A `Kind::VarNamed` has no command line grammar.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{AbstractParameter, Converter, Flag};
///
/// let count = AbstractParameter::named("count")
///     .alias("n")
///     .converter(Converter::integer())
///     .default(1_i64)
///     .help("How many times to repeat.");
/// let files = AbstractParameter::var_positional("files").flag(Flag::Required);
/// assert_eq!(count.name(), "count");
/// assert!(files.has_flag(Flag::Required));
/// ```
#[derive(Debug, Clone)]
pub struct AbstractParameter {
    pub(crate) name: String,
    pub(crate) kind: Kind,
    pub(crate) default: Option<Value>,
    pub(crate) converter: Converter,
    pub(crate) aliases: Vec<String>,
    pub(crate) flags: HashSet<Flag>,
    pub(crate) help: Option<String>,
    pub(crate) multi: Option<Bound>,
    pub(crate) decorator: Option<ArgumentDecorator>,
    pub(crate) inserter: Option<Inserter>,
}

impl AbstractParameter {
    /// Describe a parameter of the given kind.
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            converter: Converter::default(),
            aliases: Vec::default(),
            flags: HashSet::default(),
            help: None,
            multi: None,
            decorator: None,
            inserter: None,
        }
    }

    /// Describe a `Kind::Positional` parameter.
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Positional)
    }

    /// Describe a `Kind::VarPositional` parameter.
    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, Kind::VarPositional)
    }

    /// Describe a `Kind::Named` parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Named)
    }

    /// Describe a `Kind::VarNamed` parameter.
    pub fn var_named(name: impl Into<String>) -> Self {
        Self::new(name, Kind::VarNamed)
    }

    /// Declare the default value.
    /// If repeated, only the final default will apply.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Declare the coercion applied to the raw token(s).
    /// If repeated, only the final converter will apply.
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// Add an alternate name.
    /// One character aliases are used as `-x`, longer ones as `--xyz`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add a generic flag.
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Document the parameter.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Accept this parameter repeatedly, collecting the values into a `Value::List` within `bound`.
    pub fn multi(mut self, bound: Bound) -> Self {
        self.multi.replace(bound);
        self
    }

    /// Post-process the value through an argument decorator, which contributes its own options.
    pub fn decorated(mut self, decorator: ArgumentDecorator) -> Self {
        self.decorator.replace(decorator);
        self
    }

    /// Never read this parameter from the command line; compute its value at bind time.
    pub fn inserter(mut self, inserter: Inserter) -> Self {
        self.inserter.replace(inserter);
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether the generic flag is set.
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}
