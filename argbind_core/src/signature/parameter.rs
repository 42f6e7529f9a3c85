use crate::api::{AbstractParameter, ArgumentDecorator, Converter, Inserter};
use crate::constant::*;
use crate::error::ConfigError;
use crate::model::{Action, Bound, Flag, Kind, Value};
use crate::signature::CliSignature;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) type ParamId = usize;

/// Where an inserted value lands in the bound arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Positional(usize),
    Keyword,
}

#[derive(Debug, Clone)]
pub(crate) enum Variant {
    Positional {
        converter: Converter,
        default: Option<Value>,
    },
    // The catch-all: splats every value into the positional arguments.
    ExtraPosArgs {
        converter: Converter,
        bound: Bound,
    },
    // Collects its values into a single `Value::List` at its slot.
    MultiPositional {
        converter: Converter,
        bound: Bound,
    },
    Option {
        converter: Converter,
        default: Option<Value>,
    },
    IntOption {
        converter: Converter,
        default: Option<Value>,
    },
    // Binds `true` when given, `false` when negated, and `default` when absent.
    Flag {
        default: bool,
        negatives: Vec<String>,
    },
    MultiOption {
        converter: Converter,
        bound: Bound,
    },
    Command {
        action: Action,
        fallback: bool,
    },
    Decorated {
        inner: Box<Parameter>,
        decorator: ArgumentDecorator,
        nested: Box<CliSignature>,
    },
    // Routes a named token to `target` within the nested signature of the decorated `owner`.
    Forwarder {
        owner: ParamId,
        target: ParamId,
    },
    Inserter {
        inserter: Inserter,
        slot: Slot,
    },
}

/// One node of a compiled command line grammar.
///
/// Parameters are produced from [`AbstractParameter`]s by the signature compiler, or directly for alternate actions
/// (see [`Parameter::alternate`] and [`Parameter::fallback`]).
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) help: Option<String>,
    pub(crate) required: bool,
    pub(crate) undocumented: bool,
    pub(crate) last_option: bool,
    pub(crate) variant: Variant,
}

impl Parameter {
    /// An alternate action: when matched as the very first token, the whole invocation is redirected to `action`.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{Action, CliSignature, Parameter};
    ///
    /// let signature = CliSignature::compile(
    ///     Vec::default(),
    ///     vec![Parameter::alternate(&["license"], Action::Named("license".to_string()), "Show the license.").unwrap()],
    /// )
    /// .unwrap();
    /// let binding = signature.bind(&["--license", "extra"], "program").unwrap();
    /// assert_eq!(binding.func, Some(Action::Named("license".to_string())));
    /// ```
    pub fn alternate(
        aliases: &[&str],
        action: Action,
        help: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::command(aliases, action, help.into(), false)
    }

    /// A fallback action: like an alternate action, but matched anywhere.
    /// When binding otherwise fails, the tokens following the failure are searched for a fallback action to recover with.
    pub fn fallback(
        aliases: &[&str],
        action: Action,
        help: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::command(aliases, action, help.into(), true)
    }

    fn command(
        aliases: &[&str],
        action: Action,
        help: String,
        fallback: bool,
    ) -> Result<Self, ConfigError> {
        let name = match aliases.first() {
            Some(name) => normalize(name),
            None => return Err(ConfigError::EmptyName),
        };

        Ok(Self {
            name,
            aliases: aliases
                .iter()
                .map(|a| dashed(a))
                .collect::<Result<Vec<String>, ConfigError>>()?,
            help: Some(help),
            required: false,
            undocumented: false,
            last_option: false,
            variant: Variant::Command { action, fallback },
        })
    }

    /// Convert an abstract parameter into its command line grammar.
    /// Variadic named parameters have no grammar, and produce `None`.
    pub(crate) fn from_abstract(abstract_parameter: &AbstractParameter) -> Result<Option<Self>, ConfigError> {
        let AbstractParameter {
            name,
            kind,
            default,
            converter,
            aliases,
            help,
            multi,
            decorator,
            inserter,
            ..
        } = abstract_parameter;

        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let force_required = abstract_parameter.has_flag(Flag::Required);
        let mut parameter = Self {
            name: name.clone(),
            aliases: Vec::default(),
            help: help.clone(),
            required: false,
            undocumented: abstract_parameter.has_flag(Flag::Undocumented),
            last_option: abstract_parameter.has_flag(Flag::LastOption),
            variant: Variant::Flag {
                default: false,
                negatives: Vec::default(),
            },
        };

        if let Some(inserter) = inserter {
            parameter.required = true;
            parameter.variant = Variant::Inserter {
                inserter: inserter.clone(),
                slot: match kind {
                    Kind::Positional | Kind::VarPositional => Slot::Positional(0),
                    Kind::Named | Kind::VarNamed => Slot::Keyword,
                },
            };
            return Ok(Some(parameter));
        }

        let positional = match kind {
            Kind::VarNamed => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Skipping variadic named parameter '{name}'.");
                }

                return Ok(None);
            }
            Kind::VarPositional => true,
            Kind::Positional => default.is_none() || abstract_parameter.has_flag(Flag::Positional),
            Kind::Named => false,
        };

        if positional {
            parameter.variant = match (kind, multi) {
                (Kind::VarPositional, _) => {
                    let bound = required_bound(multi.unwrap_or(Bound::Lower(0)), force_required);
                    parameter.required = bound.lower() > 0;
                    Variant::ExtraPosArgs {
                        converter: converter.clone(),
                        bound,
                    }
                }
                (_, Some(bound)) => {
                    let bound = required_bound(*bound, force_required);
                    parameter.required = bound.lower() > 0;
                    Variant::MultiPositional {
                        converter: converter.clone(),
                        bound,
                    }
                }
                (_, None) => {
                    parameter.required = default.is_none() || force_required;
                    Variant::Positional {
                        converter: converter.clone(),
                        default: default.clone(),
                    }
                }
            };
        } else {
            parameter.aliases.push(dashed(name)?);
            for alias in aliases {
                parameter.aliases.push(dashed(alias)?);
            }

            let boolean_default = match default {
                Some(Value::Bool(b)) => Some(*b),
                _ => None,
            };

            parameter.variant = if converter.is_boolean() || boolean_default.is_some() {
                parameter.required = force_required;
                Variant::Flag {
                    default: boolean_default.unwrap_or(false),
                    negatives: parameter
                        .aliases
                        .iter()
                        .filter_map(|a| a.strip_prefix("--"))
                        .map(|a| format!("--{NEGATIVE_PREFIX}{a}"))
                        .collect(),
                }
            } else if let Some(bound) = multi {
                let bound = required_bound(*bound, force_required);
                parameter.required = bound.lower() > 0;
                Variant::MultiOption {
                    converter: converter.clone(),
                    bound,
                }
            } else if converter.is_integer() {
                parameter.required = default.is_none() || force_required;
                Variant::IntOption {
                    converter: converter.clone(),
                    default: default.clone(),
                }
            } else {
                parameter.required = default.is_none() || force_required;
                Variant::Option {
                    converter: converter.clone(),
                    default: default.clone(),
                }
            };
        }

        match decorator {
            Some(decorator) => Ok(Some(parameter.decorate(decorator)?)),
            None => Ok(Some(parameter)),
        }
    }

    fn decorate(self, decorator: &ArgumentDecorator) -> Result<Self, ConfigError> {
        if !matches!(
            self.variant,
            Variant::Positional { .. } | Variant::Option { .. } | Variant::IntOption { .. }
        ) {
            return Err(ConfigError::InvalidDecorator {
                name: self.name,
                reason: "only single valued positionals and options may be decorated".to_string(),
            });
        }

        if let Some(inner) = decorator.parameters.iter().find(|p| p.kind() != Kind::Named) {
            return Err(ConfigError::InvalidDecorator {
                name: self.name,
                reason: format!("decorator parameter '{}' must be named", inner.name()),
            });
        }

        let nested = CliSignature::from_abstract(decorator.parameters.clone(), Vec::default())?;

        Ok(Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            help: self.help.clone(),
            required: self.required,
            undocumented: self.undocumented,
            last_option: self.last_option,
            variant: Variant::Decorated {
                inner: Box::new(self),
                decorator: decorator.clone(),
                nested: Box::new(nested),
            },
        })
    }

    /// The name shown to the user: the argument name for positionals, the canonical alias for named parameters.
    pub fn display_name(&self) -> &str {
        self.aliases.first().unwrap_or(&self.name)
    }

    /// The argument name, under which named values are bound.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every alias, canonical first.
    /// Empty for positional parameters.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The help message, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Whether the invocation must satisfy this parameter.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether this parameter is hidden from usage and help output.
    pub fn is_undocumented(&self) -> bool {
        self.undocumented
    }

    /// The short type label of the value (ex: `INT`), for parameters which take one.
    pub fn type_label(&self) -> Option<&str> {
        self.converter().map(Converter::label)
    }

    /// The default value, for parameters which declare one.
    pub fn default(&self) -> Option<&Value> {
        match &self.variant {
            Variant::Positional { default, .. }
            | Variant::Option { default, .. }
            | Variant::IntOption { default, .. } => default.as_ref(),
            Variant::Decorated { inner, .. } => inner.default(),
            _ => None,
        }
    }

    pub(crate) fn converter(&self) -> Option<&Converter> {
        match &self.variant {
            Variant::Positional { converter, .. }
            | Variant::ExtraPosArgs { converter, .. }
            | Variant::MultiPositional { converter, .. }
            | Variant::Option { converter, .. }
            | Variant::IntOption { converter, .. }
            | Variant::MultiOption { converter, .. } => Some(converter),
            Variant::Decorated { inner, .. } => inner.converter(),
            _ => None,
        }
    }

    pub(crate) fn bound(&self) -> Option<Bound> {
        match &self.variant {
            Variant::ExtraPosArgs { bound, .. }
            | Variant::MultiPositional { bound, .. }
            | Variant::MultiOption { bound, .. } => Some(*bound),
            _ => None,
        }
    }

    pub(crate) fn is_positional(&self) -> bool {
        self.aliases.is_empty() && !matches!(self.variant, Variant::Inserter { .. })
    }

    pub(crate) fn is_sticky(&self) -> bool {
        matches!(
            self.variant,
            Variant::ExtraPosArgs { .. } | Variant::MultiPositional { .. }
        )
    }

    pub(crate) fn is_alternate(&self) -> bool {
        matches!(self.variant, Variant::Command { .. })
    }

    pub(crate) fn is_documented(&self) -> bool {
        !self.undocumented
            && !matches!(
                self.variant,
                Variant::Forwarder { .. } | Variant::Inserter { .. }
            )
    }

    pub(crate) fn negatives(&self) -> &[String] {
        match &self.variant {
            Variant::Flag { negatives, .. } => negatives,
            _ => &[],
        }
    }

    /// The grammar of the parameter, without the optional brackets.
    pub(crate) fn grammar(&self) -> String {
        let label = self.type_label().unwrap_or_default();

        match &self.variant {
            Variant::Positional { .. } => self.name.clone(),
            Variant::ExtraPosArgs { .. } | Variant::MultiPositional { .. } => {
                format!("{}...", self.name)
            }
            Variant::Option { .. } | Variant::IntOption { .. } => option_grammar(self.display_name(), label),
            Variant::MultiOption { .. } => format!("{}...", option_grammar(self.display_name(), label)),
            Variant::Flag { .. } | Variant::Command { .. } => self.display_name().to_string(),
            Variant::Decorated { inner, .. } => inner.grammar(),
            Variant::Forwarder { .. } | Variant::Inserter { .. } => String::default(),
        }
    }

    /// The one-line usage fragment of this parameter.
    pub(crate) fn usage(&self) -> String {
        match &self.variant {
            Variant::Decorated { inner, nested, .. } => {
                let decorations = nested.to_string();

                if decorations.is_empty() {
                    inner.usage()
                } else {
                    format!("{decorations} {}", inner.usage())
                }
            }
            _ if self.required => self.grammar(),
            _ => format!("[{}]", self.grammar()),
        }
    }
}

fn option_grammar(alias: &str, label: &str) -> String {
    if alias.starts_with("--") {
        format!("{alias}={label}")
    } else {
        format!("{alias} {label}")
    }
}

fn required_bound(bound: Bound, force_required: bool) -> Bound {
    if force_required {
        bound.at_least(1)
    } else {
        bound
    }
}

fn normalize(name: &str) -> String {
    name.replace('_', "-")
}

/// Render an alias in its command line form: `-x` for one character, `--xyz` otherwise.
pub(crate) fn dashed(alias: &str) -> Result<String, ConfigError> {
    let alias = normalize(alias);

    if alias.is_empty()
        || alias.starts_with('-')
        || alias.contains('=')
        || alias.contains(char::is_whitespace)
    {
        return Err(ConfigError::InvalidAlias(alias));
    }

    if alias.chars().count() == 1 {
        Ok(format!("-{alias}"))
    } else {
        Ok(format!("--{alias}"))
    }
}
