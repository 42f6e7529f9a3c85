use std::collections::{BTreeSet, HashMap, HashSet};

use crate::api::AbstractParameter;
use crate::binder::{self, Binding};
use crate::error::{ArgumentError, ConfigError};

mod parameter;

pub use parameter::Parameter;
pub(crate) use parameter::{ParamId, Slot, Variant};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line grammar of a callable.
///
/// Compiled once from an ordered parameter list, and read-only afterwards: a signature may be shared and bound
/// against any number of token vectors.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{AbstractParameter, CliSignature, Value};
///
/// let signature = CliSignature::from_abstract(
///     vec![
///         AbstractParameter::positional("one"),
///         AbstractParameter::positional("two").default("2"),
///         AbstractParameter::var_positional("rest"),
///     ],
///     Vec::default(),
/// )
/// .unwrap();
/// assert_eq!(signature.to_string(), "one [--two=STR] [rest...]");
///
/// let binding = signature.bind(&["--two=4", "1", "2", "3"], "program").unwrap();
/// assert_eq!(binding.args, vec![Value::from("1"), Value::from("2"), Value::from("3")]);
/// assert_eq!(binding.kwargs.get("two"), Some(&Value::from("4")));
/// ```
#[derive(Debug, Clone)]
pub struct CliSignature {
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) positional: Vec<ParamId>,
    pub(crate) named: Vec<ParamId>,
    pub(crate) alternate: Vec<ParamId>,
    pub(crate) aliases: HashMap<String, ParamId>,
    pub(crate) required: BTreeSet<ParamId>,
}

impl CliSignature {
    /// Compile the abstract parameters, followed by the `extra` parameters (ex: alternate actions).
    pub fn from_abstract(
        parameters: Vec<AbstractParameter>,
        extra: Vec<Parameter>,
    ) -> Result<Self, ConfigError> {
        let mut compiled = Vec::default();

        for abstract_parameter in &parameters {
            if let Some(parameter) = Parameter::from_abstract(abstract_parameter)? {
                compiled.push(parameter);
            }
        }

        Self::compile(compiled, extra)
    }

    /// Compile the parameters, followed by the `extra` parameters.
    ///
    /// Fails when:
    /// * Two parameters share an alias or an argument name.
    /// * A required positional parameter follows an optional one.
    /// * A catch-all positional parameter is not the last positional parameter.
    pub fn compile(parameters: Vec<Parameter>, extra: Vec<Parameter>) -> Result<Self, ConfigError> {
        let mut ordered: Vec<Parameter> = Vec::default();

        for parameter in parameters.into_iter().chain(extra) {
            let owner = ordered.len();
            let forwarders = match &parameter.variant {
                Variant::Decorated { nested, .. } => nested.forwarders(owner),
                _ => Vec::default(),
            };
            ordered.push(parameter);
            ordered.extend(forwarders);
        }

        let mut names = HashSet::new();
        let mut positional = Vec::default();
        let mut named = Vec::default();
        let mut alternate = Vec::default();
        let mut aliases = HashMap::default();
        let mut required = BTreeSet::default();
        let mut optional: Option<String> = None;
        let mut catch_all: Option<String> = None;
        let mut positional_slots = 0;

        for (id, parameter) in ordered.iter_mut().enumerate() {
            let forwarded = matches!(parameter.variant, Variant::Forwarder { .. });

            if !forwarded && !names.insert(parameter.name.clone()) {
                return Err(ConfigError::DuplicateParameter(parameter.name.clone()));
            }

            if parameter.required {
                required.insert(id);
            }

            if let Variant::Inserter { slot, .. } = &mut parameter.variant {
                if let Slot::Positional(_) = slot {
                    *slot = Slot::Positional(positional_slots);
                    positional_slots += 1;
                }
                continue;
            }

            if parameter.is_positional() {
                if let Some(catch_all) = &catch_all {
                    return Err(ConfigError::CatchAllNotLast(catch_all.clone()));
                }

                if parameter.is_sticky() {
                    catch_all.replace(parameter.name.clone());
                } else if parameter.required {
                    if let Some(optional) = &optional {
                        return Err(ConfigError::RequiredAfterOptional {
                            required: parameter.name.clone(),
                            optional: optional.clone(),
                        });
                    }
                } else if optional.is_none() {
                    optional.replace(parameter.name.clone());
                }

                positional_slots += 1;
                positional.push(id);
            } else {
                for alias in parameter.aliases.iter().chain(parameter.negatives()) {
                    if aliases.insert(alias.clone(), id).is_some() {
                        return Err(ConfigError::DuplicateAlias(alias.clone()));
                    }
                }

                if parameter.is_alternate() {
                    alternate.push(id);
                }

                named.push(id);
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Compiled signature: {} positional, {} named, {} alternate, {} required.",
                positional.len(),
                named.len(),
                alternate.len(),
                required.len()
            );
        }

        Ok(Self {
            parameters: ordered,
            positional,
            named,
            alternate,
            aliases,
            required,
        })
    }

    // One forwarder per named parameter of this (nested) signature, for the decorated parameter `owner`.
    fn forwarders(&self, owner: ParamId) -> Vec<Parameter> {
        self.named
            .iter()
            .map(|target| {
                let parameter = &self.parameters[*target];
                Parameter {
                    name: parameter.name.clone(),
                    aliases: parameter
                        .aliases
                        .iter()
                        .chain(parameter.negatives())
                        .cloned()
                        .collect(),
                    help: parameter.help.clone(),
                    required: false,
                    undocumented: parameter.undocumented,
                    last_option: parameter.last_option,
                    variant: Variant::Forwarder {
                        owner,
                        target: *target,
                    },
                }
            })
            .collect()
    }

    /// Bind the tokens against this signature.
    /// The `invocation` name is the program name (including any sub-command), used by inserters.
    pub fn bind(&self, tokens: &[&str], invocation: &str) -> Result<Binding, ArgumentError> {
        binder::bind(self, tokens, invocation)
    }

    /// The parameters, in declaration order (forwarders directly follow their decorated parameter).
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    /// The positional parameters, in binding order.
    pub fn positional(&self) -> impl Iterator<Item = &Parameter> {
        self.positional.iter().map(|id| &self.parameters[*id])
    }

    /// The named parameters, including alternate actions.
    pub fn named(&self) -> impl Iterator<Item = &Parameter> {
        self.named.iter().map(|id| &self.parameters[*id])
    }

    /// The alternate and fallback actions.
    pub fn alternate(&self) -> impl Iterator<Item = &Parameter> {
        self.alternate.iter().map(|id| &self.parameters[*id])
    }

    /// The parameters which the invocation must satisfy, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &Parameter> {
        self.required.iter().map(|id| &self.parameters[*id])
    }

    /// Find the parameter for a command line alias (ex: `--verbose`).
    pub fn resolve(&self, alias: &str) -> Option<&Parameter> {
        self.aliases.get(alias).map(|id| self.target(*id))
    }

    /// Find a parameter by its display name, following forwarders into decorators.
    pub(crate) fn find(&self, display_name: &str) -> Option<&Parameter> {
        (0..self.parameters.len())
            .map(|id| self.target(id))
            .find(|p| p.display_name() == display_name)
    }

    // The index in the bound positional arguments at which the parameter `name` lands.
    pub(crate) fn slot(&self, name: &str) -> Option<usize> {
        self.parameters
            .iter()
            .filter(|p| {
                p.is_positional()
                    || matches!(
                        p.variant,
                        Variant::Inserter {
                            slot: Slot::Positional(_),
                            ..
                        }
                    )
            })
            .position(|p| p.name == name)
    }

    // The parameter a forwarder ultimately routes to (or the parameter itself).
    pub(crate) fn target(&self, id: ParamId) -> &Parameter {
        match &self.parameters[id].variant {
            Variant::Forwarder { owner, target } => match &self.parameters[*owner].variant {
                Variant::Decorated { nested, .. } => nested.target(*target),
                _ => unreachable!("internal error - forwarder must belong to a decorated parameter"),
            },
            _ => &self.parameters[id],
        }
    }
}

impl std::fmt::Display for CliSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let usage = self
            .parameters
            .iter()
            .filter(|p| p.is_documented() && !p.is_alternate())
            .map(|p| p.usage())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{usage}")
    }
}
