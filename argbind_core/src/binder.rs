use std::collections::{BTreeSet, HashMap, HashSet};

use strsim::levenshtein;

use crate::api::InsertContext;
use crate::constant::*;
use crate::error::{ArgumentError, BindError};
use crate::model::{Action, Kwargs, Value};
use crate::signature::{CliSignature, ParamId, Slot, Variant};

mod read;
mod recovery;

use read::Read;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The outcome of binding a token vector against a [`CliSignature`].
///
/// Binding is atomic: a `Binding` is only ever produced for a fully successful bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    /// The alternate action the invocation was redirected to, if any.
    /// When set, `args` holds the tokens which followed the action, and `kwargs` is empty.
    pub func: Option<Action>,
    /// Tokens to append to the displayed program name (ex: the alias of a fired action).
    pub post_name: Vec<String>,
    /// The bound positional values, in order.
    pub args: Vec<Value>,
    /// The bound named values, including the defaults of absent named parameters.
    pub kwargs: Kwargs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sticky {
    // Every positional token is routed to this parameter.
    Parameter(ParamId),
    // Every remaining token is ignored.
    IgnoreAll,
}

/// The scan state of one binding.
/// Decorated parameters bind their decorator's parameters into a child scope, keyed by the decorated parameter.
pub(crate) struct BoundArguments<'s> {
    pub(crate) signature: &'s CliSignature,
    pub(crate) name: String,
    pub(crate) args: Vec<Value>,
    pub(crate) kwargs: Kwargs,
    pub(crate) func: Option<Action>,
    pub(crate) post_name: Vec<String>,
    pub(crate) unsatisfied: BTreeSet<ParamId>,
    pub(crate) sticky: Option<Sticky>,
    pub(crate) pos_arg_only: bool,
    pub(crate) skip: usize,
    pub(crate) seen: HashSet<ParamId>,
    pub(crate) counts: HashMap<ParamId, usize>,
    pub(crate) collected: Vec<Value>,
    pub(crate) children: HashMap<ParamId, BoundArguments<'s>>,
    cursor: usize,
}

pub(crate) fn bind(
    signature: &CliSignature,
    tokens: &[&str],
    invocation: &str,
) -> Result<Binding, ArgumentError> {
    let mut scope = BoundArguments::new(signature, invocation);

    if let Err(error) = scope.scan(tokens) {
        recovery::recover(&mut scope, tokens, error)?;
    }

    scope.finish()
}

impl<'s> BoundArguments<'s> {
    pub(crate) fn new(signature: &'s CliSignature, name: &str) -> Self {
        Self {
            signature,
            name: name.to_string(),
            args: Vec::default(),
            kwargs: Kwargs::default(),
            func: None,
            post_name: Vec::default(),
            unsatisfied: signature.required.clone(),
            sticky: None,
            pos_arg_only: false,
            skip: 0,
            seen: HashSet::default(),
            counts: HashMap::default(),
            collected: Vec::default(),
            children: HashMap::default(),
            cursor: 0,
        }
    }

    fn scan(&mut self, tokens: &[&str]) -> Result<(), ArgumentError> {
        for (index, token) in tokens.iter().enumerate() {
            if self.skip > 0 {
                self.skip -= 1;
                continue;
            }

            if self.pos_arg_only || !token.starts_with('-') || token.len() < 2 {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token {index} '{token}' is positional.");
                }

                self.read_positional(tokens, index)?;
            } else if *token == "--" {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token {index} ends option parsing.");
                }

                self.pos_arg_only = true;
            } else {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token {index} '{token}' is named.");
                }

                let id = self
                    .resolve(token)
                    .map_err(|e| e.with_position(index, token))?;
                self.dispatch(tokens, index, id, token)?;
            }
        }

        Ok(())
    }

    fn read_positional(&mut self, tokens: &[&str], index: usize) -> Result<(), ArgumentError> {
        let id = match self.sticky {
            Some(Sticky::IgnoreAll) => return Ok(()),
            Some(Sticky::Parameter(id)) => id,
            None => match self.signature.positional.get(self.cursor) {
                Some(id) => {
                    self.cursor += 1;
                    *id
                }
                None => {
                    return Err(ArgumentError::from(BindError::TooManyArguments {
                        tokens: tokens[index..].iter().map(|t| t.to_string()).collect(),
                    })
                    .with_position(index, tokens[index]));
                }
            },
        };

        self.dispatch(tokens, index, id, tokens[index])
    }

    // Read the parameter, then any parameters for the remainder of a short option cluster.
    fn dispatch(
        &mut self,
        tokens: &[&str],
        index: usize,
        id: ParamId,
        token: &str,
    ) -> Result<(), ArgumentError> {
        let signature = self.signature;
        let mut id = id;
        let mut current = token.to_string();

        loop {
            let parameter = &signature.parameters[id];
            let outcome = read::read_argument(self, tokens, index, id, &current).map_err(|e| {
                e.with_parameter(parameter.display_name())
                    .with_position(index, tokens[index])
            })?;
            self.unsatisfied.remove(&id);
            self.apply_generic_flags(id);

            match outcome {
                Read::Done => return Ok(()),
                Read::Redispatch(rest) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Redispatching '{rest}' from token {index}.");
                    }

                    id = self
                        .resolve(&rest)
                        .map_err(|e| e.with_position(index, tokens[index]))?;
                    current = rest;
                }
            }
        }
    }

    fn resolve(&self, token: &str) -> Result<ParamId, ArgumentError> {
        let key = lookup_key(token);

        match self.signature.aliases.get(key) {
            Some(id) => Ok(*id),
            None => {
                // Only long options are worth a suggestion; any short alias is one edit from any other.
                let suggestion = if key.starts_with("--") {
                    suggest(key, self.signature.aliases.keys().filter(|a| a.starts_with("--")))
                } else {
                    None
                };

                Err(BindError::UnknownOption {
                    name: key.to_string(),
                    suggestion,
                }
                .into())
            }
        }
    }

    fn apply_generic_flags(&mut self, id: ParamId) {
        if self.signature.parameters[id].last_option {
            self.pos_arg_only = true;
        }
    }

    /// Redirect the invocation to an alternate action, handing it every following token.
    pub(crate) fn fire(&mut self, action: Action, alias: &str, tokens: &[&str], index: usize) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Action '{action}' fired by '{alias}' at token {index}.");
        }

        self.func.replace(action);
        self.post_name.push(alias.to_string());
        self.args = tokens[index + 1..].iter().map(|t| Value::from(*t)).collect();
        self.kwargs.clear();
        self.sticky = None;
        self.skip = tokens.len() - index - 1;
    }

    /// Redirect the invocation to list the values of a mapped parameter, ignoring every following token.
    pub(crate) fn show_list(&mut self, parameter: &str) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Listing the values of '{parameter}'.");
        }

        self.func.replace(Action::ListValues {
            parameter: parameter.to_string(),
        });
        self.args.clear();
        self.kwargs.clear();
        self.sticky.replace(Sticky::IgnoreAll);
        self.pos_arg_only = true;
    }

    pub(crate) fn finish(mut self) -> Result<Binding, ArgumentError> {
        if self.func.is_none() {
            self.complete()?;
        }

        let BoundArguments {
            func,
            post_name,
            args,
            kwargs,
            ..
        } = self;

        Ok(Binding {
            func,
            post_name,
            args,
            kwargs,
        })
    }

    fn complete(&mut self) -> Result<(), ArgumentError> {
        let signature = self.signature;

        if let Some(Sticky::Parameter(id)) = self.sticky {
            if let Variant::MultiPositional { .. } = signature.parameters[id].variant {
                let values = std::mem::take(&mut self.collected);
                self.args.push(Value::List(values));
            }
        }

        for id in &signature.positional[self.cursor..] {
            let parameter = &signature.parameters[*id];

            match &parameter.variant {
                Variant::MultiPositional { .. } if !parameter.required => {
                    self.args.push(Value::List(Vec::default()));
                }
                _ => {
                    if let Some(default) = parameter.default() {
                        self.args.push(default.clone());
                    }
                }
            }
        }

        let mut missing = Vec::default();

        for id in std::mem::take(&mut self.unsatisfied) {
            let parameter = &signature.parameters[id];

            match &parameter.variant {
                Variant::Inserter { inserter, slot } => {
                    let value = inserter.insert(&InsertContext::new(&self.name));

                    match slot {
                        Slot::Positional(k) => {
                            let k = std::cmp::min(*k, self.args.len());
                            self.args.insert(k, value);
                        }
                        Slot::Keyword => {
                            self.kwargs.insert(parameter.name.clone(), value);
                        }
                    }
                }
                _ => missing.push(parameter.display_name().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(BindError::MissingRequiredArguments { names: missing }.into());
        }

        if let Some(owner) = self.children.keys().min() {
            let owner = signature.parameters[*owner].display_name();
            return Err(ArgumentError::from(BindError::DecorationWithoutValue {
                owner: owner.to_string(),
            })
            .with_parameter(owner));
        }

        let mut counts: Vec<(ParamId, usize)> = self.counts.iter().map(|(id, c)| (*id, *c)).collect();
        counts.sort();

        for (id, count) in counts {
            let parameter = &signature.parameters[id];

            if let Some(bound) = parameter.bound() {
                if count < bound.lower() {
                    return Err(ArgumentError::from(BindError::NotEnoughValues {
                        name: parameter.display_name().to_string(),
                        provided: count,
                        expected: bound.lower(),
                    })
                    .with_parameter(parameter.display_name()));
                }
            }
        }

        for id in &signature.named {
            let parameter = &signature.parameters[*id];

            if self.kwargs.contains_key(&parameter.name) {
                continue;
            }

            let value = match &parameter.variant {
                Variant::Flag { default, .. } => Some(Value::Bool(*default)),
                Variant::MultiOption { .. } => Some(Value::List(Vec::default())),
                _ => parameter.default().cloned(),
            };

            if let Some(value) = value {
                self.kwargs.insert(parameter.name.clone(), value);
            }
        }

        Ok(())
    }
}

/// The alias a named token resolves by: the text before any `=` for long options, the first two characters otherwise.
pub(crate) fn lookup_key(token: &str) -> &str {
    if token.starts_with("--") {
        match token.find('=') {
            Some(i) => &token[..i],
            None => token,
        }
    } else {
        match token.char_indices().nth(2) {
            Some((i, _)) => &token[..i],
            None => token,
        }
    }
}

/// The closest candidate to `input`, if any is within the suggestion distance.
pub(crate) fn suggest<'a>(
    input: &str,
    candidates: impl Iterator<Item = &'a String>,
) -> Option<String> {
    candidates
        .map(|candidate| (levenshtein(input, candidate), candidate))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min()
        .map(|(_, candidate)| candidate.clone())
}
