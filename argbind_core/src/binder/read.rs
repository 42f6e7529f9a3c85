use crate::api::{Coerced, Converter};
use crate::binder::{lookup_key, BoundArguments, Sticky};
use crate::constant::*;
use crate::error::{ArgumentError, BindError};
use crate::model::{Action, Bound, Value};
use crate::signature::{CliSignature, ParamId, Parameter, Variant};

/// What remains of the token once a parameter has been read.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Read {
    Done,
    // The rest of a short option cluster, to be resolved as its own option (ex: `-xyz` -> `-yz`).
    Redispatch(String),
}

struct Extracted {
    raw: String,
    skip: usize,
    rest: Option<String>,
}

impl Extracted {
    fn whole(token: &str) -> Self {
        Self {
            raw: token.to_string(),
            skip: 0,
            rest: None,
        }
    }

    fn outcome(self) -> Read {
        match self.rest {
            Some(rest) => Read::Redispatch(rest),
            None => Read::Done,
        }
    }
}

/// Read the parameter `id` from `token` (the token at `index`, or what remains of it within a short option cluster).
pub(crate) fn read_argument<'s>(
    scope: &mut BoundArguments<'s>,
    tokens: &[&str],
    index: usize,
    id: ParamId,
    token: &str,
) -> Result<Read, ArgumentError> {
    let signature: &'s CliSignature = scope.signature;
    let parameter = &signature.parameters[id];

    match &parameter.variant {
        Variant::Positional { converter, .. } => {
            if let Some(value) = coerce(scope, parameter, converter, token)? {
                scope.args.push(value);
            }

            Ok(Read::Done)
        }
        Variant::ExtraPosArgs { converter, bound } => {
            count_value(scope, parameter, id, *bound)?;
            scope.sticky.replace(Sticky::Parameter(id));

            if let Some(value) = coerce(scope, parameter, converter, token)? {
                scope.args.push(value);
            }

            Ok(Read::Done)
        }
        Variant::MultiPositional { converter, bound } => {
            count_value(scope, parameter, id, *bound)?;
            scope.sticky.replace(Sticky::Parameter(id));

            if let Some(value) = coerce(scope, parameter, converter, token)? {
                scope.collected.push(value);
            }

            Ok(Read::Done)
        }
        Variant::Option { converter, .. } | Variant::IntOption { converter, .. } => {
            not_seen(scope, parameter, id)?;
            let integer = matches!(parameter.variant, Variant::IntOption { .. });
            let extracted = extract(token, tokens, index, parameter, integer)?;
            scope.skip = extracted.skip;
            scope.seen.insert(id);

            if let Some(value) = coerce(scope, parameter, converter, &extracted.raw)? {
                scope.kwargs.insert(parameter.name.clone(), value);
            }

            Ok(extracted.outcome())
        }
        Variant::Flag { negatives, .. } => {
            not_seen(scope, parameter, id)?;
            scope.seen.insert(id);
            let key = lookup_key(token);

            if !token.starts_with("--") {
                scope.kwargs.insert(parameter.name.clone(), Value::Bool(true));
                let rest = &token[key.len()..];

                return if rest.is_empty() {
                    Ok(Read::Done)
                } else {
                    Ok(Read::Redispatch(format!("-{rest}")))
                };
            }

            let glued = token[key.len()..].strip_prefix('=');
            let value = if negatives.iter().any(|n| n == key) {
                if let Some(glued) = glued {
                    return Err(BindError::BadArgumentFormat {
                        value: glued.to_string(),
                        message: format!("the negated flag '{key}' does not take a value."),
                    }
                    .into());
                }

                false
            } else {
                match glued {
                    Some(glued) => {
                        let lowered = glued.to_lowercase();
                        !(lowered.is_empty() || FALSE_WORDS.contains(&lowered.as_str()))
                    }
                    None => true,
                }
            };

            scope.kwargs.insert(parameter.name.clone(), Value::Bool(value));
            Ok(Read::Done)
        }
        Variant::MultiOption { converter, bound } => {
            count_value(scope, parameter, id, *bound)?;
            let extracted = extract(token, tokens, index, parameter, false)?;
            scope.skip = extracted.skip;

            if let Some(value) = coerce(scope, parameter, converter, &extracted.raw)? {
                match scope
                    .kwargs
                    .entry(parameter.name.clone())
                    .or_insert_with(|| Value::List(Vec::default()))
                {
                    Value::List(values) => values.push(value),
                    _ => unreachable!("internal error - multi option must bind a list"),
                }
            }

            Ok(extracted.outcome())
        }
        Variant::Command { action, fallback } => {
            if !fallback && index > 0 {
                return Err(BindError::ArgsBeforeAlternateCommand {
                    name: parameter.display_name().to_string(),
                }
                .into());
            }

            scope.fire(action.clone(), lookup_key(token), tokens, index);
            Ok(Read::Done)
        }
        Variant::Decorated {
            inner,
            decorator,
            nested,
        } => {
            let (converter, extracted) = match &inner.variant {
                Variant::Positional { converter, .. } => (converter, Extracted::whole(token)),
                Variant::Option { converter, .. } | Variant::IntOption { converter, .. } => {
                    not_seen(scope, parameter, id)?;
                    let integer = matches!(inner.variant, Variant::IntOption { .. });
                    let extracted = extract(token, tokens, index, parameter, integer)?;
                    scope.skip = extracted.skip;
                    (converter, extracted)
                }
                _ => unreachable!("internal error - only single valued parameters may be decorated"),
            };
            scope.seen.insert(id);

            let value = match coerce(scope, parameter, converter, &extracted.raw)? {
                Some(value) => value,
                None => return Ok(Read::Done),
            };

            let child = match scope.children.remove(&id) {
                Some(child) => child,
                None => BoundArguments::new(&**nested, &scope.name),
            };
            let decorations = child.finish().map_err(|e| match e.error() {
                BindError::MissingRequiredArguments { .. } => {
                    ArgumentError::from(BindError::MissingRequiredArguments {
                        names: vec![parameter.display_name().to_string()],
                    })
                }
                _ => e,
            })?;

            let value = decorator
                .apply(value, &decorations.kwargs)
                .map_err(|message| BindError::BadArgumentFormat {
                    value: extracted.raw.clone(),
                    message,
                })?;

            if inner.is_positional() {
                scope.args.push(value);
            } else {
                scope.kwargs.insert(parameter.name.clone(), value);
            }

            Ok(extracted.outcome())
        }
        Variant::Forwarder { owner, target } => {
            // The decorated value has been read, so its decorations are closed.
            if scope.seen.contains(owner) {
                return Err(BindError::DecorationAfterValue {
                    name: parameter.display_name().to_string(),
                    owner: signature.parameters[*owner].display_name().to_string(),
                }
                .into());
            }

            let nested: &'s CliSignature = match &signature.parameters[*owner].variant {
                Variant::Decorated { nested, .. } => &**nested,
                _ => unreachable!("internal error - forwarder must belong to a decorated parameter"),
            };
            let name = scope.name.clone();
            let child = scope
                .children
                .entry(*owner)
                .or_insert_with(|| BoundArguments::new(nested, &name));

            let outcome = read_argument(child, tokens, index, *target, token)?;
            child.unsatisfied.remove(target);
            let skip = std::mem::take(&mut child.skip);
            let listing = match &child.func {
                Some(Action::ListValues { parameter }) => Some(parameter.clone()),
                _ => None,
            };

            scope.skip = skip;

            if let Some(listing) = listing {
                scope.show_list(&listing);
            }

            Ok(outcome)
        }
        Variant::Inserter { .. } => {
            unreachable!("internal error - inserters never read tokens")
        }
    }
}

fn not_seen(scope: &BoundArguments, parameter: &Parameter, id: ParamId) -> Result<(), BindError> {
    if scope.seen.contains(&id) {
        Err(BindError::DuplicateNamedArgument {
            name: parameter.display_name().to_string(),
        })
    } else {
        Ok(())
    }
}

fn count_value(
    scope: &mut BoundArguments,
    parameter: &Parameter,
    id: ParamId,
    bound: Bound,
) -> Result<(), BindError> {
    let count = scope.counts.entry(id).or_insert(0);
    *count += 1;

    match bound.upper() {
        Some(upper) if *count > upper => Err(BindError::TooManyValues {
            name: parameter.display_name().to_string(),
            provided: *count,
            expected: upper,
        }),
        _ => Ok(()),
    }
}

// `None` when the value was the list keyword of a mapped converter.
fn coerce(
    scope: &mut BoundArguments,
    parameter: &Parameter,
    converter: &Converter,
    raw: &str,
) -> Result<Option<Value>, BindError> {
    match converter.coerce(raw) {
        Ok(Coerced::Value(value)) => Ok(Some(value)),
        Ok(Coerced::ShowList) => {
            scope.show_list(parameter.display_name());
            Ok(None)
        }
        Err(message) => Err(BindError::BadArgumentFormat {
            value: raw.to_string(),
            message,
        }),
    }
}

fn extract(
    token: &str,
    tokens: &[&str],
    index: usize,
    parameter: &Parameter,
    integer: bool,
) -> Result<Extracted, BindError> {
    let key = lookup_key(token);
    let glued = &token[key.len()..];

    if token.starts_with("--") {
        if let Some(value) = glued.strip_prefix('=') {
            return Ok(Extracted::whole(value));
        }
    } else if !glued.is_empty() {
        if integer {
            let run = digit_run(glued);

            if !run.is_empty() {
                let rest = &glued[run.len()..];
                return Ok(Extracted {
                    raw: run.to_string(),
                    skip: 0,
                    rest: if rest.is_empty() {
                        None
                    } else {
                        Some(format!("-{rest}"))
                    },
                });
            }
        }

        return Ok(Extracted::whole(glued));
    }

    match tokens.get(index + 1) {
        Some(next) => Ok(Extracted {
            raw: next.to_string(),
            skip: 1,
            rest: None,
        }),
        None => Err(BindError::MissingValue {
            name: parameter.display_name().to_string(),
        }),
    }
}

// The leading integer of `text` (an optional minus followed by ASCII digits), or empty.
fn digit_run(text: &str) -> &str {
    let start = usize::from(text.starts_with('-'));
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| start + i);

    if end > start {
        &text[..end]
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", "5")]
    #[case("15v", "15")]
    #[case("-15", "-15")]
    #[case("-15xy", "-15")]
    #[case("v", "")]
    #[case("-", "")]
    #[case("-v", "")]
    #[case("", "")]
    #[case("1-2", "1")]
    fn digit_runs(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(digit_run(text), expected);
    }
}
