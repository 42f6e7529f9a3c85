use std::str::FromStr;
use std::sync::Arc;

use crate::constant::*;
use crate::model::Value;
use crate::prelude::Choices;

type ConvertFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

const TRUE_WORDS: [&str; 6] = ["1", "y", "yes", "t", "true", "on"];

/// The coercion applied to a raw token to produce a [`Value`].
///
/// Every converter carries a short label used in usage/help output (ex: `INT`).
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{Converter, Value};
///
/// let port = Converter::custom("PORT", |token| {
///     token
///         .parse::<u16>()
///         .map(|p| Value::Int(p as i64))
///         .map_err(|e| e.to_string())
/// });
/// assert_eq!(port.label(), "PORT");
/// ```
#[derive(Clone)]
pub struct Converter {
    label: String,
    kind: ConverterKind,
}

#[derive(Clone)]
enum ConverterKind {
    Text,
    Integer,
    Float,
    Boolean,
    Custom(ConvertFn),
    Mapped(Mapping),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coerced {
    Value(Value),
    // The token was the list keyword of a mapped converter.
    ShowList,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("label", &self.label)
            .finish()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::text()
    }
}

impl Converter {
    /// The identity conversion.
    pub fn text() -> Self {
        Self {
            label: "STR".to_string(),
            kind: ConverterKind::Text,
        }
    }

    /// Convert to a signed integer.
    /// Named parameters using this converter accept glued digit runs (ex: `-n5v`).
    pub fn integer() -> Self {
        Self {
            label: "INT".to_string(),
            kind: ConverterKind::Integer,
        }
    }

    /// Convert to a floating point number.
    pub fn float() -> Self {
        Self {
            label: "FLOAT".to_string(),
            kind: ConverterKind::Float,
        }
    }

    /// Convert to a boolean.
    /// Named parameters using this converter become flags.
    pub fn boolean() -> Self {
        Self {
            label: "BOOL".to_string(),
            kind: ConverterKind::Boolean,
        }
    }

    /// Convert via [`std::str::FromStr`] for any `T` that maps into a [`Value`].
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::Converter;
    ///
    /// assert_eq!(Converter::of::<u32>().label(), "U32");
    /// ```
    pub fn of<T>() -> Self
    where
        T: FromStr + Into<Value> + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let label = type_name
            .rsplit("::")
            .next()
            .unwrap_or(type_name)
            .to_ascii_uppercase();
        Self {
            label,
            kind: ConverterKind::Custom(Arc::new(move |token: &str| {
                T::from_str(token)
                    .map(Into::into)
                    .map_err(|_| format!("cannot convert '{token}' to {type_name}."))
            })),
        }
    }

    /// Convert via an arbitrary function.
    /// The error message is reported to the user as-is.
    pub fn custom(
        label: impl Into<String>,
        convert: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ConverterKind::Custom(Arc::new(convert)),
        }
    }

    /// Convert via a [`Mapping`] of accepted keys.
    pub fn mapped(mapping: Mapping) -> Self {
        Self {
            label: mapping.label(),
            kind: ConverterKind::Mapped(mapping),
        }
    }

    /// The short type label of this converter.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn is_boolean(&self) -> bool {
        matches!(self.kind, ConverterKind::Boolean)
    }

    pub(crate) fn is_integer(&self) -> bool {
        matches!(self.kind, ConverterKind::Integer)
    }

    pub(crate) fn mapping(&self) -> Option<&Mapping> {
        match &self.kind {
            ConverterKind::Mapped(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub(crate) fn coerce(&self, token: &str) -> Result<Coerced, String> {
        let value = match &self.kind {
            ConverterKind::Text => Value::Str(token.to_string()),
            ConverterKind::Integer => i64::from_str(token)
                .map(Value::Int)
                .map_err(|_| format!("cannot convert '{token}' to an integer."))?,
            ConverterKind::Float => f64::from_str(token)
                .map(Value::Float)
                .map_err(|_| format!("cannot convert '{token}' to a float."))?,
            ConverterKind::Boolean => Value::Bool(parse_boolean(token)?),
            ConverterKind::Custom(convert) => convert(token)?,
            ConverterKind::Mapped(mapping) => return mapping.lookup(token),
        };

        Ok(Coerced::Value(value))
    }
}

fn parse_boolean(token: &str) -> Result<bool, String> {
    let lowered = token.to_ascii_lowercase();

    if TRUE_WORDS.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) || lowered == "off" {
        Ok(false)
    } else {
        Err(format!("cannot convert '{token}' to a boolean."))
    }
}

/// A closed set of accepted keys, each mapping to a value.
///
/// Keys match case-insensitively unless [`Mapping::case_sensitive`] is set.
/// By default the keyword `list` is reserved: giving it redirects the invocation to list the accepted values.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::{prelude::*, Mapping, Value};
///
/// let mapping = Mapping::default()
///     .entry(&["fast", "f"], Value::Int(1), "Go fast.")
///     .choice("slow", "Go slow.");
/// assert_eq!(mapping.keys(), vec!["fast", "slow"]);
/// ```
#[derive(Debug, Clone)]
pub struct Mapping {
    choices: Vec<MappedChoice>,
    case_sensitive: bool,
    list_keyword: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct MappedChoice {
    pub(crate) keys: Vec<String>,
    pub(crate) value: Value,
    pub(crate) help: String,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            choices: Vec::default(),
            case_sensitive: false,
            list_keyword: Some(LIST_KEYWORD.to_string()),
        }
    }
}

impl Mapping {
    /// Accept any of `keys`, each producing `value`.
    /// The first key is the one shown in usage/help output.
    pub fn entry(
        mut self,
        keys: &[&str],
        value: impl Into<Value>,
        help: impl Into<String>,
    ) -> Self {
        self.choices.push(MappedChoice {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            value: value.into(),
            help: help.into(),
        });
        self
    }

    /// Match keys exactly, rather than ignoring case.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Change the keyword which lists the accepted values.
    pub fn list_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.list_keyword.replace(keyword.into());
        self
    }

    /// Disable the listing keyword altogether.
    pub fn without_list(mut self) -> Self {
        self.list_keyword = None;
        self
    }

    /// The primary key of each choice, in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter_map(|c| c.keys.first().map(String::as_str))
            .collect()
    }

    pub(crate) fn choices(&self) -> &[MappedChoice] {
        &self.choices
    }

    fn label(&self) -> String {
        format!("{{{}}}", self.keys().join("|"))
    }

    fn matches(&self, key: &str, token: &str) -> bool {
        if self.case_sensitive {
            key == token
        } else {
            key.eq_ignore_ascii_case(token)
        }
    }

    fn lookup(&self, token: &str) -> Result<Coerced, String> {
        if let Some(keyword) = &self.list_keyword {
            if self.matches(keyword, token) {
                return Ok(Coerced::ShowList);
            }
        }

        for choice in &self.choices {
            if choice.keys.iter().any(|key| self.matches(key, token)) {
                return Ok(Coerced::Value(choice.value.clone()));
            }
        }

        match &self.list_keyword {
            Some(keyword) => Err(format!(
                "'{token}' is not a valid choice.  Use '{keyword}' to see the available values."
            )),
            None => Err(format!(
                "'{token}' is not a valid choice (expected one of: {}).",
                self.keys().join(", ")
            )),
        }
    }
}

impl Choices<&str> for Mapping {
    /// Accept `variant`, producing itself as a `Value::Str`.
    fn choice(self, variant: &str, description: impl Into<String>) -> Self {
        self.entry(&[variant], Value::from(variant), description)
    }
}
