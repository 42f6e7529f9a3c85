use thiserror::Error;

/// A signature that cannot be turned into a command line grammar.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// Two parameters declare the same alias.
    #[error("Config error: cannot duplicate the alias '{0}'.")]
    DuplicateAlias(String),

    /// Two parameters share an argument name.
    #[error("Config error: cannot duplicate the parameter '{0}'.")]
    DuplicateParameter(String),

    /// A required positional parameter is declared after an optional one.
    #[error("Config error: required parameter '{required}' cannot follow optional parameter '{optional}'.")]
    RequiredAfterOptional { required: String, optional: String },

    /// A catch-all positional parameter is followed by another positional parameter.
    #[error("Config error: catch-all parameter '{0}' must be the last positional parameter.")]
    CatchAllNotLast(String),

    /// An argument decorator cannot be attached to its parameter.
    #[error("Config error: invalid decorator on parameter '{name}': {reason}.")]
    InvalidDecorator { name: String, reason: String },

    /// A parameter was declared without a name.
    #[error("Config error: parameter names cannot be empty.")]
    EmptyName,

    /// An alias is empty or contains characters the dialect reserves.
    #[error("Config error: invalid alias '{0}'.")]
    InvalidAlias(String),

    /// Two sub-commands share a name.
    #[error("Config error: cannot duplicate the sub-command '{0}'.")]
    DuplicateCommand(String),
}

/// The ways a token vector can fail to bind against a signature.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BindError {
    /// Required parameters were never satisfied.
    #[error("Missing required arguments: {}.", .names.join(", "))]
    MissingRequiredArguments { names: Vec<String> },

    /// Positional tokens remain after every positional parameter was filled.
    #[error("Received extra arguments: {}.", .tokens.join(" "))]
    TooManyArguments { tokens: Vec<String> },

    /// A named token does not resolve to any alias.
    #[error("Unknown option '{name}'.{}", .suggestion.as_ref().map(|s| format!("  Did you mean '{s}'?")).unwrap_or_default())]
    UnknownOption {
        name: String,
        suggestion: Option<String>,
    },

    /// A named parameter was given a second time.
    #[error("Parameter '{name}' was given more than once.")]
    DuplicateNamedArgument { name: String },

    /// An option was the last token, without its value.
    #[error("No value found after '{name}'.")]
    MissingValue { name: String },

    /// A value failed its conversion.
    #[error("Bad value '{value}': {message}")]
    BadArgumentFormat { value: String, message: String },

    /// A multi-valued parameter received fewer values than its minimum.
    #[error("Received too few values for '{name}' (provided={provided}, expected={expected}).")]
    NotEnoughValues {
        name: String,
        provided: usize,
        expected: usize,
    },

    /// A multi-valued parameter received more values than its maximum.
    #[error("Received too many values for '{name}' (provided={provided}, expected={expected}).")]
    TooManyValues {
        name: String,
        provided: usize,
        expected: usize,
    },

    /// A sub-command name does not match any registered sub-command.
    #[error("Unknown sub-command '{name}'.{}", .suggestion.as_ref().map(|s| format!("  Did you mean '{s}'?")).unwrap_or_default())]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },

    /// A strict alternate action was not the first token.
    #[error("Arguments found before alternate action parameter '{name}'.")]
    ArgsBeforeAlternateCommand { name: String },

    /// A decorator option was given after the value of the parameter it decorates.
    #[error("Option '{name}' must be given before '{owner}'.")]
    DecorationAfterValue { name: String, owner: String },

    /// Decorator options were given, but the parameter they decorate was not.
    #[error("Options for '{owner}' were given without '{owner}' itself.")]
    DecorationWithoutValue { owner: String },
}

/// Where in the invocation an error was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    parameter: Option<String>,
    position: Option<usize>,
    value: Option<String>,
}

impl ErrorContext {
    /// The display name of the parameter being read, if any.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// The index of the offending token, if any.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The offending token, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A [`BindError`] with the context it was raised in.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct ArgumentError {
    error: BindError,
    context: ErrorContext,
}

impl ArgumentError {
    /// The underlying failure.
    pub fn error(&self) -> &BindError {
        &self.error
    }

    /// Where the failure was raised.
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    // Context is only ever filled in, never replaced: the innermost scope wins.
    pub(crate) fn with_parameter(mut self, parameter: &str) -> Self {
        if self.context.parameter.is_none() {
            self.context.parameter.replace(parameter.to_string());
        }
        self
    }

    pub(crate) fn with_position(mut self, position: usize, value: &str) -> Self {
        if self.context.position.is_none() {
            self.context.position.replace(position);
            self.context.value.replace(value.to_string());
        }
        self
    }
}

impl From<BindError> for ArgumentError {
    fn from(error: BindError) -> Self {
        Self {
            error,
            context: ErrorContext::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_innermost_wins() {
        let error = ArgumentError::from(BindError::MissingValue {
            name: "--abc".to_string(),
        })
        .with_parameter("--abc")
        .with_position(3, "--abc")
        .with_parameter("outer")
        .with_position(0, "x");

        assert_eq!(error.context().parameter(), Some("--abc"));
        assert_eq!(error.context().position(), Some(3));
        assert_eq!(error.context().value(), Some("--abc"));
        assert_eq!(error.to_string(), "No value found after '--abc'.");
    }

    #[test]
    fn unknown_option_message() {
        let plain = BindError::UnknownOption {
            name: "--vrebose".to_string(),
            suggestion: None,
        };
        assert_eq!(plain.to_string(), "Unknown option '--vrebose'.");

        let suggested = BindError::UnknownOption {
            name: "--vrebose".to_string(),
            suggestion: Some("--verbose".to_string()),
        };
        assert_eq!(
            suggested.to_string(),
            "Unknown option '--vrebose'.  Did you mean '--verbose'?"
        );
    }

    #[test]
    fn missing_required_message() {
        let error = BindError::MissingRequiredArguments {
            names: vec!["one".to_string(), "--two".to_string()],
        };
        assert_eq!(error.to_string(), "Missing required arguments: one, --two.");
    }
}
