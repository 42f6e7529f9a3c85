use std::env;

use crate::binder::{suggest, Binding};
use crate::error::{ArgumentError, BindError};
use crate::model::Action;
use crate::parser::interface::UserInterface;
use crate::parser::printer::{Printer, Projection};
use crate::signature::CliSignature;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line parser.
/// Built via `CommandLine::build` or `Dispatcher::build`.
pub struct GeneralParser {
    root: ParseUnit,
    dispatch: Option<Dispatch>,
    user_interface: Box<dyn UserInterface>,
}

// The sub-commands of a dispatcher, and where the command name lands in the root binding.
pub(crate) struct Dispatch {
    slot: usize,
    commands: Vec<(String, ParseUnit)>,
}

impl Dispatch {
    pub(crate) fn new(slot: usize, commands: Vec<(String, ParseUnit)>) -> Self {
        Self { slot, commands }
    }
}

impl GeneralParser {
    pub(crate) fn command(root: ParseUnit, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            root,
            dispatch: None,
            user_interface,
        }
    }

    pub(crate) fn sub_command(
        root: ParseUnit,
        dispatch: Dispatch,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            root,
            dispatch: Some(dispatch),
            user_interface,
        }
    }
}

/// The result of a successful parse.
///
/// When an alternate action (or fallback) fired, it is found in the `func` of the innermost binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The chosen sub-command, for dispatching parsers.
    pub command: Option<String>,
    /// The binding of the root command line.
    /// For dispatching parsers, the command name and its arguments are removed.
    pub root: Binding,
    /// The binding of the chosen sub-command.
    pub sub_command: Option<Binding>,
}

impl Invocation {
    /// The binding of the sub-command if one was chosen, otherwise of the root command line.
    pub fn binding(&self) -> &Binding {
        self.sub_command.as_ref().unwrap_or(&self.root)
    }
}

/// A signature, with everything needed to report on it.
pub(crate) struct ParseUnit {
    program: String,
    signature: CliSignature,
    printer: Printer,
    version: Option<String>,
}

impl ParseUnit {
    pub(crate) fn new(
        program: impl Into<String>,
        signature: CliSignature,
        printer: Printer,
        version: Option<String>,
    ) -> Self {
        Self {
            program: program.into(),
            signature,
            printer,
            version,
        }
    }

    pub(crate) fn signature(&self) -> &CliSignature {
        &self.signature
    }

    fn invoke(
        &self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Binding, i32> {
        match self.signature.bind(tokens, &self.program) {
            Ok(binding) => match &binding.func {
                Some(Action::Help) => {
                    self.printer
                        .print_help(&self.program, &self.signature, user_interface);
                    Err(0)
                }
                Some(Action::Version) => {
                    user_interface.print(format!(
                        "{} {}",
                        self.program,
                        self.version.as_deref().unwrap_or_default()
                    ));
                    Err(0)
                }
                Some(Action::ListValues { parameter }) => {
                    self.printer
                        .print_values(&self.signature, parameter, user_interface);
                    Err(0)
                }
                _ => Ok(binding),
            },
            Err(error) => {
                report(error, tokens, user_interface);
                Err(1)
            }
        }
    }
}

fn report(error: ArgumentError, tokens: &[&str], user_interface: &(impl UserInterface + ?Sized)) {
    let projection = Projection::new(error.context().position(), tokens);
    user_interface.print_error(error);
    user_interface.print_error_context(projection);
}

impl GeneralParser {
    /// Run the command line parser against the input tokens.
    ///
    /// The tokens are bound against the root signature.
    /// For a dispatching parser, the tokens following the command name are then bound against the chosen sub-command.
    ///
    /// If at any point binding fails (ex: an unknown option, an inconvertible value, etc), the error is displayed
    /// and this returns with `Err(1)`.
    ///
    /// If the help action (`-h` or `--help`), the version action, or the list keyword of a mapped parameter is
    /// encountered, the corresponding message is displayed and this returns with `Err(0)`.
    ///
    /// User-defined alternate actions are returned in the [`Invocation`].
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<Invocation, i32> {
        let GeneralParser {
            root,
            dispatch,
            user_interface,
        } = self;
        let mut root_binding = root.invoke(tokens, &*user_interface)?;

        let dispatch = match dispatch {
            Some(dispatch) if root_binding.func.is_none() => dispatch,
            _ => {
                return Ok(Invocation {
                    command: None,
                    root: root_binding,
                    sub_command: None,
                })
            }
        };

        if root_binding.args.len() <= dispatch.slot {
            unreachable!("internal error - the command name is required");
        }

        let mut remaining = root_binding.args.split_off(dispatch.slot).into_iter();
        let command = remaining
            .next()
            .map(|v| v.to_string())
            .unwrap_or_default();
        let remaining: Vec<String> = remaining.map(|v| v.to_string()).collect();
        // The command name is a last option: everything after it is the sub-command's.
        let offset = tokens.len() - remaining.len() - 1;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching to '{command}' at token {offset}, with {} remaining.", remaining.len());
        }

        let unit = match dispatch.commands.iter().find(|(name, _)| name == &command) {
            Some((_, unit)) => unit,
            None => {
                let error = ArgumentError::from(BindError::UnknownCommand {
                    suggestion: suggest(&command, dispatch.commands.iter().map(|(name, _)| name)),
                    name: command,
                })
                .with_position(offset, tokens[offset]);
                report(error, tokens, &*user_interface);
                return Err(1);
            }
        };

        let sub_binding = unit.invoke(
            remaining
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            &*user_interface,
        )?;

        Ok(Invocation {
            command: Some(command),
            root: root_binding,
            sub_command: Some(sub_binding),
        })
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves like [`GeneralParser::parse_tokens`], except on `Err(code)` it exits with `code` (via
    /// [`std::process::exit`]).
    pub fn parse(self) -> Invocation {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(invocation) => invocation,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }
}
