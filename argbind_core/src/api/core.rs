use crate::api::AbstractParameter;
use crate::constant::*;
use crate::error::ConfigError;
use crate::model::{Action, Flag};
use crate::parser::{ConsoleInterface, Dispatch, GeneralParser, ParseUnit, Printer, UserInterface};
use crate::signature::{CliSignature, Parameter};

/// The base command line.
///
/// ### Example
/// ```
/// # use argbind_core as argbind;
/// use argbind::CommandLine;
///
/// let parser = CommandLine::new("program")
///     // Configure with CommandLine::add and CommandLine::branch.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct CommandLine {
    program: String,
    about: Option<String>,
    version: Option<String>,
    parameters: Vec<AbstractParameter>,
    actions: Vec<Parameter>,
    deferred_error: Option<ConfigError>,
}

impl CommandLine {
    /// Create a command line.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::CommandLine;
    ///
    /// let parser = CommandLine::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            version: None,
            parameters: Vec::default(),
            actions: Vec::default(),
            deferred_error: None,
        }
    }

    /// Document the about message for this command line.
    /// If repeated, only the final about message will apply.
    ///
    /// An about message documents the command line in full sentence/paragraph format.
    /// We recommend allowing `argbind` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Declare the program version, enabling the `--version` action.
    /// Like other alternate actions, `--version` must be the first token.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version.replace(version.into());
        self
    }

    /// Add a parameter to the command line.
    ///
    /// The order of positional parameters corresponds to their positional order during binding.
    /// The order of named parameters does not affect the binding semantics.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{AbstractParameter, CommandLine, Converter, Value};
    ///
    /// let parser = CommandLine::new("program")
    ///     .add(AbstractParameter::positional("a").converter(Converter::integer()))
    ///     .add(AbstractParameter::named("b").default("x"))
    ///     .build();
    ///
    /// let invocation = parser.parse_tokens(vec!["1", "-b", "y"].as_slice()).unwrap();
    ///
    /// assert_eq!(invocation.root.args, vec![Value::Int(1)]);
    /// assert_eq!(invocation.root.kwargs.get("b"), Some(&Value::from("y")));
    /// ```
    pub fn add(mut self, parameter: AbstractParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add an alternate action: when given as the first token, the invocation is redirected to `action`, receiving
    /// every following token as its positional arguments.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{AbstractParameter, Action, CommandLine, Value};
    ///
    /// let parser = CommandLine::new("program")
    ///     .add(AbstractParameter::positional("required"))
    ///     .alternate(&["license"], Action::Named("license".to_string()), "Show the license.")
    ///     .build();
    ///
    /// let invocation = parser.parse_tokens(vec!["--license", "full"].as_slice()).unwrap();
    ///
    /// assert_eq!(invocation.root.func, Some(Action::Named("license".to_string())));
    /// assert_eq!(invocation.root.args, vec![Value::from("full")]);
    /// ```
    pub fn alternate(self, aliases: &[&str], action: Action, help: impl Into<String>) -> Self {
        let parameter = Parameter::alternate(aliases, action, help);
        self.action(parameter)
    }

    /// Add a fallback action: like an alternate action, but matched anywhere.
    /// When binding fails, the tokens following the failure are searched for a fallback action to recover with.
    pub fn fallback(self, aliases: &[&str], action: Action, help: impl Into<String>) -> Self {
        let parameter = Parameter::fallback(aliases, action, help);
        self.action(parameter)
    }

    fn action(mut self, parameter: Result<Parameter, ConfigError>) -> Self {
        match parameter {
            Ok(parameter) => self.actions.push(parameter),
            Err(error) => {
                self.deferred_error.get_or_insert(error);
            }
        }

        self
    }

    /// Branch into sub-commands.
    ///
    /// This changes the command line into a sub-command style command line.
    /// Any parameters added before the branch apply to the root command line; the command name is a positional
    /// parameter following them.
    /// Every token after the command name belongs to the sub-command.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{AbstractParameter, CommandLine, Converter, Value};
    ///
    /// let parser = CommandLine::new("program")
    ///     .add(AbstractParameter::named("verbose").alias("v").default(false))
    ///     .branch("command")
    ///     .command("add", |sub| {
    ///         sub.about("Add a value.")
    ///             .add(AbstractParameter::positional("value").converter(Converter::integer()))
    ///     })
    ///     .build();
    ///
    /// let invocation = parser.parse_tokens(vec!["-v", "add", "2"].as_slice()).unwrap();
    ///
    /// assert_eq!(invocation.command, Some("add".to_string()));
    /// assert_eq!(invocation.root.kwargs.get("verbose"), Some(&Value::Bool(true)));
    /// assert_eq!(invocation.binding().args, vec![Value::Int(2)]);
    /// ```
    pub fn branch(self, command_name: impl Into<String>) -> Dispatcher {
        let command_name = command_name.into();
        let root = self
            .add(
                AbstractParameter::positional(command_name.clone())
                    .flag(Flag::LastOption)
                    .help(COMMAND_HELP),
            )
            .add(AbstractParameter::var_positional(COMMAND_ARGS_NAME).flag(Flag::Undocumented));

        Dispatcher::new(root, command_name)
    }

    fn into_unit(self, commands: Vec<(String, Option<String>)>) -> Result<ParseUnit, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let mut extra = self.actions;
        extra.push(Parameter::fallback(
            &[HELP_NAME, HELP_SHORT],
            Action::Help,
            HELP_MESSAGE,
        )?);

        if self.version.is_some() {
            extra.push(Parameter::alternate(
                &[VERSION_NAME],
                Action::Version,
                VERSION_MESSAGE,
            )?);
        }

        let signature = CliSignature::from_abstract(self.parameters, extra)?;
        Ok(ParseUnit::new(
            self.program,
            signature,
            Printer::terminal(self.about, commands),
            self.version,
        ))
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        let root = self.into_unit(Vec::default())?;
        Ok(GeneralParser::command(root, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated alias).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated alias).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// The sub-command dispatching command line.
///
/// Created via [`CommandLine::branch`].
pub struct Dispatcher {
    root: CommandLine,
    command_name: String,
    commands: Vec<(String, CommandLine)>,
    deferred_error: Option<ConfigError>,
}

impl Dispatcher {
    fn new(root: CommandLine, command_name: String) -> Self {
        Self {
            root,
            command_name,
            commands: Vec::default(),
            deferred_error: None,
        }
    }

    /// Setup a sub-command.
    ///
    /// The sub-command is invoked as `program name`.
    /// Each name may only be set up once.
    /// The order of sub-commands is the order they are listed in the help message.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{AbstractParameter, CommandLine, Value};
    ///
    /// let parser = CommandLine::new("program")
    ///     .branch("command")
    ///     .command("a", |sub| sub.add(AbstractParameter::positional("value_a")))
    ///     .command("b", |sub| {
    ///         sub.about("Description for the sub-command 'b'.")
    ///             .add(AbstractParameter::positional("value_b"))
    ///     })
    ///     .build();
    ///
    /// let invocation = parser.parse_tokens(vec!["a", "1"].as_slice()).unwrap();
    ///
    /// assert_eq!(invocation.command, Some("a".to_string()));
    /// assert_eq!(invocation.binding().args, vec![Value::from("1")]);
    /// ```
    pub fn command(
        mut self,
        name: impl Into<String>,
        setup_fn: impl FnOnce(SubCommand) -> SubCommand,
    ) -> Self {
        let name = name.into();

        if self.commands.iter().any(|(existing, _)| existing == &name) {
            self.deferred_error
                .get_or_insert(ConfigError::DuplicateCommand(name));
            return self;
        }

        let inner = CommandLine::new(format!("{} {name}", self.root.program));
        let sub_command = setup_fn(SubCommand { inner });
        self.commands.push((name, sub_command.inner));
        self
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let listing = self
            .commands
            .iter()
            .map(|(name, command_line)| (name.clone(), command_line.about.clone()))
            .collect();
        let mut commands = Vec::default();

        for (name, command_line) in self.commands {
            commands.push((name, command_line.into_unit(Vec::default())?));
        }

        let root = self.root.into_unit(listing)?;
        let slot = match root.signature().slot(&self.command_name) {
            Some(slot) => slot,
            None => unreachable!("internal error - dispatcher must declare its command parameter"),
        };

        Ok(GeneralParser::sub_command(
            root,
            Dispatch::new(slot, commands),
            user_interface,
        ))
    }

    /// Build the sub-command based command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated sub-command).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the sub-command based command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated sub-command).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// A sub-command line.
///
/// Used with [`Dispatcher::command`].
pub struct SubCommand {
    inner: CommandLine,
}

impl SubCommand {
    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`SubCommand`] for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use argbind_core as argbind;
    /// use argbind::{AbstractParameter, SubCommand, Value};
    ///
    /// // Function under test.
    /// // We want to make sure the setup_fn is wired up correctly.
    /// pub fn setup_fn(sub: SubCommand) -> SubCommand {
    ///     sub.add(AbstractParameter::positional("value"))
    /// }
    ///
    /// let parser = setup_fn(SubCommand::test_dummy()).build_parser().unwrap();
    /// let invocation = parser.parse_tokens(vec!["2"].as_slice()).unwrap();
    /// assert_eq!(invocation.root.args, vec![Value::from("2")]);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        SubCommand {
            inner: CommandLine::new("test-dummy"),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`GeneralParser`] for testing.
    /// See [`SubCommand::test_dummy`] for an example.
    #[cfg(feature = "unit_test")]
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.inner
            .build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Document the about message for this sub-command.
    /// If repeated, only the final about message will apply.
    ///
    /// See [`Dispatcher::command`] for usage.
    pub fn about(self, description: impl Into<String>) -> Self {
        SubCommand {
            inner: self.inner.about(description),
        }
    }

    /// Add a parameter to the sub-command.
    ///
    /// See [`CommandLine::add`] for usage.
    pub fn add(self, parameter: AbstractParameter) -> Self {
        SubCommand {
            inner: self.inner.add(parameter),
        }
    }

    /// Add an alternate action to the sub-command.
    ///
    /// See [`CommandLine::alternate`] for usage.
    pub fn alternate(self, aliases: &[&str], action: Action, help: impl Into<String>) -> Self {
        SubCommand {
            inner: self.inner.alternate(aliases, action, help),
        }
    }

    /// Add a fallback action to the sub-command.
    ///
    /// See [`CommandLine::fallback`] for usage.
    pub fn fallback(self, aliases: &[&str], action: Action, help: impl Into<String>) -> Self {
        SubCommand {
            inner: self.inner.fallback(aliases, action, help),
        }
    }
}
