pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_MESSAGE: &str = "Show the version and exit.";

// Glued values on a long flag which deactivate it (compared case-insensitively).
pub(crate) const FALSE_WORDS: [&str; 5] = ["0", "n", "no", "f", "false"];
pub(crate) const NEGATIVE_PREFIX: &str = "no-";

pub(crate) const LIST_KEYWORD: &str = "list";

// Collects the tokens following a sub-command name.
pub(crate) const COMMAND_ARGS_NAME: &str = "command_args";
pub(crate) const COMMAND_HELP: &str = "The sub-command to run.";

// Largest edit distance for an alias to be suggested in place of an unknown option.
pub(crate) const SUGGESTION_DISTANCE: usize = 2;
