//! `argbind` derives a command line grammar from a parameter list, and binds argument vectors against it.
//!
//! Most command line parsers ask you to describe the command line.
//! `argbind` asks you to describe the *callable* instead: its positional, catch-all, and named parameters, with their
//! defaults and conversions.
//! The command line grammar follows from that description, and binding produces the positional and named arguments
//! for the callable.
//! Specifically, `argbind` prioritizes the following design concerns:
//! * *Signature first*:
//! A parameter with a default is an option, a parameter without one is required, a boolean is a flag.
//! The user should not restate on the command line what the parameter list already says.
//! * *Composable parameters*:
//! Argument decorators attach their own options to a parameter and post-process its value; decorators nest.
//! Inserters compute a value at bind time without reading any tokens.
//! * *Alternate actions*:
//! An invocation may be redirected wholesale (ex: `--help`, `--version`, user-defined actions), receiving the rest of
//! the tokens.
//! * *Detailed yet basic UX*:
//! The help and error output of the Cli should be very detailed, leaving no ambiguity in how to use the program.
//! However, we do not aim to support rich display configurations, such as colour output, shell completions, etc.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo_summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! usage: summer items... [--verbose]
//!
//! Sum the items.
//!
//! positional arguments:
//!  items...                      The items to sum.                  type: INT
//!
//! options:
//!  --verbose, -v, --no-verbose   Show each item.
//!
//! other actions:
//!  --help, -h                    Show this help message and exit.
//!  --version                     Show the version and exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! Missing required arguments: items.
//!
//! ^
//!
//! $ summer 1 blah
//! Bad value 'blah': cannot convert 'blah' to an integer.
//! 1 blah
//!   ^
//! ```
//!
//! # Parameters
//! Configure `argbind` by starting with a [`CommandLine`] and `add`ing [`AbstractParameter`]s.
//! Each parameter is compiled into one node of the command line grammar:
//!
//! ```console
//! Declared                              | Grammar            | Binds
//! ------------------------------------------------------------------------------------------------
//! positional                            | VALUE              | one positional argument
//! positional + default                  | [--name=VALUE]     | a named argument
//! positional + default + Positional     | [VALUE]            | one positional argument, or the default
//! positional + multi(bound)             | VALUE...           | one List positional argument
//! var_positional                        | [VALUE...]         | every remaining positional argument
//! named                                 | --name=VALUE       | a named argument (required)
//! named + default                       | [--name=VALUE]     | a named argument
//! named + boolean                       | [--name]           | true, false (--no-name), or the default
//! named + multi(bound)                  | [--name=VALUE...]  | a List named argument, one value per use
//! var_named                             |                    | nothing; it has no command line grammar
//! inserter                              |                    | a computed value, without reading tokens
//! ```
//!
//! Names use dashes in place of underscores.
//! A one character name is written `-n`; a longer one `--name`.
//! Values are converted with the parameter's [`Converter`] (`STR` by default).
//! A [`Mapping`] converter accepts a closed set of keys; giving its list keyword (`list` by default) displays the
//! accepted values instead of running the program.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_mapped.rs")]
//! ```
//!
//! ### Decorators & Inserters
//! An [`ArgumentDecorator`] declares named parameters of its own, which appear on the command line alongside the
//! decorated parameter.
//! Decorator options are given before the decorated parameter's value.
//! Once the decorated parameter is read, the decorator function receives its value along with those privately bound
//! values, and produces the final value.
//! An [`Inserter`] is satisfied at the end of binding, inserting its computed value at its slot.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_decorated.rs")]
//! ```
//!
//! ```console
//! $ echo -u -r 2 hello
//! echo says: HELLO HELLO
//!
//! $ echo -ur0 hello
//! Bad value 'hello': cannot repeat 0 times.
//! -ur0 hello
//!      ^
//! ```
//!
//! ### Sub-commands
//! To setup a sub-command based Cli, start with a root `CommandLine`.
//! Parameters may be added to the root command line via `add`.
//! The sub-command section begins by `branch`ing the command line, which adds the command name as the next positional
//! parameter.
//! Every token after the command name belongs to the chosen sub-command, configured via [`Dispatcher::command`].
//!
//! ```no_run
#![doc = include_str!("../demos/demo_sub_command.rs")]
//! ```
//!
//! ```console
//! $ tasks add -h
//! usage: tasks add title [--priority=INT]
//!
//! Add a task.
//! <truncated>
//!
//! $ tasks -v done 3 4
//! Running sub-command Some("done").
//! Completed #3.
//! Completed #4.
//!
//! $ tasks don 3
//! Unknown sub-command 'don'.  Did you mean 'done'?
//! don 3
//! ^
//! ```
//!
//! # Cli Semantics
//! `argbind` binds the Cli tokens according to the following set of rules.
//! By and large this syntax should be familiar to many Cli developers, with a few subtle nuances for various edge cases.
//!
//! * Tokens not starting with `-` (and the token `-` itself) are positional.
//! They fill the positional parameters in order; a catch-all keeps absorbing them once reached.
//! * `--` ends option parsing: every following token is positional.
//! A parameter marked [`Flag::LastOption`] has the same effect once read.
//! * Long options take their value from the next token, or after `=`.
//! For example, `--key=123` is equivalent to `--key 123`.
//! Only the first `=` character is used as a separator.
//! * Short options take their value from the rest of the token, or from the next token.
//! For example, `-k123` is equivalent to `-k 123`.
//! * Short flags may be combined into a single token.
//! For example, `-abc` is equivalent to `-a -b -c`.
//! An integer option ends the combination after its digits: `-n3v` is equivalent to `-n 3 -v`.
//! * A flag is deactivated by its negative form `--no-name`, or by a false value: `--name=no`.
//! * A named parameter may only be given once, except for multi-valued ones.
//! * An alternate action (ex: `--version`) must be the first token, and receives every following token.
//! A fallback action (ex: `--help`) is matched anywhere.
//! When binding fails, the tokens following the failure are searched for a fallback action; if one is found the
//! invocation is redirected to it, otherwise the failure is reported.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events describing how the tokens are bound.
pub use argbind_core::*;
