use thiserror::Error;

/// A command configuration fault, raised while registering arguments or sub-commands.
///
/// These are programmer errors; a well formed program never produces them at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two arguments (or two sibling sub-commands) share a name.
    #[error("Config error: cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// Two arguments share a short or long spelling.
    #[error("Config error: cannot duplicate the spelling '{spelling}' (used by '{existing}' and '{name}').")]
    DuplicateSpelling {
        /// The repeated spelling, ex: `-o`.
        spelling: String,
        /// The argument which registered the spelling first.
        existing: String,
        /// The argument being registered.
        name: String,
    },

    /// Two positional arguments share an index.
    #[error("Config error: cannot duplicate the positional index {index} (used by '{existing}' and '{name}').")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
        /// The argument which registered the index first.
        existing: String,
        /// The argument being registered.
        name: String,
    },

    /// A malformed name, short or long spelling.
    #[error("Config error: invalid format for '{name}': {reason}")]
    InvalidFormat {
        /// The argument (or sub-command) at fault.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// A command line input fault, raised while parsing tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A dash prefixed token matches no short or long spelling.
    #[error("Parse error: argument '{0}' does not exist.")]
    UnknownArgument(String),

    /// An option did not receive its values.
    #[error("Parse error: '{spelling}' expected {expected} value(s) but received {received}.")]
    MissingOptionValue {
        /// The option as it was spelled on the command line.
        spelling: String,
        /// The option's arity.
        expected: usize,
        /// The number of values found before running out of tokens (or hitting a dash prefixed token).
        received: usize,
    },

    /// A non-dash token appeared with no positional slot left.
    #[error("Parse error: unexpected positional argument '{0}'.")]
    UnexpectedPositionalArgument(String),

    /// A required positional argument was not supplied.
    #[error("Parse error: required argument '{0}' not found.")]
    MissingRequiredPositional(String),

    /// A required option was not supplied.
    #[error("Parse error: required option '{0}' not found.")]
    MissingRequiredOption(String),
}

/// A failure raised by an argument action.
///
/// ### Example
/// ```
/// # use clapp_builder as clapp;
/// use clapp::{ActionError, Argument, CommandNode, RunError};
///
/// let mut node = CommandNode::new("program");
/// node.add_argument(Argument::new("fail").long("--fail").action(|_| Err(ActionError::new("no thanks"))))
///     .unwrap();
///
/// let error = node.run(&["--fail"]).unwrap_err();
/// assert_eq!(error, RunError::Action(ActionError::new("no thanks")));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Action error: {0}")]
pub struct ActionError(String);

impl ActionError {
    /// Create an action error with a description for the user.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The terminal failure of a [`CommandNode::run`](./struct.CommandNode.html#method.run).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// The tokens do not satisfy the command's grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An argument action failed.
    #[error(transparent)]
    Action(#[from] ActionError),
}
