use std::env;

use crate::api::{Argument, ArgumentRegistry};
use crate::model::{Context, Outcome};
use crate::parser::{execute, ConfigError, ConsoleInterface, Metadata, RunError, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The main entry point callback, receiving the resolved context and returning the exit code.
pub(crate) type Main<'a> = Box<dyn FnOnce(Context) -> i32 + 'a>;

/// A command (or sub-command) of the command line program.
///
/// Holds the arguments for its level, any sub-commands, and an optional main callback.
///
/// ### Example
/// ```
/// # use clapp_builder as clapp;
/// use clapp::{Argument, CommandNode, Outcome};
///
/// let mut deploy = CommandNode::new("deploy")
///     .about("Deploy the application.")
///     .main(|context| {
///         assert_eq!(context.text("target"), Some("prod"));
///         0
///     });
/// deploy
///     .add_argument(Argument::new("target").long("--target").takes(1).required(true))
///     .unwrap();
///
/// let mut app = CommandNode::new("my_app").version("1.0.0");
/// app.add_argument(Argument::new("verbose").short("-V")).unwrap();
/// app.add_sub_command(deploy).unwrap();
///
/// let outcome = app.run(&["deploy", "--target", "prod"]).unwrap();
/// assert_eq!(outcome, Outcome::Exit(0));
/// ```
pub struct CommandNode<'a> {
    pub(crate) name: String,
    pub(crate) metadata: Metadata,
    pub(crate) registry: ArgumentRegistry<'a>,
    pub(crate) sub_commands: Vec<CommandNode<'a>>,
    pub(crate) main: Option<Main<'a>>,
}

impl<'a> CommandNode<'a> {
    /// Create a command.
    /// For the root command this is the program name; for a sub-command it is the token which selects it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::default(),
            registry: ArgumentRegistry::default(),
            sub_commands: Vec::default(),
            main: None,
        }
    }

    /// Document the version, shown by `-v`/`--version` and in the help title.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.metadata.version.replace(version.into());
        self
    }

    /// Document the about message for this command.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.metadata.about.replace(description.into());
        self
    }

    /// Document the author, shown in the help message.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author.replace(author.into());
        self
    }

    /// Replace the generated usage line with a custom one.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.metadata.usage.replace(usage.into());
        self
    }

    /// Set the main callback, invoked with the resolved context once parsing and actions succeed.
    /// Its return value becomes the [`Outcome::Exit`] code.
    ///
    /// The main callback is not invoked when control passes to a sub-command.
    pub fn main(mut self, main: impl FnOnce(Context) -> i32 + 'a) -> Self {
        self.main.replace(Box::new(main));
        self
    }

    /// Add an argument to this command.
    ///
    /// ### Example
    /// ```
    /// # use clapp_builder as clapp;
    /// use clapp::{Argument, CommandNode, ConfigError};
    ///
    /// let mut node = CommandNode::new("program");
    /// node.add_argument(Argument::new("out").short("-o")).unwrap();
    ///
    /// let error = node.add_argument(Argument::new("other").short("o")).unwrap_err();
    /// assert_eq!(
    ///     error,
    ///     ConfigError::DuplicateSpelling {
    ///         spelling: "-o".to_string(),
    ///         existing: "out".to_string(),
    ///         name: "other".to_string(),
    ///     }
    /// );
    /// ```
    pub fn add_argument(&mut self, argument: Argument<'a>) -> Result<(), ConfigError> {
        self.registry.register(argument)
    }

    /// Add several arguments to this command, stopping at the first failure.
    pub fn add_arguments(
        &mut self,
        arguments: impl IntoIterator<Item = Argument<'a>>,
    ) -> Result<(), ConfigError> {
        for argument in arguments {
            self.add_argument(argument)?;
        }

        Ok(())
    }

    /// Add a sub-command, selected when its name appears as a token at this level.
    pub fn add_sub_command(&mut self, sub_command: CommandNode<'a>) -> Result<(), ConfigError> {
        let name = &sub_command.name;

        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidFormat {
                name: name.clone(),
                reason: "a sub-command name must be a single word, not starting with '-'.".to_string(),
            });
        }

        if self.sub_commands.iter().any(|existing| &existing.name == name) {
            return Err(ConfigError::DuplicateName(name.clone()));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Added sub-command '{name}' to '{}'.", self.name);
        }

        self.sub_commands.push(sub_command);
        Ok(())
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments of this command.
    pub fn registry(&self) -> &ArgumentRegistry<'a> {
        &self.registry
    }

    /// Get a sub-command by name.
    pub fn sub_command(&self, name: &str) -> Option<&CommandNode<'a>> {
        self.sub_commands.iter().find(|sub_command| sub_command.name == name)
    }

    /// Run the command against the input tokens (the program name excluded).
    ///
    /// The help (`-h`/`--help`) and version (`-v`/`--version`) flags are added unless their long spellings are taken.
    /// When either is matched the message is displayed and the run stops, regardless of the other tokens.
    ///
    /// Otherwise, the tokens are validated, the context resolved, and the matched arguments' actions invoked in order.
    /// Then control passes to the matched sub-command, or to the main callback.
    ///
    /// Errors are displayed (with the usage line) before being returned.
    pub fn run(self, tokens: &[&str]) -> Result<Outcome, RunError> {
        self.run_with_interface(tokens, Box::new(ConsoleInterface::default()))
    }

    pub(crate) fn run_with_interface(
        self,
        tokens: &[&str],
        user_interface: Box<dyn UserInterface>,
    ) -> Result<Outcome, RunError> {
        let program = self.name.clone();
        execute(self, tokens, program, &*user_interface)
    }

    /// Run the command against the Cli [`env::args`].
    ///
    /// Exits the process (via `std::process::exit`) with code `0` after displaying help or version, and `1` on any error.
    /// Otherwise returns the outcome, ex: `std::process::exit(app.start().exit_code())`.
    pub fn start(self) -> Outcome {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.run(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(Outcome::Help) | Ok(Outcome::Version) => std::process::exit(0),
            Ok(outcome) => outcome,
            Err(_) => std::process::exit(1),
        }
    }
}
