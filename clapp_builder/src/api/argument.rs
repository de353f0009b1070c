use crate::model::{Class, Context, Value};
use crate::parser::ActionError;

/// The callback type for argument actions.
pub(crate) type Callback<'a> = Box<dyn FnMut(&Context) -> Result<(), ActionError> + 'a>;

/// What happens once an argument has been matched and the context resolved.
pub(crate) enum Action<'a> {
    Callback(Callback<'a>),
    /// Display the help message and stop.
    Help,
    /// Display the version message and stop.
    Version,
}

impl<'a> std::fmt::Debug for Action<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Callback(_) => write!(f, "Callback(..)"),
            Action::Help => write!(f, "Help"),
            Action::Version => write!(f, "Version"),
        }
    }
}

/// The declaration of one argument: a flag, an option, or a positional argument.
///
/// The [`Class`] of the argument follows from its index, requiredness and arity.
/// Spellings are validated when the argument is registered on a [`CommandNode`](./struct.CommandNode.html).
///
/// ### Example
/// ```
/// # use clapp_builder as clapp;
/// use clapp::{Argument, Class};
///
/// let output = Argument::new("out_file")
///     .short("-o")
///     .long("--output")
///     .takes(1)
///     .help("The output file.");
/// assert_eq!(output.class(), Class::Option);
///
/// let input = Argument::new("in_file").index(1).required(true);
/// assert_eq!(input.class(), Class::RequiredPositional);
/// ```
pub struct Argument<'a> {
    pub(crate) name: String,
    pub(crate) short: Option<String>,
    pub(crate) long: Option<String>,
    pub(crate) arity: usize,
    pub(crate) index: usize,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) help: Option<String>,
    pub(crate) action: Option<Action<'a>>,
}

impl<'a> Argument<'a> {
    /// Create an argument with the given name.
    /// The name is the context key under which the argument's value is resolved.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            long: None,
            arity: 0,
            index: 0,
            required: false,
            default: None,
            help: None,
            action: None,
        }
    }

    /// Set the short spelling, either `-x` or `x`.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short.replace(short.into());
        self
    }

    /// Set the long spelling, ex: `--output`.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long.replace(long.into());
        self
    }

    /// Set the number of tokens consumed after the argument's spelling.
    /// An arity of `0` makes a flag; positional arguments always consume exactly one token.
    pub fn takes(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Make this a positional argument.
    /// Indices are 1-based; positional tokens are assigned in ascending index order.
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Declare whether the argument must appear on the command line.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the value resolved when the (non-required) argument is absent.
    /// Without a default, absent arguments resolve to `Value::Bool(false)`.
    ///
    /// ### Example
    /// ```
    /// # use clapp_builder as clapp;
    /// use clapp::{Argument, CommandNode, Outcome};
    ///
    /// let mut node = CommandNode::new("program");
    /// node.add_argument(Argument::new("level").long("--level").takes(1).default("3"))
    ///     .unwrap();
    ///
    /// match node.run(empty::slice()).unwrap() {
    ///     Outcome::Context(context) => assert_eq!(context.text("level"), Some("3")),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Document the help message for this argument.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Set the action invoked when this argument is matched.
    ///
    /// Actions run after the whole command line has been validated, in the order their arguments were matched.
    /// Each receives the final context.
    /// The first action to fail halts the run.
    ///
    /// ### Example
    /// ```
    /// # use clapp_builder as clapp;
    /// use clapp::{Argument, CommandNode};
    ///
    /// let mut seen: Option<String> = None;
    /// let mut node = CommandNode::new("program");
    /// node.add_argument(Argument::new("out").short("-o").takes(1).action(|context| {
    ///     seen = context.text("out").map(str::to_string);
    ///     Ok(())
    /// }))
    /// .unwrap();
    ///
    /// node.run(&["-o", "x.txt"]).unwrap();
    /// assert_eq!(seen, Some("x.txt".to_string()));
    /// ```
    pub fn action(
        mut self,
        callback: impl FnMut(&Context) -> Result<(), ActionError> + 'a,
    ) -> Self {
        self.action.replace(Action::Callback(Box::new(callback)));
        self
    }

    pub(crate) fn builtin(name: &str, long: &str, help: &str, action: Action<'a>) -> Self {
        let mut argument = Argument::new(name).long(long).help(help);
        argument.action.replace(action);
        argument
    }

    /// The argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short spelling (normalized to `-x` once registered).
    pub fn short_spelling(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// The long spelling.
    pub fn long_spelling(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The number of tokens consumed after the argument's spelling.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The positional index, or `0` when not positional.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Whether the argument must appear on the command line.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The help message, if any.
    pub fn help_message(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Whether an action is attached.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// The class of this argument.
    pub fn class(&self) -> Class {
        Class::of(self.index != 0, self.required, self.arity)
    }

    /// The spelling used to refer to this argument in messages.
    pub(crate) fn display_name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or(&self.name)
    }

    /// The placeholder shown for this argument's values, ex: `OUT_FILE`.
    pub(crate) fn metavar(&self) -> String {
        self.name.to_ascii_uppercase().replace('-', "_")
    }
}

impl<'a> std::fmt::Debug for Argument<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(" {s},"),
            None => "".to_string(),
        };
        let long = match &self.long {
            Some(l) => format!(" {l},"),
            None => "".to_string(),
        };
        let action = if self.action.is_some() { ", action" } else { "" };

        write!(
            f,
            "{class}[{name},{short}{long} arity={arity}, index={index}{action}]",
            class = self.class(),
            name = self.name,
            arity = self.arity,
            index = self.index,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn argument_defaults() {
        let argument = Argument::new("abc");

        assert_eq!(argument.name(), "abc");
        assert_eq!(argument.short_spelling(), None);
        assert_eq!(argument.long_spelling(), None);
        assert_eq!(argument.arity(), 0);
        assert_eq!(argument.position(), 0);
        assert!(!argument.is_required());
        assert_eq!(argument.default_value(), None);
        assert_eq!(argument.help_message(), None);
        assert!(!argument.has_action());
        assert_eq!(argument.class(), Class::Flag);
    }

    #[test]
    fn argument_repeat() {
        let argument = Argument::new("abc")
            .help("--this will get discarded--")
            .help("final")
            .default("1")
            .default(vec!["2", "3"]);

        assert_eq!(argument.help_message(), Some("final"));
        assert_eq!(argument.default_value(), Some(&Value::from(vec!["2", "3"])));
    }

    #[rstest]
    #[case(Argument::new("abc").long("--abc"), "--abc")]
    #[case(Argument::new("abc").short("-a"), "-a")]
    #[case(Argument::new("abc").short("-a").long("--abc"), "--abc")]
    #[case(Argument::new("abc").index(1), "abc")]
    fn argument_display_name(#[case] argument: Argument, #[case] expected: &str) {
        assert_eq!(argument.display_name(), expected);
    }

    #[test]
    fn argument_metavar() {
        assert_eq!(Argument::new("out-file").metavar(), "OUT_FILE");
    }

    #[test]
    fn argument_debug() {
        let argument = Argument::new("out")
            .short("-o")
            .long("--out")
            .takes(1)
            .action(|_| Ok(()));

        assert_eq!(
            format!("{argument:?}"),
            "Option[out, -o, --out, arity=1, index=0, action]"
        );
    }
}
