use std::collections::{BTreeMap, HashMap};

use crate::constant::RAW_ARGS_KEY;

/// A resolved argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The single token consumed by an arity-1 option, or by a positional argument.
    Text(String),
    /// The tokens consumed by an option of arity greater than 1.
    List(Vec<String>),
    /// Presence (`true`) of a flag, or the `false` placeholder for an absent argument.
    Bool(bool),
}

impl Value {
    /// The text of a `Value::Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The items of a `Value::List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is an empty `Value::Text` or `Value::List`.
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) => false,
        }
    }

    /// The boolean of a `Value::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// The classification of an argument, derived when it is registered.
///
/// Every argument falls in precisely one class:
/// ```console
/// index | required | arity | Class
/// ---------------------------------------------
/// != 0  | true     | any   | RequiredPositional
/// != 0  | false    | any   | Positional
/// 0     | true     | any   | RequiredOption
/// 0     | false    | > 0   | Option
/// 0     | false    | 0     | Flag
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// A zero-arity, non-positional, optional argument.
    Flag,
    /// A non-positional, optional argument consuming one or more tokens.
    Option,
    /// A non-positional argument which must appear on the command line.
    RequiredOption,
    /// An optional argument identified by position.
    Positional,
    /// A required argument identified by position.
    RequiredPositional,
}

impl Class {
    pub(crate) fn of(positional: bool, required: bool, arity: usize) -> Self {
        match (positional, required, arity > 0) {
            (true, true, _) => Class::RequiredPositional,
            (true, false, _) => Class::Positional,
            (false, true, _) => Class::RequiredOption,
            (false, false, true) => Class::Option,
            (false, false, false) => Class::Flag,
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The resolved mapping produced by a successful parse.
///
/// Holds one value per declared argument, keyed by the argument name.
/// The short (`-o`), long (`--output`) and positional (`index1`) spellings resolve to the same value.
/// The key `raw_args` resolves to the tokens handed to the command, unless an argument claims that name.
///
/// ### Example
/// ```
/// # use clapp_builder as clapp;
/// use clapp::{Argument, CommandNode, Outcome, Value};
///
/// let mut node = CommandNode::new("program");
/// node.add_argument(Argument::new("out_file").short("-o").long("--output").takes(1)).unwrap();
///
/// match node.run(&["--output", "out.txt"]).unwrap() {
///     Outcome::Context(context) => {
///         assert_eq!(context.text("out_file"), Some("out.txt"));
///         assert_eq!(context.text("-o"), Some("out.txt"));
///         assert_eq!(context.get("--output"), Some(&Value::from("out.txt")));
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    values: BTreeMap<String, Value>,
    aliases: HashMap<String, String>,
    raw_args: Value,
}

impl Context {
    pub(crate) fn new(
        values: BTreeMap<String, Value>,
        aliases: HashMap<String, String>,
        raw_args: Vec<String>,
    ) -> Self {
        Self {
            values,
            aliases,
            raw_args: Value::List(raw_args),
        }
    }

    /// Get the value under `key`: an argument name, one of its spellings, `index{N}`, or `raw_args`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values
            .get(key)
            .or_else(|| {
                self.aliases
                    .get(key)
                    .and_then(|name| self.values.get(name))
            })
            .or_else(|| (key == RAW_ARGS_KEY).then_some(&self.raw_args))
    }

    /// Whether `key` resolves to any value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The text under `key`, if it resolves to a `Value::Text`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// The items under `key`, if it resolves to a `Value::List`.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_list)
    }

    /// Whether `key` resolves to `Value::Bool(true)`.
    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    /// The tokens handed to the command (excluding the program name).
    pub fn raw_args(&self) -> &[String] {
        self.raw_args
            .as_list()
            .expect("internal error - raw_args must be a list")
    }

    /// Iterate the values by argument name, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of argument values (aliases and `raw_args` excluded).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no argument values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The result of running a [`CommandNode`](./struct.CommandNode.html).
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No main callback was configured; the resolved context is the result.
    Context(Context),
    /// The main callback ran and returned this exit code.
    Exit(i32),
    /// The help message was displayed.
    Help,
    /// The version message was displayed.
    Version,
}

impl Outcome {
    /// The process exit code matching this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Exit(code) => *code,
            Outcome::Context(_) | Outcome::Help | Outcome::Version => 0,
        }
    }
}
