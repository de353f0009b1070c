use std::collections::{BTreeMap, HashMap};

use crate::api::argument::{Action, Argument};
use crate::constant::*;
use crate::model::Class;
use crate::parser::ConfigError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The arguments of one command level.
///
/// The registry owns its arguments; the lookup indices and class sequences refer to them by position.
/// It is built before parsing and read-only afterwards.
///
/// ### Example
/// ```
/// # use clapp_builder as clapp;
/// use clapp::{Argument, ArgumentRegistry, Class};
///
/// let mut registry = ArgumentRegistry::default();
/// registry.register(Argument::new("out_file").short("o").long("--output").takes(1)).unwrap();
/// registry.register(Argument::new("in_file").index(1).required(true)).unwrap();
///
/// assert_eq!(registry.lookup("-o").unwrap().name(), "out_file");
/// assert_eq!(registry.lookup("--output").unwrap().name(), "out_file");
/// assert_eq!(registry.lookup("index1").unwrap().name(), "in_file");
/// assert!(registry.lookup("-x").is_none());
/// assert_eq!(registry.names(Class::RequiredPositional), vec!["in_file"]);
/// ```
#[derive(Debug, Default)]
pub struct ArgumentRegistry<'a> {
    arguments: Vec<Argument<'a>>,
    by_name: HashMap<String, usize>,
    by_short: HashMap<String, usize>,
    by_long: HashMap<String, usize>,
    by_index: BTreeMap<usize, usize>,
    flags: Vec<usize>,
    options: Vec<usize>,
    required_options: Vec<usize>,
    positionals: Vec<usize>,
    required_positionals: Vec<usize>,
}

impl<'a> ArgumentRegistry<'a> {
    /// Register an argument.
    ///
    /// Fails when the name, a spelling or the positional index is already taken, or when a spelling is malformed.
    pub fn register(&mut self, mut argument: Argument<'a>) -> Result<(), ConfigError> {
        if argument.name.is_empty() {
            return Err(invalid_format(&argument.name, "the name must not be empty."));
        }

        if self.by_name.contains_key(&argument.name) {
            return Err(ConfigError::DuplicateName(argument.name));
        }

        if let Some(short) = argument.short.take() {
            let short = normalize_short(&argument.name, &short)?;
            self.check_spelling(&self.by_short, &short, &argument.name)?;
            argument.short.replace(short);
        }

        if let Some(long) = &argument.long {
            validate_long(&argument.name, long)?;
            self.check_spelling(&self.by_long, long, &argument.name)?;
        }

        if argument.index != 0 {
            if let Some(existing) = self.by_index.get(&argument.index) {
                return Err(ConfigError::DuplicateIndex {
                    index: argument.index,
                    existing: self.arguments[*existing].name.clone(),
                    name: argument.name,
                });
            }
        }

        let id = self.arguments.len();
        self.by_name.insert(argument.name.clone(), id);

        if let Some(short) = &argument.short {
            self.by_short.insert(short.clone(), id);
        }

        if let Some(long) = &argument.long {
            self.by_long.insert(long.clone(), id);
        }

        if argument.index != 0 {
            self.by_index.insert(argument.index, id);
        }

        match argument.class() {
            Class::Flag => self.flags.push(id),
            Class::Option => self.options.push(id),
            Class::RequiredOption => self.required_options.push(id),
            Class::Positional => self.positionals.push(id),
            Class::RequiredPositional => self.required_positionals.push(id),
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registered {argument:?}.");
        }

        self.arguments.push(argument);
        Ok(())
    }

    fn check_spelling(
        &self,
        index: &HashMap<String, usize>,
        spelling: &str,
        name: &str,
    ) -> Result<(), ConfigError> {
        match index.get(spelling) {
            Some(existing) => Err(ConfigError::DuplicateSpelling {
                spelling: spelling.to_string(),
                existing: self.arguments[*existing].name.clone(),
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Find an argument by short spelling, long spelling, name, or positional key (`index{N}`), in that order.
    pub fn lookup(&self, key: &str) -> Option<&Argument<'a>> {
        self.find(key).map(|id| &self.arguments[id])
    }

    pub(crate) fn find(&self, key: &str) -> Option<usize> {
        self.find_token(key).or_else(|| {
            key.strip_prefix(INDEX_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| self.by_index.get(&n).copied())
        })
    }

    /// Find an argument by a command line token: its short, long or bare name.
    pub(crate) fn find_token(&self, token: &str) -> Option<usize> {
        self.by_short
            .get(token)
            .or_else(|| self.by_long.get(token))
            .or_else(|| self.by_name.get(token))
            .copied()
    }

    /// Inject the `help` (`-h`, `--help`) and `version` (`-v`, `--version`) arguments.
    ///
    /// Each is skipped when its long spelling (or name) is already registered.
    /// The short spelling is left off when already taken.
    /// Repeated calls have no further effect.
    pub fn ensure_help_and_version(&mut self) {
        self.ensure_builtin(HELP_NAME, HELP_SHORT, HELP_LONG, HELP_MESSAGE, Action::Help);
        self.ensure_builtin(
            VERSION_NAME,
            VERSION_SHORT,
            VERSION_LONG,
            VERSION_MESSAGE,
            Action::Version,
        );
    }

    fn ensure_builtin(
        &mut self,
        name: &str,
        short: &str,
        long: &str,
        help: &str,
        action: Action<'a>,
    ) {
        if self.by_long.contains_key(long) || self.by_name.contains_key(name) {
            return;
        }

        let mut argument = Argument::builtin(name, long, help, action);

        if !self.by_short.contains_key(short) {
            argument = argument.short(short);
        }

        self.register(argument)
            .expect("internal error - builtin arguments must not collide");
    }

    /// Get an argument by name.
    pub fn get(&self, name: &str) -> Option<&Argument<'a>> {
        self.by_name.get(name).map(|id| &self.arguments[*id])
    }

    /// The class of the argument with this name.
    pub fn class_of(&self, name: &str) -> Option<Class> {
        self.get(name).map(Argument::class)
    }

    /// The names of the arguments in a class, in declaration order.
    pub fn names(&self, class: Class) -> Vec<&str> {
        self.ids(class)
            .iter()
            .map(|id| self.arguments[*id].name.as_str())
            .collect()
    }

    /// Iterate all arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<'a>> {
        self.arguments.iter()
    }

    /// The number of registered arguments.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Whether no arguments are registered.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub(crate) fn ids(&self, class: Class) -> &[usize] {
        match class {
            Class::Flag => &self.flags,
            Class::Option => &self.options,
            Class::RequiredOption => &self.required_options,
            Class::Positional => &self.positionals,
            Class::RequiredPositional => &self.required_positionals,
        }
    }

    pub(crate) fn argument(&self, id: usize) -> &Argument<'a> {
        &self.arguments[id]
    }

    pub(crate) fn argument_mut(&mut self, id: usize) -> &mut Argument<'a> {
        &mut self.arguments[id]
    }

    /// The positional arguments, ascending by index.
    pub(crate) fn positional_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_index.values().copied()
    }

    pub(crate) fn arguments(&self) -> impl Iterator<Item = (usize, &Argument<'a>)> {
        self.arguments.iter().enumerate()
    }
}

fn invalid_format(name: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidFormat {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn normalize_short(name: &str, short: &str) -> Result<String, ConfigError> {
    let stripped = short.strip_prefix('-').unwrap_or(short);
    let mut chars = stripped.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' && c != '=' && !c.is_whitespace() => Ok(format!("-{c}")),
        _ => Err(invalid_format(
            name,
            format!("short '{short}' must be '-x' style."),
        )),
    }
}

fn validate_long(name: &str, long: &str) -> Result<(), ConfigError> {
    match long.strip_prefix("--") {
        Some(rest) if !rest.is_empty() && !rest.contains('=') && !rest.contains(char::is_whitespace) => {
            Ok(())
        }
        _ => Err(invalid_format(
            name,
            format!("long '{long}' must be '--xyz' style."),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    const CLASSES: [Class; 5] = [
        Class::Flag,
        Class::Option,
        Class::RequiredOption,
        Class::Positional,
        Class::RequiredPositional,
    ];

    #[test]
    fn register_classifies() {
        // Setup
        let mut registry = ArgumentRegistry::default();

        // Execute
        registry.register(Argument::new("verbose").short("-V")).unwrap();
        registry.register(Argument::new("out").long("--out").takes(1)).unwrap();
        registry
            .register(Argument::new("target").long("--target").takes(1).required(true))
            .unwrap();
        registry.register(Argument::new("extra").index(2)).unwrap();
        registry
            .register(Argument::new("in_file").index(1).required(true))
            .unwrap();

        // Verify
        assert_eq!(registry.names(Class::Flag), vec!["verbose"]);
        assert_eq!(registry.names(Class::Option), vec!["out"]);
        assert_eq!(registry.names(Class::RequiredOption), vec!["target"]);
        assert_eq!(registry.names(Class::Positional), vec!["extra"]);
        assert_eq!(registry.names(Class::RequiredPositional), vec!["in_file"]);
        assert_eq!(registry.class_of("in_file"), Some(Class::RequiredPositional));
        assert_eq!(registry.class_of("moot"), None);
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry
                .positional_order()
                .map(|id| registry.argument(id).name())
                .collect::<Vec<&str>>(),
            vec!["in_file", "extra"]
        );
    }

    #[test]
    fn register_partition_random() {
        for _ in 0..100 {
            // Setup
            let mut registry = ArgumentRegistry::default();
            let total: usize = thread_rng().gen_range(0..20);

            // Execute
            for i in 0..total {
                let index = if thread_rng().gen_bool(0.5) { i + 1 } else { 0 };
                registry
                    .register(
                        Argument::new(format!("arg{i}"))
                            .takes(thread_rng().gen_range(0..4))
                            .index(index)
                            .required(thread_rng().gen_bool(0.5)),
                    )
                    .unwrap();
            }

            // Verify
            // Every argument sits in precisely the sequence of its class.
            let mut seen: Vec<usize> = CLASSES
                .iter()
                .flat_map(|class| registry.ids(*class).to_vec())
                .collect();
            seen.sort();
            assert_eq!(seen, (0..total).collect::<Vec<usize>>());

            for class in CLASSES {
                for id in registry.ids(class) {
                    assert_eq!(registry.argument(*id).class(), class);
                }
            }
        }
    }

    #[test]
    fn register_duplicate_name() {
        let mut registry = ArgumentRegistry::default();
        registry.register(Argument::new("abc").short("-a")).unwrap();

        let error = registry
            .register(Argument::new("abc").short("-b"))
            .unwrap_err();

        assert_eq!(error, ConfigError::DuplicateName("abc".to_string()));
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("-b").is_none());
    }

    #[rstest]
    #[case(Argument::new("b").short("-a"), "-a")]
    #[case(Argument::new("b").short("a"), "-a")]
    #[case(Argument::new("b").long("--abc"), "--abc")]
    fn register_duplicate_spelling(#[case] argument: Argument, #[case] spelling: &str) {
        let mut registry = ArgumentRegistry::default();
        registry
            .register(Argument::new("a").short("-a").long("--abc"))
            .unwrap();

        let error = registry.register(argument).unwrap_err();

        assert_eq!(
            error,
            ConfigError::DuplicateSpelling {
                spelling: spelling.to_string(),
                existing: "a".to_string(),
                name: "b".to_string(),
            }
        );
    }

    #[test]
    fn register_duplicate_index() {
        let mut registry = ArgumentRegistry::default();
        registry.register(Argument::new("a").index(1)).unwrap();

        let error = registry.register(Argument::new("b").index(1)).unwrap_err();

        assert_matches!(error, ConfigError::DuplicateIndex { index: 1, existing, name } => {
            assert_eq!(existing, "a");
            assert_eq!(name, "b");
        });
    }

    #[rstest]
    #[case(Argument::new(""))]
    #[case(Argument::new("a").short("-ab"))]
    #[case(Argument::new("a").short("ab"))]
    #[case(Argument::new("a").short("-"))]
    #[case(Argument::new("a").short("--"))]
    #[case(Argument::new("a").short("-="))]
    #[case(Argument::new("a").short(""))]
    #[case(Argument::new("a").long("-abc"))]
    #[case(Argument::new("a").long("abc"))]
    #[case(Argument::new("a").long("--"))]
    #[case(Argument::new("a").long("--a=b"))]
    #[case(Argument::new("a").long("--a b"))]
    fn register_invalid_format(#[case] argument: Argument) {
        let mut registry = ArgumentRegistry::default();

        let error = registry.register(argument).unwrap_err();

        assert_matches!(error, ConfigError::InvalidFormat { .. });
        assert!(registry.is_empty());
    }

    #[rstest]
    #[case("-a", "-a")]
    #[case("a", "-a")]
    #[case("-1", "-1")]
    fn register_short_normalized(#[case] short: &str, #[case] expected: &str) {
        let mut registry = ArgumentRegistry::default();

        registry.register(Argument::new("abc").short(short)).unwrap();

        assert_eq!(registry.get("abc").unwrap().short_spelling(), Some(expected));
        assert_eq!(registry.lookup(expected).unwrap().name(), "abc");
    }

    #[test]
    fn lookup_order() {
        // Setup
        // A name which is also another argument's long spelling: the spelling wins.
        let mut registry = ArgumentRegistry::default();
        registry
            .register(Argument::new("--abc").index(1))
            .unwrap();
        registry
            .register(Argument::new("other").long("--abc"))
            .unwrap();

        // Execute & verify
        assert_eq!(registry.lookup("--abc").unwrap().name(), "other");
        assert_eq!(registry.lookup("index1").unwrap().name(), "--abc");
        assert!(registry.lookup("index2").is_none());
        assert!(registry.lookup("indexx").is_none());
    }

    #[test]
    fn ensure_help_and_version_empty() {
        let mut registry = ArgumentRegistry::default();

        registry.ensure_help_and_version();

        let help = registry.get(HELP_NAME).unwrap();
        assert_eq!(help.short_spelling(), Some(HELP_SHORT));
        assert_eq!(help.long_spelling(), Some(HELP_LONG));
        assert_matches!(help.action, Some(Action::Help));
        let version = registry.get(VERSION_NAME).unwrap();
        assert_eq!(version.short_spelling(), Some(VERSION_SHORT));
        assert_eq!(version.long_spelling(), Some(VERSION_LONG));
        assert_matches!(version.action, Some(Action::Version));
        assert_eq!(registry.names(Class::Flag), vec![HELP_NAME, VERSION_NAME]);
    }

    #[test]
    fn ensure_help_and_version_idempotent() {
        let mut registry = ArgumentRegistry::default();

        registry.ensure_help_and_version();
        registry.ensure_help_and_version();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn ensure_help_and_version_user_long() {
        // Setup
        let mut registry = ArgumentRegistry::default();
        registry
            .register(Argument::new("my_help").long("--help").help("mine"))
            .unwrap();

        // Execute
        registry.ensure_help_and_version();

        // Verify
        assert!(registry.get(HELP_NAME).is_none());
        assert_eq!(registry.lookup("--help").unwrap().name(), "my_help");
        assert_eq!(registry.lookup("--help").unwrap().help_message(), Some("mine"));
        assert!(registry.lookup("-h").is_none());
        assert!(registry.get(VERSION_NAME).is_some());
    }

    #[test]
    fn ensure_help_and_version_user_short() {
        // Setup
        let mut registry = ArgumentRegistry::default();
        registry
            .register(Argument::new("verbose").short("-v"))
            .unwrap();

        // Execute
        registry.ensure_help_and_version();

        // Verify
        let version = registry.get(VERSION_NAME).unwrap();
        assert_eq!(version.short_spelling(), None);
        assert_eq!(version.long_spelling(), Some(VERSION_LONG));
        assert_eq!(registry.lookup("-v").unwrap().name(), "verbose");
        assert_eq!(registry.lookup("--version").unwrap().name(), VERSION_NAME);
    }
}
