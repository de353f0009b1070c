use terminal_size::{terminal_size, Width};

use crate::api::{Argument, ArgumentRegistry};
use crate::model::Class;
use crate::parser::interface::{ColumnRenderer, UserInterface};

const MAIN_INDENT: usize = 1;
const SUB_COMMAND_PLACEHOLDER: &str = "[COMMAND]";

/// The descriptive details of a command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Metadata {
    pub(crate) version: Option<String>,
    pub(crate) about: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) usage: Option<String>,
}

pub(crate) struct Printer {
    metadata: Metadata,
    sub_commands: Vec<(String, Option<String>)>,
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal(metadata: Metadata, sub_commands: Vec<(String, Option<String>)>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(metadata, sub_commands, terminal_width)
    }

    pub(crate) fn new(
        metadata: Metadata,
        sub_commands: Vec<(String, Option<String>)>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            metadata,
            sub_commands,
            terminal_width,
        }
    }

    /// The usage line: the custom usage when configured, otherwise generated from the registry.
    ///
    /// Ex: `usage: program [-hv] [-o OUT_FILE] --target TARGET IN_FILE [EXTRA] [COMMAND]`
    pub(crate) fn usage(&self, program: &str, registry: &ArgumentRegistry) -> String {
        if let Some(usage) = &self.metadata.usage {
            return usage.clone();
        }

        let mut summary = vec![format!("usage: {program}")];
        let mut shorts = String::default();
        let mut longs = Vec::default();

        for id in registry.ids(Class::Flag) {
            let argument = registry.argument(*id);

            match argument.short_spelling() {
                Some(short) => shorts.push_str(&short[1..]),
                None => longs.push(format!("[{}]", argument.display_name())),
            }
        }

        if !shorts.is_empty() {
            summary.push(format!("[-{shorts}]"));
        }

        summary.extend(longs);

        for id in registry.ids(Class::Option) {
            summary.push(format!("[{}]", grammar(registry.argument(*id))));
        }

        for id in registry.ids(Class::RequiredOption) {
            summary.push(grammar(registry.argument(*id)));
        }

        for (class, bracket) in [(Class::RequiredPositional, false), (Class::Positional, true)] {
            for id in registry.positional_order() {
                let argument = registry.argument(id);

                if argument.class() == class {
                    if bracket {
                        summary.push(format!("[{}]", argument.metavar()));
                    } else {
                        summary.push(argument.metavar());
                    }
                }
            }
        }

        if !self.sub_commands.is_empty() {
            summary.push(SUB_COMMAND_PLACEHOLDER.to_string());
        }

        summary.join(" ")
    }

    pub(crate) fn print_usage(
        &self,
        program: &str,
        registry: &ArgumentRegistry,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(self.usage(program, registry));
    }

    pub(crate) fn print_version(
        &self,
        program: &str,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(self.title(program));
    }

    fn title(&self, program: &str) -> String {
        match &self.metadata.version {
            Some(version) => format!("{program} v{version}"),
            None => program.to_string(),
        }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        registry: &ArgumentRegistry,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let mut sections: Vec<(&str, Vec<(String, String)>)> = vec![(
            "sub-commands:",
            self.sub_commands
                .iter()
                .map(|(name, about)| (name.clone(), about.clone().unwrap_or_default()))
                .collect(),
        )];

        for (heading, class) in [
            ("flags:", Class::Flag),
            ("options:", Class::Option),
            ("required options:", Class::RequiredOption),
        ] {
            sections.push((
                heading,
                registry
                    .ids(class)
                    .iter()
                    .map(|id| registry.argument(*id))
                    .map(|argument| row(argument, with_values(spellings(argument), argument)))
                    .collect(),
            ));
        }

        for (heading, class) in [
            ("required arguments:", Class::RequiredPositional),
            ("optional arguments:", Class::Positional),
        ] {
            sections.push((
                heading,
                registry
                    .positional_order()
                    .map(|id| registry.argument(id))
                    .filter(|argument| argument.class() == class)
                    .map(|argument| row(argument, argument.metavar()))
                    .collect(),
            ));
        }

        let left_width = sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(left, _)| left.chars().count()))
            .max()
            .unwrap_or(0);
        let right_width = sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(_, right)| right.chars().count()))
            .max()
            .unwrap_or(0);
        let column_renderer =
            ColumnRenderer::guided(MAIN_INDENT, left_width, right_width, self.terminal_width);

        user_interface.print(self.title(program));

        if let Some(author) = &self.metadata.author {
            user_interface.print(author.clone());
        }

        if let Some(about) = &self.metadata.about {
            user_interface.print(about.clone());
        }

        user_interface.print("".to_string());
        self.print_usage(program, registry, user_interface);

        for (heading, rows) in sections {
            if rows.is_empty() {
                continue;
            }

            user_interface.print("".to_string());
            user_interface.print(heading.to_string());

            for (left, right) in rows {
                for line in column_renderer.render(&left, &right) {
                    user_interface.print(line);
                }
            }
        }
    }
}

fn row(argument: &Argument, left: String) -> (String, String) {
    (left, argument.help_message().unwrap_or_default().to_string())
}

/// How the argument is typed, ex: `-o OUT_FILE`.
fn grammar(argument: &Argument) -> String {
    let spelling = argument
        .short_spelling()
        .or(argument.long_spelling())
        .unwrap_or(argument.name());
    with_values(spelling.to_string(), argument)
}

fn with_values(spelling: String, argument: &Argument) -> String {
    if argument.arity() == 0 {
        spelling
    } else {
        let metavar = argument.metavar();
        let values = vec![metavar.as_str(); argument.arity()].join(" ");
        format!("{spelling} {values}")
    }
}

/// All the spellings of the argument, ex: `-o, --output`.
fn spellings(argument: &Argument) -> String {
    match (argument.short_spelling(), argument.long_spelling()) {
        (Some(short), Some(long)) => format!("{short}, {long}"),
        (Some(spelling), None) | (None, Some(spelling)) => spelling.to_string(),
        (None, None) => argument.name().to_string(),
    }
}

/// The tokens with a caret under the character at `offset`.
///
/// The offset counts characters across the tokens laid end to end (no separators).
/// An offset at the end points just past the last token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut consumed = 0;
        let mut separators = 0;

        for token in self.tokens.iter().take(self.tokens.len().saturating_sub(1)) {
            consumed += token.chars().count();

            if consumed <= self.offset {
                separators += 1;
            }
        }

        write!(
            f,
            "{}\n{:width$}^",
            self.tokens.join(" "),
            "",
            width = self.offset + separators
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::util::InMemoryInterface;
    use rstest::rstest;

    fn registry() -> ArgumentRegistry<'static> {
        let mut registry = ArgumentRegistry::default();
        registry
            .register(
                Argument::new("out_file")
                    .short("-o")
                    .long("--output")
                    .takes(1)
                    .help("The output file."),
            )
            .unwrap();
        registry
            .register(
                Argument::new("target")
                    .long("--target")
                    .takes(1)
                    .required(true)
                    .help("Where to deploy."),
            )
            .unwrap();
        registry
            .register(Argument::new("extra").index(2).help("Extra input."))
            .unwrap();
        registry
            .register(
                Argument::new("in_file")
                    .index(1)
                    .required(true)
                    .help("The input file."),
            )
            .unwrap();
        registry.ensure_help_and_version();
        registry
    }

    fn metadata() -> Metadata {
        Metadata {
            version: Some("1.0".to_string()),
            about: Some("Does things.".to_string()),
            author: Some("Jane".to_string()),
            usage: None,
        }
    }

    #[test]
    fn print_help() {
        // Setup
        let printer = Printer::new(
            metadata(),
            vec![("deploy".to_string(), Some("Deploy it.".to_string()))],
            Some(120),
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("prog", &registry(), &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"prog v1.0
Jane
Does things.

usage: prog [-hv] [-o OUT_FILE] --target TARGET IN_FILE [EXTRA] [COMMAND]

sub-commands:
 deploy                  Deploy it.

flags:
 -h, --help              Display help information.
 -v, --version           Display version information.

options:
 -o, --output OUT_FILE   The output file.

required options:
 --target TARGET         Where to deploy.

required arguments:
 IN_FILE                 The input file.

optional arguments:
 EXTRA                   Extra input."#
        );
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::new(Metadata::default(), vec![], None);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("prog", &ArgumentRegistry::default(), &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, "prog\n\nusage: prog");
    }

    #[test]
    fn print_help_wrapped() {
        // Setup
        let mut registry = ArgumentRegistry::default();
        registry
            .register(
                Argument::new("verbose")
                    .long("--verbose")
                    .help("Print a great deal of information about what is happening."),
            )
            .unwrap();
        let printer = Printer::new(Metadata::default(), vec![], Some(40));
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("prog", &registry, &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"prog

usage: prog [--verbose]

flags:
 --verbose   Print a great deal of
             information about what is
             happening."#
        );
    }

    #[rstest]
    #[case(Argument::new("a").short("-a"), "usage: prog [-a]")]
    #[case(Argument::new("a").long("--all"), "usage: prog [--all]")]
    #[case(Argument::new("pair").long("--pair").takes(2), "usage: prog [--pair PAIR PAIR]")]
    #[case(Argument::new("a").short("-a").required(true), "usage: prog -a")]
    #[case(Argument::new("in-file").index(1), "usage: prog [IN_FILE]")]
    fn usage(#[case] argument: Argument<'static>, #[case] expected: &str) {
        // Setup
        let mut registry = ArgumentRegistry::default();
        registry.register(argument).unwrap();
        let printer = Printer::new(Metadata::default(), vec![], None);

        // Execute & verify
        assert_eq!(printer.usage("prog", &registry), expected);
    }

    #[test]
    fn usage_custom() {
        let printer = Printer::new(
            Metadata {
                usage: Some("prog [anything]".to_string()),
                ..Metadata::default()
            },
            vec![],
            None,
        );

        assert_eq!(printer.usage("prog", &registry()), "prog [anything]");
    }

    #[rstest]
    #[case(Some("1.0"), "prog sub v1.0")]
    #[case(None, "prog sub")]
    fn print_version(#[case] version: Option<&str>, #[case] expected: &str) {
        // Setup
        let printer = Printer::new(
            Metadata {
                version: version.map(str::to_string),
                ..Metadata::default()
            },
            vec![],
            None,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_version("prog sub", &interface);

        // Verify
        assert_eq!(interface.consume_message(), expected);
    }

    #[rstest]
    #[case(0, vec![], "\n^")]
    #[case(0, vec!["abc"], "abc\n^")]
    #[case(2, vec!["abc"], "abc\n  ^")]
    #[case(3, vec!["abc"], "abc\n   ^")]
    #[case(0, vec!["abc", "de"], "abc de\n^")]
    #[case(3, vec!["abc", "de"], "abc de\n    ^")]
    #[case(4, vec!["abc", "de"], "abc de\n     ^")]
    #[case(5, vec!["abc", "de"], "abc de\n      ^")]
    #[case(4, vec!["x", "-abx"], "x -abx\n     ^")]
    #[case(4, vec!["é", "-äbx"], "é -äbx\n     ^")]
    #[case(3, vec!["ñé", "ü"], "ñé ü\n    ^")]
    fn error_context(#[case] offset: usize, #[case] tokens: Vec<&str>, #[case] expected: &str) {
        assert_eq!(ErrorContext::new(offset, &tokens).to_string(), expected);
    }
}
