use crate::api::{Action, ArgumentRegistry, CommandNode};
use crate::constant::HELP_LONG;
use crate::matcher::{consume, total_length, Dispatch};
use crate::model::Outcome;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::{ErrorContext, Printer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Run one command level against its tokens (the command name excluded).
///
/// Phases:
/// 1. Token matching aligns the tokens to arguments, stopping at a sub-command name.
/// 2. The help or version action, if matched, displays and stops (before any validation).
/// 3. Validation checks the required arguments, then the context is resolved with defaults.
/// 4. Actions run in match order.
/// 5. Control passes to the matched sub-command, or else the main callback.
pub(crate) fn execute(
    node: CommandNode,
    tokens: &[&str],
    program: String,
    user_interface: &(impl UserInterface + ?Sized),
) -> Result<Outcome, RunError> {
    let CommandNode {
        metadata,
        mut registry,
        sub_commands,
        main,
        ..
    } = node;
    registry.ensure_help_and_version();
    let printer = Printer::terminal(
        metadata,
        sub_commands
            .iter()
            .map(|sub_command| {
                (
                    sub_command.name.clone(),
                    sub_command.metadata.about.clone(),
                )
            })
            .collect(),
    );
    let sub_command_names: Vec<&str> = sub_commands
        .iter()
        .map(|sub_command| sub_command.name.as_str())
        .collect();

    let mut matches = match consume(&registry, &sub_command_names, tokens) {
        Ok(matches) => matches,
        Err((offset, error)) => {
            return Err(report(
                offset,
                error,
                tokens,
                &program,
                &registry,
                &printer,
                user_interface,
            ));
        }
    };
    let pending = matches.pending().to_vec();

    for id in &pending {
        match registry.argument(*id).action {
            Some(Action::Help) => {
                printer.print_help(&program, &registry, user_interface);
                return Ok(Outcome::Help);
            }
            Some(Action::Version) => {
                printer.print_version(&program, user_interface);
                return Ok(Outcome::Version);
            }
            _ => {}
        }
    }

    if let Err((offset, error)) = matches.validate(&registry, total_length(tokens)) {
        return Err(report(
            offset,
            error,
            tokens,
            &program,
            &registry,
            &printer,
            user_interface,
        ));
    }

    let context = matches.resolve(&registry, tokens.iter().map(|t| t.to_string()).collect());

    for id in &pending {
        if let Some(Action::Callback(callback)) = &mut registry.argument_mut(*id).action {
            if let Err(error) = callback(&context) {
                let error = RunError::from(error);
                user_interface.print_error(&error);
                return Err(error);
            }
        }
    }

    if let Some(Dispatch { name, remaining }) = matches.take_dispatch() {
        let sub_command = sub_commands
            .into_iter()
            .find(|sub_command| sub_command.name == name)
            .expect("internal error - dispatch must match a sub-command");
        let program = format!("{program} {name}");

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching to '{program}' with {remaining:?}.");
        }

        let remaining: Vec<&str> = remaining.iter().map(AsRef::as_ref).collect();
        return execute(sub_command, &remaining, program, user_interface);
    }

    match main {
        Some(main) => Ok(Outcome::Exit(main(context))),
        None => Ok(Outcome::Context(context)),
    }
}

fn report(
    offset: usize,
    error: ParseError,
    tokens: &[&str],
    program: &str,
    registry: &ArgumentRegistry,
    printer: &Printer,
    user_interface: &(impl UserInterface + ?Sized),
) -> RunError {
    let error = RunError::from(error);
    user_interface.print_error(&error);
    user_interface.print_error_context(ErrorContext::new(offset, tokens));
    printer.print_usage(program, registry, user_interface);
    user_interface.print(format!("For more information try {HELP_LONG}"));
    error
}
