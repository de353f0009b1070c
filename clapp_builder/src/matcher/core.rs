use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::api::ArgumentRegistry;
use crate::constant::INDEX_PREFIX;
use crate::matcher::token::{normalize, Token};
use crate::model::{Class, Context, Value};
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The hand-off to a sub-command.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub(crate) name: String,
    /// The original tokens following the sub-command name.
    pub(crate) remaining: Vec<String>,
}

/// The result of the classification pass over one command level.
#[derive(Debug, Default)]
pub(crate) struct Matches {
    values: HashMap<usize, Value>,
    pending: Vec<usize>,
    dispatch: Option<Dispatch>,
}

/// Classify the tokens of one command level against its registry.
///
/// A token naming an argument (by short, long or bare name) is matched first, then a sub-command name, then the next free positional slot.
/// When a positional is named after its slot was filled, the displaced token moves on to the next free slot.
///
/// Errors are located by their character offset into `tokens`.
pub(crate) fn consume(
    registry: &ArgumentRegistry,
    sub_commands: &[&str],
    tokens: &[&str],
) -> Result<Matches, (usize, ParseError)> {
    let normalized = normalize(tokens);
    let end = total_length(tokens);
    let mut slots: VecDeque<usize> = registry.positional_order().collect();
    // Positional id -> the normalized token which filled its slot.
    let mut slotted: HashMap<usize, usize> = HashMap::default();
    let mut matches = Matches::default();
    let mut i = 0;

    while i < normalized.len() {
        let token = &normalized[i];
        i += 1;

        if let Some(id) = registry.find_token(&token.text) {
            let argument = registry.argument(id);

            let arity = if is_positional(argument.class()) {
                slots.retain(|slot| *slot != id);

                if let Some(displaced) = slotted.remove(&id) {
                    let displaced_token = &normalized[displaced];
                    let next = slots.pop_front().ok_or_else(|| {
                        (
                            displaced_token.offset,
                            ParseError::UnexpectedPositionalArgument(displaced_token.text.clone()),
                        )
                    })?;
                    slotted.insert(next, displaced);
                    matches.record(registry, next, Value::Text(displaced_token.text.clone()));
                }

                1
            } else {
                argument.arity
            };

            let payload = take_payload(token, arity, &normalized[i..], end)?;
            i += payload.len();

            let value = match arity {
                0 => Value::Bool(true),
                1 => Value::Text(payload.into_iter().next().expect("internal error - arity 1 payload")),
                _ => Value::List(payload),
            };
            matches.record(registry, id, value);
        } else if token.is_dashed() {
            return Err((token.offset, ParseError::UnknownArgument(token.text.clone())));
        } else if sub_commands.contains(&token.text.as_str()) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Matched sub-command '{}'.", token.text);
            }

            matches.dispatch.replace(Dispatch {
                name: token.text.clone(),
                remaining: tokens[token.source + 1..]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            });
            break;
        } else {
            match slots.pop_front() {
                Some(id) => {
                    slotted.insert(id, i - 1);
                    matches.record(registry, id, Value::Text(token.text.clone()));
                }
                None => {
                    return Err((
                        token.offset,
                        ParseError::UnexpectedPositionalArgument(token.text.clone()),
                    ));
                }
            }
        }
    }

    Ok(matches)
}

fn is_positional(class: Class) -> bool {
    matches!(class, Class::Positional | Class::RequiredPositional)
}

fn take_payload(
    token: &Token,
    arity: usize,
    following: &[Token],
    end: usize,
) -> Result<Vec<String>, (usize, ParseError)> {
    let mut payload = Vec::with_capacity(arity);

    for received in 0..arity {
        let error = || ParseError::MissingOptionValue {
            spelling: token.text.clone(),
            expected: arity,
            received,
        };

        match following.get(received) {
            None => return Err((end, error())),
            Some(next) if next.is_dashed() => return Err((next.offset, error())),
            Some(next) => payload.push(next.text.clone()),
        }
    }

    Ok(payload)
}

pub(crate) fn total_length(tokens: &[&str]) -> usize {
    tokens.iter().map(|t| t.chars().count()).sum()
}

impl Matches {
    fn record(&mut self, registry: &ArgumentRegistry, id: usize, value: Value) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched {value:?} to {:?}.", registry.argument(id));
        }

        if registry.argument(id).has_action() {
            self.pending.push(id);
        }

        self.values.insert(id, value);
    }

    /// The arguments with an action, in match order (repeats included).
    pub(crate) fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub(crate) fn take_dispatch(&mut self) -> Option<Dispatch> {
        self.dispatch.take()
    }

    /// Check that every required argument was matched.
    /// Required positionals are checked first (ascending index), then required options (declaration order).
    pub(crate) fn validate(&self, registry: &ArgumentRegistry, end: usize) -> Result<(), (usize, ParseError)> {
        for id in registry.positional_order() {
            let argument = registry.argument(id);

            if argument.is_required() && !self.values.contains_key(&id) {
                return Err((
                    end,
                    ParseError::MissingRequiredPositional(argument.name().to_string()),
                ));
            }
        }

        for id in registry.ids(Class::RequiredOption) {
            if !self.values.contains_key(id) {
                return Err((
                    end,
                    ParseError::MissingRequiredOption(
                        registry.argument(*id).display_name().to_string(),
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Build the context: matched values, then defaults for everything absent.
    pub(crate) fn resolve(&self, registry: &ArgumentRegistry, raw_args: Vec<String>) -> Context {
        let mut values = BTreeMap::default();
        let mut aliases = HashMap::default();

        for (id, argument) in registry.arguments() {
            let value = match self.values.get(&id) {
                Some(value) => value.clone(),
                None => match argument.class() {
                    Class::Flag => Value::Bool(false),
                    _ => argument
                        .default_value()
                        .filter(|value| !value.is_empty())
                        .cloned()
                        .unwrap_or(Value::Bool(false)),
                },
            };
            values.insert(argument.name().to_string(), value);

            if let Some(short) = argument.short_spelling() {
                aliases.insert(short.to_string(), argument.name().to_string());
            }

            if let Some(long) = argument.long_spelling() {
                aliases.insert(long.to_string(), argument.name().to_string());
            }

            if argument.position() != 0 {
                aliases.insert(
                    format!("{INDEX_PREFIX}{}", argument.position()),
                    argument.name().to_string(),
                );
            }
        }

        Context::new(values, aliases, raw_args)
    }
}
