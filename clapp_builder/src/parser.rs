mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ActionError, ConfigError, ParseError, RunError};
pub(crate) use interface::{ConsoleInterface, UserInterface};
pub(crate) use middleware::execute;
pub(crate) use printer::{ErrorContext, Metadata, Printer};

#[cfg(test)]
pub(crate) use interface::util;
