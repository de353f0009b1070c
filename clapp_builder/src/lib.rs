//! Builder module for `clapp`.
//! See [documentation root](https://docs.rs/clapp/latest/clapp/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{ActionError, ConfigError, ParseError, RunError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
