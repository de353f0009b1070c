mod core;
mod token;

pub(crate) use self::core::{consume, total_length, Dispatch, Matches};
