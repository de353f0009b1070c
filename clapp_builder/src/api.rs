mod argument;
mod command;
mod registry;

pub(crate) use argument::Action;
pub use argument::Argument;
pub use command::CommandNode;
pub use registry::ArgumentRegistry;
