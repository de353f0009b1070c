pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";
pub(crate) const HELP_MESSAGE: &str = "Display help information.";
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_SHORT: &str = "-v";
pub(crate) const VERSION_LONG: &str = "--version";
pub(crate) const VERSION_MESSAGE: &str = "Display version information.";
pub(crate) const RAW_ARGS_KEY: &str = "raw_args";
pub(crate) const INDEX_PREFIX: &str = "index";
