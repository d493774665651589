pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_MESSAGE: &str = "Show the help page for this command.";

// Used when the terminal width cannot be detected (ex: output is piped).
pub(crate) const DEFAULT_TERMINAL_WIDTH: usize = 80;
pub(crate) const DESCRIPTION_INDENT: usize = 5;
pub(crate) const ERROR_PREFIX: &str = "ERROR: ";
pub(crate) const BELL: &str = "\x07";
