use crate::api::Command;
use crate::model::{Key, Value};
use crate::parser::ParseError;
use crate::view::Resolution;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A named sub-command, such as `commit` in `git commit -m message`.
///
/// The sub-command matches when the token after the program name equals its name.
/// A matching sub-command parses the remaining tokens (its name removed) with its own [`Command`].
/// A non-matching sub-command never parses.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{SubCommand, Value};
///
/// let tokens = ["git", "commit", "-m", "message"];
/// let mut commit = SubCommand::new("commit", tokens);
/// commit.command_mut().option("m").unwrap();
/// let mut push = SubCommand::new("push", tokens);
/// push.command_mut().option("force").unwrap().boolean();
///
/// assert!(commit.matches());
/// assert_eq!(commit.get("m"), Some(&Value::from("message")));
/// assert!(!push.matches());
/// assert_eq!(push.parse().unwrap(), None);
/// ```
pub struct SubCommand {
    name: String,
    matched: bool,
    command: Command,
}

impl SubCommand {
    /// Create the sub-command `name` over `tokens`, the first of which is the program name.
    pub fn new(
        name: impl Into<String>,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let name = name.into();
        let mut tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let matched = tokens.get(1) == Some(&name);

        if matched {
            tokens.remove(1);

            #[cfg(feature = "tracing_debug")]
            debug!("Sub-command '{name}' matched.");
        }

        Self {
            name,
            matched,
            command: Command::new(tokens),
        }
    }

    /// Create the sub-command `name` over the process arguments ([`std::env::args`]).
    pub fn from_env(name: impl Into<String>) -> Self {
        Self::new(name, std::env::args())
    }

    /// The name of this sub-command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this sub-command was invoked.
    pub fn matches(&self) -> bool {
        self.matched
    }

    /// The nested command, for declaring options and adjusting settings.
    pub fn command_mut(&mut self) -> &mut Command {
        &mut self.command
    }

    /// Parse when this sub-command was invoked; `None` when it wasn't.
    ///
    /// The error policy of the nested command applies (see [`Command::parse`]).
    pub fn parse(&self) -> Result<Option<&Resolution>, ParseError> {
        if self.matched {
            self.command.parse().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Whether this sub-command was invoked and has parsed.
    pub fn is_parsed(&self) -> bool {
        self.matched && self.command.is_parsed()
    }

    /// The value of the option answering to `key`; `None` when this sub-command wasn't invoked.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.parse().ok().flatten().and_then(|resolution| resolution.get(key))
    }

    /// The set positional values in index order; empty when this sub-command wasn't invoked.
    pub fn argument_values(&self) -> Vec<&Value> {
        self.parse()
            .ok()
            .flatten()
            .map(Resolution::argument_values)
            .unwrap_or_default()
    }

    /// Render the help page of the nested command.
    pub fn help_text(&self) -> String {
        self.command.help_text()
    }
}
