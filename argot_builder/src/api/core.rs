use indexmap::IndexMap;
use std::cell::OnceCell;

use crate::api::OptionBuilder;
use crate::matcher;
use crate::model::{Key, OptionSpec, Value};
use crate::parser::{
    ConsoleInterface, DeclarationError, Interrupt, ParseError, Printer, UserInterface, Verdict,
};
use crate::registry::Registry;
use crate::view::Resolution;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser.
///
/// Declare options with [`Command::option`], [`Command::flag`] and [`Command::argument`], then read values back.
/// The first read (or an explicit [`Command::parse`]) parses the tokens; the parse happens exactly once.
///
/// By default, parse errors are trapped: the error is printed, the terminal beeps and the process exits with status `1`.
/// Use [`Command::do_not_trap_errors`] to receive the [`ParseError`] instead.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Command, Value};
///
/// let mut command = Command::new(["greet", "--title", "Mr", "Bond"]);
/// command
///     .argument(0)
///     .unwrap()
///     .required(true)
///     .title("name")
///     .option("title")
///     .unwrap()
///     .aka("t")
///     .unwrap()
///     .must(|value| matches!(value.as_str(), Some("Mr" | "Ms" | "Mrs")));
///
/// assert_eq!(command.get("t"), Some(&Value::from("Mr")));
/// assert_eq!(command.get(0usize), Some(&Value::from("Bond")));
/// ```
pub struct Command {
    tokens: Vec<String>,
    registry: Registry,
    help: Option<String>,
    use_default_help: bool,
    trap_errors: bool,
    beep_on_error: bool,
    user_interface: Box<dyn UserInterface>,
    outcome: OnceCell<Result<Resolution, ParseError>>,
}

impl Command {
    /// Create a command over `tokens`, the first of which is the program name.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Command;
    ///
    /// let command = Command::new(["program", "a", "b"]);
    /// assert_eq!(command.program(), "program");
    /// assert_eq!(command.argument_values().len(), 2);
    /// ```
    pub fn new(tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_interface(tokens, Box::new(ConsoleInterface::default()))
    }

    /// Create a command over the process arguments ([`std::env::args`]).
    pub fn from_env() -> Self {
        Self::new(std::env::args())
    }

    pub(crate) fn with_interface(
        tokens: impl IntoIterator<Item = impl Into<String>>,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            registry: Registry::default(),
            help: None,
            use_default_help: true,
            trap_errors: true,
            beep_on_error: true,
            user_interface,
            outcome: OnceCell::new(),
        }
    }

    /// Document this command for the help page.
    /// If repeated, only the final help text will apply.
    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help.replace(text.into());
        self
    }

    /// Whether `-help`/`--help` prints the help page and exits (default `true`).
    pub fn use_default_help(&mut self, enabled: bool) -> &mut Self {
        self.use_default_help = enabled;
        self
    }

    /// Whether parse errors print, beep and exit with status `1` (default `true`).
    /// When disabled, parse errors are returned by [`Command::parse`].
    pub fn trap_errors(&mut self, enabled: bool) -> &mut Self {
        self.trap_errors = enabled;
        self
    }

    /// Shorthand for `trap_errors(false)`.
    pub fn do_not_trap_errors(&mut self) -> &mut Self {
        self.trap_errors(false)
    }

    /// Whether the terminal beeps on a parse error (default `true`).
    pub fn beep_on_error(&mut self, enabled: bool) -> &mut Self {
        self.beep_on_error = enabled;
        self
    }

    /// Declare an option by name or positional index.
    /// Declaring an existing key (canonical or alias) returns a handle to the existing option.
    ///
    /// Declarations made after the command has parsed do not affect the parse.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Command;
    ///
    /// let mut command = Command::new(["program"]);
    /// command.option("f").unwrap().alias("foo").unwrap();
    /// command.option("foo").unwrap().description("The same option.");
    ///
    /// assert_eq!(command.options_len(), 1);
    /// assert_eq!(command.option_spec("f").unwrap().description(), Some("The same option."));
    /// ```
    pub fn option(&mut self, key: impl Into<Key>) -> Result<OptionBuilder<'_>, DeclarationError> {
        let id = self.registry.declare(key.into())?;
        Ok(OptionBuilder::new(self, id))
    }

    /// Declare a named option.
    pub fn flag(&mut self, name: &str) -> Result<OptionBuilder<'_>, DeclarationError> {
        self.option(Key::from(name))
    }

    /// Declare the positional argument at `index` (`0` is the first token after the program name).
    pub fn argument(&mut self, index: usize) -> Result<OptionBuilder<'_>, DeclarationError> {
        self.option(Key::Index(index))
    }

    /// Declare the positional argument following the highest declared index.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Command;
    ///
    /// let mut command = Command::new(["program", "a", "b"]);
    /// command.next_argument().unwrap().title("first");
    /// command.next_argument().unwrap().title("second");
    ///
    /// assert_eq!(command.option_spec(1usize).unwrap().title(), Some("second"));
    /// ```
    pub fn next_argument(&mut self) -> Result<OptionBuilder<'_>, DeclarationError> {
        let index = self.registry.next_index();
        self.argument(index)
    }

    /// Parse the command line, if it hasn't been parsed already.
    ///
    /// With error trapping (the default) a parse error exits the process, and so does the help option.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Command, ParseError};
    ///
    /// let mut command = Command::new(["program", "--unknown"]);
    /// command.do_not_trap_errors().beep_on_error(false);
    ///
    /// assert_eq!(
    ///     command.parse().unwrap_err(),
    ///     ParseError::UnknownOption("unknown".to_string())
    /// );
    /// ```
    pub fn parse(&self) -> Result<&Resolution, ParseError> {
        match self.evaluate() {
            Ok(resolution) => Ok(resolution),
            Err(Verdict::Exit(code)) => std::process::exit(code),
            Err(Verdict::Propagate(error)) => Err(error),
        }
    }

    /// Parse once, deciding what happens to an interrupted parse.
    pub(crate) fn evaluate(&self) -> Result<&Resolution, Verdict> {
        if let Some(outcome) = self.outcome.get() {
            return outcome
                .as_ref()
                .map_err(|error| Verdict::Propagate(error.clone()));
        }

        #[cfg(feature = "tracing_debug")]
        debug!("Parsing {count} token(s).", count = self.tokens.len());

        match matcher::run(&self.registry, self.arguments(), self.use_default_help) {
            Ok(resolution) => self
                .outcome
                .get_or_init(|| Ok(resolution))
                .as_ref()
                .map_err(|error| Verdict::Propagate(error.clone())),
            Err(Interrupt::Help) => {
                self.print_help();
                Err(Verdict::Exit(0))
            }
            Err(Interrupt::Failed(error)) => {
                #[cfg(feature = "tracing_debug")]
                debug!("Parse failed: {error}");

                if self.beep_on_error {
                    self.user_interface.beep();
                }

                let _ = self.outcome.set(Err(error.clone()));

                if self.trap_errors {
                    self.user_interface.print_error(error.to_string());
                    Err(Verdict::Exit(1))
                } else {
                    Err(Verdict::Propagate(error))
                }
            }
        }
    }

    /// Whether the command line has been parsed (successfully or not).
    pub fn is_parsed(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// The program name (the first token).
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// All tokens, including the program name.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn arguments(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// The parsed values, parsing first if necessary.
    /// `None` when the parse failed.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.parse().ok()
    }

    /// The value of the option answering to `key`, parsing first if necessary.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.resolution().and_then(|resolution| resolution.get(key))
    }

    /// The value of the positional argument at `index`, parsing first if necessary.
    pub fn argument_value(&self, index: usize) -> Option<&Value> {
        self.get(Key::Index(index))
    }

    /// The set positional values in index order, parsing first if necessary.
    ///
    /// Valueless positionals are skipped (see [`Resolution::argument_values`]).
    pub fn argument_values(&self) -> Vec<&Value> {
        self.resolution()
            .map(Resolution::argument_values)
            .unwrap_or_default()
    }

    /// The set named values by canonical name, parsing first if necessary.
    pub fn flag_values(&self) -> IndexMap<&str, &Value> {
        self.resolution()
            .map(Resolution::flag_values)
            .unwrap_or_default()
    }

    /// Iterate every key (aliases included) with its value in natural key order, parsing first if necessary.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, Option<&Value>)> + '_ {
        self.resolution().into_iter().flat_map(Resolution::iter)
    }

    /// The number of declared options (aliases are not counted).
    pub fn options_len(&self) -> usize {
        self.registry.len()
    }

    /// The declaration of the option answering to `key`.
    pub fn option_spec(&self, key: impl Into<Key>) -> Option<&OptionSpec> {
        self.registry.find(&key.into())
    }

    /// Render the help page.
    pub fn help_text(&self) -> String {
        self.printer().render(
            self.program(),
            self.help.as_deref(),
            &self.registry,
            self.use_default_help,
        )
    }

    /// Print the help page.
    pub fn print_help(&self) {
        self.printer().print_help(
            self.program(),
            self.help.as_deref(),
            &self.registry,
            self.use_default_help,
            self.user_interface.as_ref(),
        );
    }

    fn printer(&self) -> Printer {
        Printer::terminal()
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
