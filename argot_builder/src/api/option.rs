use crate::api::Command;
use crate::model::{Key, OptionSpec, Requirement, Value};
use crate::parser::DeclarationError;
use crate::registry::OptionId;
use crate::view::Resolution;

/// A handle on a declared option, for fluent configuration.
///
/// Every mutator returns the handle; declaring another option through the handle moves on to that option.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Command, Value};
///
/// let mut command = Command::new(["program", "-vv", "--exclude", "a", "--exclude", "b"]);
/// command
///     .option("v")
///     .unwrap()
///     .aka("verbose")
///     .unwrap()
///     .increment(0)
///     .option("exclude")
///     .unwrap()
///     .reduce(|accumulator, next| accumulator.push(next));
///
/// assert_eq!(command.get("verbose"), Some(&Value::Int(2)));
/// assert_eq!(command.get("exclude"), Some(&Value::from(vec!["a", "b"])));
/// ```
pub struct OptionBuilder<'c> {
    command: &'c mut Command,
    id: OptionId,
}

impl<'c> OptionBuilder<'c> {
    pub(crate) fn new(command: &'c mut Command, id: OptionId) -> Self {
        Self { command, id }
    }

    fn spec_mut(&mut self) -> &mut OptionSpec {
        self.command.registry_mut().get_mut(self.id)
    }

    /// The declaration so far.
    pub fn spec(&self) -> &OptionSpec {
        self.command.registry().get(self.id)
    }

    /// Declare (or revisit) another option on the same command.
    pub fn option(self, key: impl Into<Key>) -> Result<OptionBuilder<'c>, DeclarationError> {
        self.command.option(key)
    }

    /// Declare (or revisit) another named option on the same command.
    pub fn flag(self, name: &str) -> Result<OptionBuilder<'c>, DeclarationError> {
        self.command.flag(name)
    }

    /// Declare (or revisit) another positional argument on the same command.
    pub fn argument(self, index: usize) -> Result<OptionBuilder<'c>, DeclarationError> {
        self.command.argument(index)
    }

    /// Declare the positional argument following the highest declared index.
    pub fn next_argument(self) -> Result<OptionBuilder<'c>, DeclarationError> {
        self.command.next_argument()
    }

    /// Add a synonym, usable wherever the option's name is.
    /// Fails when the alias already refers to a different option.
    pub fn alias(mut self, alias: &str) -> Result<Self, DeclarationError> {
        let id = self.id;
        self.command.registry_mut().alias(id, alias)?;
        Ok(self)
    }

    /// Synonym of [`OptionBuilder::alias`].
    pub fn aka(self, alias: &str) -> Result<Self, DeclarationError> {
        self.alias(alias)
    }

    /// Make this a switch: it consumes no value, and its presence negates the default (`false` unless set).
    pub fn boolean(mut self) -> Self {
        self.spec_mut().set_boolean();
        self
    }

    /// Make this a counter: it consumes no value, and each occurrence adds one (the default is `0` unless set).
    /// The count is capped at `max`, unless `max` is `0`.
    pub fn increment(mut self, max: u32) -> Self {
        self.spec_mut().set_increment(max);
        self
    }

    /// Treat the value as a file path.
    ///
    /// With `allow_glob`, the value is expanded as a glob pattern into the sorted list of matching paths.
    /// With `must_exist`, the parse fails when the file is missing (or the pattern matches nothing).
    pub fn file(mut self, must_exist: bool, allow_glob: bool) -> Self {
        self.spec_mut().set_file_requirement(must_exist, allow_glob);
        self
    }

    /// Whether the option must be supplied (or defaulted).
    pub fn required(mut self, required: bool) -> Self {
        let requirement = if required {
            Requirement::Always
        } else {
            Requirement::Never
        };
        self.spec_mut().set_required(requirement);
        self
    }

    /// Require the option only when `predicate` holds for the otherwise resolved values.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Command, ParseError, Value};
    ///
    /// let mut command = Command::new(["program", "--mode", "remote"]);
    /// command.do_not_trap_errors().beep_on_error(false);
    /// command
    ///     .option("mode")
    ///     .unwrap()
    ///     .option("host")
    ///     .unwrap()
    ///     .required_when(|resolution| resolution.get("mode") == Some(&Value::from("remote")));
    ///
    /// assert!(matches!(command.parse(), Err(ParseError::MissingRequired { .. })));
    /// ```
    pub fn required_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Resolution) -> bool + 'static,
    {
        self.spec_mut()
            .set_required(Requirement::When(Box::new(predicate)));
        self
    }

    /// When this option is set, `key` must be set too.
    pub fn needs(mut self, key: impl Into<Key>) -> Self {
        self.spec_mut().add_needs(key.into());
        self
    }

    /// When this option is set, `key` must not be set.
    pub fn conflicts(mut self, key: impl Into<Key>) -> Self {
        self.spec_mut().add_conflicts(key.into());
        self
    }

    /// Validate each raw value with `rule`, before any mapping.
    pub fn must<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        self.spec_mut().set_rule(Box::new(rule));
        self
    }

    /// Transform each value (and the default) with `map`.
    pub fn map<F>(mut self, map: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        self.spec_mut().set_map(Box::new(map));
        self
    }

    /// Fold repeated occurrences with `reducer(accumulator, next)` instead of keeping only the last.
    /// The accumulator starts at the default, or an empty list.
    pub fn reduce<F>(mut self, reducer: F) -> Self
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        self.spec_mut().set_reducer(Box::new(reducer));
        self
    }

    /// The value when the option is absent from the command line.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.spec_mut().set_default(value.into());
        self
    }

    /// The name used for the option's value on the help page.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spec_mut().set_title(title.into());
        self
    }

    /// The help page description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec_mut().set_description(description.into());
        self
    }

    /// Synonym of [`OptionBuilder::description`].
    pub fn describe(self, description: impl Into<String>) -> Self {
        self.description(description)
    }
}
