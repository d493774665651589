use crate::files;
use crate::model::{Key, Value};
use crate::parser::ParseError;
use crate::view::Resolution;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) type Rule = Box<dyn Fn(&Value) -> bool>;
pub(crate) type Transform = Box<dyn Fn(Value) -> Value>;
pub(crate) type Reducer = Box<dyn Fn(Value, Value) -> Value>;
pub(crate) type Predicate = Box<dyn Fn(&Resolution) -> bool>;

/// How an option consumes the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Consumes the following token as its value.
    Plain,
    /// Consumes no value; presence negates the default.
    Boolean,
    /// Consumes no value; counts occurrences, capped at `max` when `max > 0`.
    Increment {
        /// The cap on the count (`0` is unbounded).
        max: u32,
    },
    /// Consumes the following token as a file path.
    File {
        /// Fail when no file matches.
        must_exist: bool,
        /// Expand the value as a glob pattern.
        allow_glob: bool,
    },
}

/// Whether an option or argument is required.
pub(crate) enum Requirement {
    Never,
    Always,
    // Evaluated once all tokens are consumed, against the full resolved set.
    When(Predicate),
}

/// The class of an option, used in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionClass {
    /// A named option (flag).
    Option,
    /// A positional argument.
    Argument,
}

impl std::fmt::Display for OptionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionClass::Option => write!(f, "option"),
            OptionClass::Argument => write!(f, "argument"),
        }
    }
}

/// The declaration of a single option or positional argument.
///
/// Built via [`OptionBuilder`](crate::OptionBuilder); read back via [`Command::option_spec`](crate::Command::option_spec).
pub struct OptionSpec {
    key: Key,
    aliases: Vec<String>,
    kind: Kind,
    required: Requirement,
    needs: Vec<Key>,
    conflicts: Vec<Key>,
    rule: Option<Rule>,
    map: Option<Transform>,
    reducer: Option<Reducer>,
    default: Option<Value>,
    // The default after the map transform, computed when the default is declared.
    initial: Option<Value>,
    title: Option<String>,
    description: Option<String>,
}

impl std::fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("key", &self.key)
            .field("aliases", &self.aliases)
            .field("kind", &self.kind)
            .field("needs", &self.needs)
            .field("conflicts", &self.conflicts)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl OptionSpec {
    pub(crate) fn new(key: Key) -> Self {
        Self {
            key,
            aliases: Vec::default(),
            kind: Kind::Plain,
            required: Requirement::Never,
            needs: Vec::default(),
            conflicts: Vec::default(),
            rule: None,
            map: None,
            reducer: None,
            default: None,
            initial: None,
            title: None,
            description: None,
        }
    }

    /// The canonical identity of this option.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether this is a named option or a positional argument.
    pub fn class(&self) -> OptionClass {
        if self.key.is_positional() {
            OptionClass::Argument
        } else {
            OptionClass::Option
        }
    }

    /// The aliases, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// How this option consumes the command line.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The declared default (before the map transform).
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value this option holds before any token is applied: the mapped default.
    pub fn initial_value(&self) -> Option<&Value> {
        self.initial.as_ref()
    }

    /// The declared needs.
    pub fn needs(&self) -> &[Key] {
        &self.needs
    }

    /// The declared conflicts.
    pub fn conflicts(&self) -> &[Key] {
        &self.conflicts
    }

    /// The title used when referring to this option in the help page.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The help description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the option is statically required.
    /// Predicate requirements are reported as not statically required.
    pub fn is_required(&self) -> bool {
        matches!(self.required, Requirement::Always)
    }

    /// Whether a reducer has been declared.
    pub fn has_reducer(&self) -> bool {
        self.reducer.is_some()
    }

    pub(crate) fn add_alias(&mut self, alias: String) {
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    pub(crate) fn set_boolean(&mut self) {
        self.kind = Kind::Boolean;

        if self.default.is_none() {
            self.set_default(Value::Bool(false));
        }
    }

    pub(crate) fn set_increment(&mut self, max: u32) {
        self.kind = Kind::Increment { max };

        if self.default.is_none() {
            self.set_default(Value::Int(0));
        }
    }

    pub(crate) fn set_file_requirement(&mut self, must_exist: bool, allow_glob: bool) {
        self.kind = Kind::File {
            must_exist,
            allow_glob,
        };
    }

    pub(crate) fn set_required(&mut self, required: Requirement) {
        self.required = required;
    }

    pub(crate) fn add_needs(&mut self, key: Key) {
        if !self.needs.contains(&key) {
            self.needs.push(key);
        }
    }

    pub(crate) fn add_conflicts(&mut self, key: Key) {
        if !self.conflicts.contains(&key) {
            self.conflicts.push(key);
        }
    }

    pub(crate) fn set_rule(&mut self, rule: Rule) {
        self.rule.replace(rule);
    }

    pub(crate) fn set_map(&mut self, map: Transform) {
        self.map.replace(map);
    }

    pub(crate) fn set_reducer(&mut self, reducer: Reducer) {
        self.reducer.replace(reducer);
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        let initial = self.apply_map(value.clone());
        self.initial.replace(initial);
        self.default.replace(value);
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title.replace(title);
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description.replace(description);
    }

    /// The token-less occurrence of a boolean option: the negation of its default.
    pub(crate) fn toggled(&self) -> Value {
        let default = self
            .default
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Value::Bool(!default)
    }

    pub(crate) fn required_by(&self, resolution: &Resolution) -> bool {
        match &self.required {
            Requirement::Never => false,
            Requirement::Always => true,
            Requirement::When(predicate) => predicate(resolution),
        }
    }

    fn apply_map(&self, value: Value) -> Value {
        match &self.map {
            Some(map) => map(value),
            None => value,
        }
    }

    /// Resolve one occurrence `raw` of this option against its `current` value, producing the next value.
    pub(crate) fn resolve_value(
        &self,
        current: Option<&Value>,
        raw: Value,
    ) -> Result<Value, ParseError> {
        match self.kind {
            Kind::Boolean => match raw {
                Value::Bool(_) => Ok(self.apply_map(raw)),
                other => Err(self.type_mismatch("boolean", other)),
            },
            Kind::Increment { max } => match raw {
                Value::Int(_) => {
                    // Counters are never mapped, so the current value is the running count.
                    let count = current.and_then(Value::as_int).unwrap_or(0) + 1;

                    if max > 0 && count > i64::from(max) {
                        Ok(Value::Int(i64::from(max)))
                    } else {
                        Ok(Value::Int(count))
                    }
                }
                other => Err(self.type_mismatch("integer", other)),
            },
            Kind::Plain | Kind::File { .. } => {
                if let Some(rule) = &self.rule {
                    if !rule(&raw) {
                        return Err(ParseError::ValidationFailed {
                            option: self.key.clone(),
                            value: raw,
                        });
                    }
                }

                let raw = match self.kind {
                    Kind::File {
                        must_exist,
                        allow_glob,
                    } => files::resolve(&self.key, raw, must_exist, allow_glob)?,
                    _ => raw,
                };

                let next = match &self.reducer {
                    Some(reducer) => {
                        let accumulator = current.cloned().unwrap_or(Value::List(Vec::default()));
                        reducer(accumulator, raw)
                    }
                    None => raw,
                };

                #[cfg(feature = "tracing_debug")]
                debug!("Resolved '{key}' to '{next}'.", key = self.key);

                Ok(self.apply_map(next))
            }
        }
    }

    /// The needs which are unmet in `resolution`: absent from the registry, or not set.
    /// Trivially met when this option itself is not set.
    pub(crate) fn has_needs(&self, resolution: &Resolution) -> Result<(), Vec<Key>> {
        if !resolution.is_set(&self.key) {
            return Ok(());
        }

        let unmet: Vec<Key> = self
            .needs
            .iter()
            .filter(|key| !resolution.is_set(key))
            .cloned()
            .collect();

        if unmet.is_empty() {
            Ok(())
        } else {
            Err(unmet)
        }
    }

    /// The conflicts which are set in `resolution`.
    /// Trivially none when this option itself is not set.
    pub(crate) fn has_conflicts(&self, resolution: &Resolution) -> Result<(), Vec<Key>> {
        if !resolution.is_set(&self.key) {
            return Ok(());
        }

        let present: Vec<Key> = self
            .conflicts
            .iter()
            .filter(|key| resolution.is_set(key))
            .cloned()
            .collect();

        if present.is_empty() {
            Ok(())
        } else {
            Err(present)
        }
    }

    fn type_mismatch(&self, expected: &'static str, found: Value) -> ParseError {
        ParseError::TypeMismatch {
            option: self.key.clone(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values() -> Vec<Value> {
        vec![
            Value::from("abc"),
            Value::from("The quick, brown fox jumps over a lazy dog."),
            Value::from("200"),
            Value::Int(200),
            Value::Int(0),
            Value::Bool(true),
            Value::Bool(false),
        ]
    }

    #[test]
    fn named_option() {
        let option = OptionSpec::new(Key::from("f"));
        assert_eq!(option.key(), &Key::from("f"));
        assert_eq!(option.class(), OptionClass::Option);
        assert_eq!(option.kind(), Kind::Plain);
    }

    #[test]
    fn positional_option() {
        let option = OptionSpec::new(Key::from(1usize));
        assert_eq!(option.key(), &Key::Index(1));
        assert_eq!(option.class(), OptionClass::Argument);
    }

    #[test]
    fn add_alias() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.add_alias("foo".to_string());
        option.add_alias("foobar".to_string());
        option.add_alias("foo".to_string());
        assert_eq!(option.aliases(), &["foo".to_string(), "foobar".to_string()]);
    }

    #[test]
    fn description() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_description("I'm cool".to_string());
        option.set_title("cool".to_string());
        assert_eq!(option.description(), Some("I'm cool"));
        assert_eq!(option.title(), Some("cool"));
    }

    #[test]
    fn resolve_plain() {
        let option = OptionSpec::new(Key::from("f"));

        for value in values() {
            assert_eq!(option.resolve_value(None, value.clone()).unwrap(), value);
        }
    }

    #[test]
    fn resolve_map() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_map(Box::new(|value: Value| Value::Str(format!("{value}{value}"))));

        for value in values() {
            assert_eq!(
                option.resolve_value(None, value.clone()).unwrap(),
                Value::Str(format!("{value}{value}"))
            );
        }
    }

    #[test]
    fn resolve_rule() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_rule(Box::new(|value: &Value| {
            value
                .as_str()
                .map(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
                .unwrap_or(false)
        }));

        assert_eq!(
            option.resolve_value(None, Value::from("2")).unwrap(),
            Value::from("2")
        );
        assert_matches!(
            option.resolve_value(None, Value::from("abc")),
            Err(ParseError::ValidationFailed { option, value }) if option == Key::from("f") && value == "abc"
        );
    }

    #[test]
    fn resolve_rule_before_map() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_rule(Box::new(|value: &Value| value.as_str().map_or(false, |s| s.parse::<u32>().is_ok())));
        option.set_map(Box::new(|value: Value| {
            // The rule guarantees the map only ever sees numeric strings.
            assert!(value.as_str().unwrap().parse::<u32>().is_ok());
            Value::Str(format!("{value}{value}"))
        }));

        assert_eq!(
            option.resolve_value(None, Value::from("21")).unwrap(),
            Value::from("2121")
        );
        assert_matches!(
            option.resolve_value(None, Value::from("ab")),
            Err(ParseError::ValidationFailed { .. })
        );
    }

    #[rstest]
    #[case(Value::from("true"))]
    #[case(Value::Int(1))]
    fn resolve_boolean_mismatch(#[case] raw: Value) {
        let mut option = OptionSpec::new(Key::from("b"));
        option.set_boolean();

        assert_matches!(
            option.resolve_value(None, raw),
            Err(ParseError::TypeMismatch { expected: "boolean", .. })
        );
    }

    #[test]
    fn boolean_defaults() {
        let mut option = OptionSpec::new(Key::from("b"));
        option.set_boolean();
        assert_eq!(option.initial_value(), Some(&Value::Bool(false)));
        assert_eq!(option.toggled(), Value::Bool(true));

        let mut option = OptionSpec::new(Key::from("b"));
        option.set_default(Value::Bool(true));
        option.set_boolean();
        assert_eq!(option.initial_value(), Some(&Value::Bool(true)));
        assert_eq!(option.toggled(), Value::Bool(false));
    }

    #[rstest]
    #[case(0, 4, 4)]
    #[case(3, 4, 3)]
    #[case(5, 4, 4)]
    #[case(1, 1, 1)]
    fn resolve_increment(#[case] max: u32, #[case] occurrences: usize, #[case] expected: i64) {
        let mut option = OptionSpec::new(Key::from("v"));
        option.set_increment(max);
        let mut current = option.initial_value().cloned();

        for _ in 0..occurrences {
            let next = option.resolve_value(current.as_ref(), Value::Int(1)).unwrap();
            current = Some(next);
        }

        assert_eq!(current, Some(Value::Int(expected)));
    }

    #[test]
    fn resolve_increment_mismatch() {
        let mut option = OptionSpec::new(Key::from("v"));
        option.set_increment(0);

        assert_matches!(
            option.resolve_value(None, Value::from("x")),
            Err(ParseError::TypeMismatch { expected: "integer", .. })
        );
    }

    #[test]
    fn resolve_reducer() {
        let mut option = OptionSpec::new(Key::from("exclude"));
        option.set_reducer(Box::new(|accumulator: Value, next: Value| accumulator.push(next)));
        option.set_default(Value::List(vec![]));
        assert!(option.has_reducer());

        let first = option
            .resolve_value(option.initial_value(), Value::from("name1"))
            .unwrap();
        let second = option
            .resolve_value(Some(&first), Value::from("name2"))
            .unwrap();

        assert_eq!(second, Value::from(vec!["name1", "name2"]));
    }

    #[rstest]
    #[case(values()[0].clone())]
    #[case(values()[3].clone())]
    #[case(values()[5].clone())]
    fn default_sets_initial(#[case] value: Value) {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_default(value.clone());
        assert_eq!(option.initial_value(), Some(&value));
        assert_eq!(option.default_value(), Some(&value));
    }

    #[test]
    fn default_is_mapped() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.set_map(Box::new(|value: Value| Value::Str(format!("<{value}>"))));
        option.set_default(Value::from("x"));
        assert_eq!(option.initial_value(), Some(&Value::from("<x>")));
        assert_eq!(option.default_value(), Some(&Value::from("x")));
    }

    #[test]
    fn needs_and_conflicts_dedupe() {
        let mut option = OptionSpec::new(Key::from("f"));
        option.add_needs(Key::from("foo"));
        option.add_needs(Key::from("foo"));
        option.add_conflicts(Key::from("bar"));
        option.add_conflicts(Key::from("bar"));
        assert_eq!(option.needs(), &[Key::from("foo")]);
        assert_eq!(option.conflicts(), &[Key::from("bar")]);
    }
}
