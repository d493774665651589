use thiserror::Error;

use crate::model::{Key, OptionClass, Value};

/// An error in the declaration of the command line parser.
///
/// Declaration errors are programmer mistakes, so they are always returned to the caller immediately
/// (regardless of [`Command::trap_errors`](crate::Command::trap_errors)).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    /// The option name is empty.
    #[error("Config error: invalid option name '': must be identified by a name or an integer index.")]
    EmptyName,

    /// The option name does not follow the flag grammar.
    #[error("Config error: invalid option name '{0}': must be a letter followed by letters, digits, '_' or '-'.")]
    MalformedName(String),

    /// A numeric string was used to name a flag.
    #[error("Config error: invalid option name '{0}': numeric names are reserved for positional arguments.")]
    NumericName(String),

    /// The alias is already registered to a different option.
    #[error("Config error: alias '{alias}' already refers to the option '{existing}'.")]
    AliasCollision {
        /// The offending alias.
        alias: String,
        /// The option which already owns the alias.
        existing: Key,
    },
}

/// An error encountered while parsing the command line.
///
/// The parse is all-or-nothing: once a `ParseError` is raised, no option values are exposed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A hyphen-prefixed token does not match the option grammar.
    #[error("Unable to parse option '{token}': invalid syntax.")]
    Syntax {
        /// The offending token.
        token: String,
    },

    /// The referenced option has not been declared.
    #[error("Unknown option '{0}' specified.")]
    UnknownOption(String),

    /// A boolean option received a non-boolean, or an increment option a non-integer.
    #[error("Option '{option}' expects a {expected} value, received {} '{found}'.", type_name(.found))]
    TypeMismatch {
        /// The option.
        option: Key,
        /// The expected type.
        expected: &'static str,
        /// The value received.
        found: Value,
    },

    /// The rule of the option rejected the value.
    #[error("Invalid value '{value}' for {}.", describe(.option))]
    ValidationFailed {
        /// The option.
        option: Key,
        /// The rejected (raw) value.
        value: Value,
    },

    /// A file option requires an existing file, but none matched.
    #[error("File '{path}' for {} does not exist.", describe(.option))]
    FileNotFound {
        /// The option.
        option: Key,
        /// The path (or glob pattern) which did not resolve.
        path: String,
    },

    /// A value-bearing option was not followed by a value.
    #[error("Unable to parse option '{option}': expected an argument.")]
    ExpectedArgument {
        /// The option, as it appeared on the command line.
        option: String,
    },

    /// A required option or argument was never supplied.
    #[error("Required {class} '{option}' must be specified.")]
    MissingRequired {
        /// Whether this is an option or an argument.
        class: OptionClass,
        /// The option.
        option: Key,
    },

    /// A needs constraint is not met.
    #[error("Option '{option}' does not have required option(s): {}.", join(.missing))]
    UnmetDependency {
        /// The option declaring the needs.
        option: Key,
        /// The needed options which are absent or unset.
        missing: Vec<Key>,
    },

    /// A conflicts constraint is violated.
    #[error("Option '{option}' conflicts with option(s): {}.", join(.conflicting))]
    ConflictingOptions {
        /// The option declaring the conflicts.
        option: Key,
        /// The conflicting options which are set.
        conflicting: Vec<Key>,
    },
}

fn describe(key: &Key) -> String {
    match key {
        Key::Name(name) => format!("option '{name}'"),
        Key::Index(index) => format!("argument {index}"),
    }
}

fn type_name(value: &Value) -> &'static str {
    value.type_name()
}

fn join(keys: &[Key]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Why the parse engine stopped before producing a resolution.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Interrupt {
    /// The built-in help option was encountered.
    Help,
    Failed(ParseError),
}

impl From<ParseError> for Interrupt {
    fn from(error: ParseError) -> Self {
        Interrupt::Failed(error)
    }
}

/// What the error policy decided for an interrupted parse.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Exit(i32),
    Propagate(ParseError),
}
