/// The identity of an option.
///
/// Named options (flags) are identified by a `Key::Name`, which is also the form of every alias.
/// Positional arguments are identified by a `Key::Index`, starting at `0` after the program name.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::Key;
///
/// assert_eq!(Key::from("verbose"), Key::Name("verbose".to_string()));
/// assert_eq!(Key::from(2usize), Key::Index(2));
/// assert!(Key::from(2usize).is_positional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named option, specified via `-n` or `--name`.
    Name(String),
    /// A positional argument.
    Index(usize),
}

impl Key {
    /// Whether this key identifies a positional argument.
    pub fn is_positional(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// The key as it appears on the command line (ex: `-v`, `--verbose`, or `0` for a positional).
    pub fn cli_form(&self) -> String {
        match self {
            Key::Name(name) if name.chars().count() == 1 => format!("-{name}"),
            Key::Name(name) => format!("--{name}"),
            Key::Index(index) => index.to_string(),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name}"),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}
