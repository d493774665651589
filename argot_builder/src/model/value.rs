/// A resolved (or raw) option value.
///
/// Tokens always arrive as `Value::Str`.
/// Boolean options resolve to `Value::Bool`, increment options to `Value::Int`, and globbed file options to `Value::List`.
/// Map transforms and reducers may produce any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean (switch) value.
    Bool(bool),
    /// An integer value, such as an increment count.
    Int(i64),
    /// A string value, such as a token from the command line.
    Str(String),
    /// A list of values, such as the accumulator of a reducer.
    List(Vec<Value>),
}

impl Value {
    /// Whether the value counts as "set" for needs/conflicts purposes.
    ///
    /// Presence decides, not truthiness: `"0"`, `""` and `0` are set.
    /// Only `false` and the empty list are unset.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Value;
    ///
    /// assert!(Value::from("0").is_set());
    /// assert!(Value::Int(0).is_set());
    /// assert!(!Value::Bool(false).is_set());
    /// assert!(Value::from("").is_set());
    /// ```
    pub fn is_set(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            Value::Int(_) => true,
            Value::Str(_) => true,
            Value::List(values) => !values.is_empty(),
        }
    }

    /// The string, if this is a `Value::Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The boolean, if this is a `Value::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer, if this is a `Value::Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The items, if this is a `Value::List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Append `item` to this value, turning it into a list if it isn't one already.
    /// Convenient as the body of a reducer.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Value;
    ///
    /// let list = Value::List(vec![]).push(Value::from("a")).push(Value::from("b"));
    /// assert_eq!(list, Value::from(vec!["a", "b"]));
    /// ```
    pub fn push(self, item: Value) -> Value {
        match self {
            Value::List(mut values) => {
                values.push(item);
                Value::List(values)
            }
            other => Value::List(vec![other, item]),
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::List(values) => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(true), true)]
    #[case(Value::Bool(false), false)]
    #[case(Value::Int(0), true)]
    #[case(Value::from("0"), true)]
    #[case(Value::from("abc"), true)]
    #[case(Value::from(""), true)]
    #[case(Value::List(vec![]), false)]
    #[case(Value::from(vec![""]), true)]
    fn is_set(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_set(), expected);
    }

    #[test]
    fn push_onto_scalar() {
        assert_eq!(
            Value::from("a").push(Value::from("b")),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::Int(4).to_string(), "4");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn compare_primitives() {
        assert_eq!(Value::from("abc"), "abc");
        assert_eq!(Value::Bool(true), true);
        assert_eq!(Value::Int(3), 3);
        assert_ne!(Value::Int(3), "3");
    }
}
