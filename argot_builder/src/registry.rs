use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::model::{Key, OptionSpec};
use crate::parser::DeclarationError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Arena handle of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct OptionId(usize);

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("internal error - invalid name pattern")
    })
}

/// The declared options, indexed by every key (canonical or alias) they answer to.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    options: Vec<OptionSpec>,
    keys: HashMap<Key, OptionId>,
}

impl Registry {
    /// Declare the option `key`, or return the existing declaration which answers to `key`.
    pub(crate) fn declare(&mut self, key: Key) -> Result<OptionId, DeclarationError> {
        if let Some(id) = self.keys.get(&key) {
            return Ok(*id);
        }

        if let Key::Name(name) = &key {
            validate(name)?;
        }

        #[cfg(feature = "tracing_debug")]
        debug!("Declaring option '{key}'.");

        let id = OptionId(self.options.len());
        self.options.push(OptionSpec::new(key.clone()));
        self.keys.insert(key, id);
        Ok(id)
    }

    /// Register `alias` as a synonym of the option `id`.
    pub(crate) fn alias(&mut self, id: OptionId, alias: &str) -> Result<(), DeclarationError> {
        let key = Key::from(alias);

        match self.keys.get(&key).copied() {
            Some(existing) if existing == id => {}
            Some(existing) => {
                return Err(DeclarationError::AliasCollision {
                    alias: alias.to_string(),
                    existing: self.get(existing).key().clone(),
                });
            }
            None => {
                validate(alias)?;
                self.keys.insert(key, id);
            }
        }

        self.get_mut(id).add_alias(alias.to_string());
        Ok(())
    }

    pub(crate) fn lookup(&self, key: &Key) -> Option<OptionId> {
        self.keys.get(key).copied()
    }

    pub(crate) fn get(&self, id: OptionId) -> &OptionSpec {
        &self.options[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: OptionId) -> &mut OptionSpec {
        &mut self.options[id.0]
    }

    /// The option answering to `key`.
    pub(crate) fn find(&self, key: &Key) -> Option<&OptionSpec> {
        self.lookup(key).map(|id| self.get(id))
    }

    /// The number of distinct options (aliases are not counted).
    pub(crate) fn len(&self) -> usize {
        self.options.len()
    }

    /// The index one past the highest declared positional argument.
    pub(crate) fn next_index(&self) -> usize {
        self.options
            .iter()
            .filter_map(|option| match option.key() {
                Key::Index(index) => Some(index + 1),
                Key::Name(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// The options, in declaration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| (OptionId(index), option))
    }
}

fn validate(name: &str) -> Result<(), DeclarationError> {
    if name.is_empty() {
        Err(DeclarationError::EmptyName)
    } else if name.chars().all(|c| c.is_ascii_digit()) {
        Err(DeclarationError::NumericName(name.to_string()))
    } else if !name_pattern().is_match(name) {
        Err(DeclarationError::MalformedName(name.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn declare_idempotent() {
        let mut registry = Registry::default();
        let a = registry.declare(Key::from("f")).unwrap();
        let b = registry.declare(Key::from("f")).unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn declare_by_alias() {
        let mut registry = Registry::default();
        let id = registry.declare(Key::from("f")).unwrap();
        registry.alias(id, "foo").unwrap();

        assert_eq!(registry.declare(Key::from("foo")).unwrap(), id);
        assert_eq!(registry.find(&Key::from("foo")).unwrap().key(), &Key::from("f"));
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    #[case("", DeclarationError::EmptyName)]
    #[case("12", DeclarationError::NumericName("12".to_string()))]
    #[case("-x", DeclarationError::MalformedName("-x".to_string()))]
    #[case("a b", DeclarationError::MalformedName("a b".to_string()))]
    #[case("1a", DeclarationError::MalformedName("1a".to_string()))]
    fn declare_invalid(#[case] name: &str, #[case] expected: DeclarationError) {
        let mut registry = Registry::default();
        assert_eq!(registry.declare(Key::from(name)).unwrap_err(), expected);
    }

    #[rstest]
    #[case("v")]
    #[case("verbose")]
    #[case("dry-run")]
    #[case("dry_run2")]
    fn declare_valid(#[case] name: &str) {
        let mut registry = Registry::default();
        registry.declare(Key::from(name)).unwrap();
        assert!(registry.lookup(&Key::from(name)).is_some());
    }

    #[test]
    fn alias_collision() {
        let mut registry = Registry::default();
        let f = registry.declare(Key::from("f")).unwrap();
        let g = registry.declare(Key::from("g")).unwrap();
        registry.alias(f, "foo").unwrap();
        // Re-aliasing to the same option is fine.
        registry.alias(f, "foo").unwrap();

        assert_eq!(
            registry.alias(g, "foo").unwrap_err(),
            DeclarationError::AliasCollision {
                alias: "foo".to_string(),
                existing: Key::from("f"),
            }
        );
        assert_eq!(registry.get(f).aliases(), &["foo".to_string()]);
    }

    #[test]
    fn next_index() {
        let mut registry = Registry::default();
        assert_eq!(registry.next_index(), 0);
        registry.declare(Key::from("f")).unwrap();
        assert_eq!(registry.next_index(), 0);
        registry.declare(Key::from(2usize)).unwrap();
        assert_eq!(registry.next_index(), 3);
        registry.declare(Key::from(0usize)).unwrap();
        assert_eq!(registry.next_index(), 3);
    }
}
