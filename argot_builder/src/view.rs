use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::model::{Key, Value};

/// The finalized values of a parse.
///
/// Every option answers to its canonical key and to each of its aliases.
/// Options without a default which did not appear on the command line are present but valueless.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Command, Key, Value};
///
/// let mut command = Command::new(["prog", "-f", "val1", "pos1"]);
/// command.do_not_trap_errors();
/// command.option("f").unwrap().aka("foo").unwrap();
/// let resolution = command.parse().unwrap();
///
/// assert_eq!(resolution.get("foo"), Some(&Value::from("val1")));
/// assert_eq!(resolution.argument(0), Some(&Value::from("pos1")));
/// assert!(resolution.is_set(&Key::from("f")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    slots: Vec<Slot>,
    keys: HashMap<Key, usize>,
    // Every key (canonical and alias), in natural order.
    order: Vec<Key>,
    arguments: BTreeMap<usize, usize>,
    // Named slots, in natural order of their canonical key.
    flags: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    key: Key,
    value: Option<Value>,
}

/// One option's contribution to a [`Resolution`].
pub(crate) struct Entry {
    pub(crate) key: Key,
    pub(crate) aliases: Vec<String>,
    pub(crate) value: Option<Value>,
}

impl Resolution {
    pub(crate) fn new(entries: Vec<Entry>) -> Self {
        let mut resolution = Resolution::default();

        for entry in entries {
            let slot = resolution.slots.len();

            match entry.key {
                Key::Index(index) => {
                    resolution.arguments.insert(index, slot);
                }
                Key::Name(_) => resolution.flags.push(slot),
            }

            for alias in entry.aliases {
                resolution.keys.insert(Key::Name(alias), slot);
            }

            resolution.keys.insert(entry.key.clone(), slot);
            resolution.slots.push(Slot {
                key: entry.key,
                value: entry.value,
            });
        }

        let mut order: Vec<Key> = resolution.keys.keys().cloned().collect();
        order.sort_by(natural_key_cmp);
        resolution.order = order;

        let slots = &resolution.slots;
        resolution
            .flags
            .sort_by(|a, b| natural_key_cmp(&slots[*a].key, &slots[*b].key));
        resolution
    }

    /// The value of the option answering to `key`.
    /// `None` when the option is undeclared, or declared but valueless.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.slot(&key.into())
            .and_then(|slot| self.slots[slot].value.as_ref())
    }

    /// The value of the positional argument at `index`.
    pub fn argument(&self, index: usize) -> Option<&Value> {
        self.get(Key::Index(index))
    }

    /// Whether `key` answers to a declared (or auto-created positional) option.
    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.slot(&key.into()).is_some()
    }

    /// Whether the option answering to `key` holds a set value (see [`Value::is_set`]).
    pub fn is_set(&self, key: &Key) -> bool {
        self.slot(key)
            .and_then(|slot| self.slots[slot].value.as_ref())
            .map(Value::is_set)
            .unwrap_or(false)
    }

    /// The set positional values, in index order.
    ///
    /// Valueless positionals are skipped, so a position in the result need not match the argument index.
    /// Use [`Resolution::argument`] to read by index.
    pub fn argument_values(&self) -> Vec<&Value> {
        self.arguments
            .values()
            .filter_map(|slot| self.slots[*slot].value.as_ref())
            .collect()
    }

    /// The set named values, keyed by canonical name, one entry per option.
    pub fn flag_values(&self) -> IndexMap<&str, &Value> {
        self.flags
            .iter()
            .filter_map(|slot| {
                let slot = &self.slots[*slot];

                match (&slot.key, &slot.value) {
                    (Key::Name(name), Some(value)) => Some((name.as_str(), value)),
                    _ => None,
                }
            })
            .collect()
    }

    /// The number of keys (aliases included).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was declared or supplied.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate every key (aliases included) with its value, in natural key order.
    pub fn iter(&self) -> Values<'_> {
        Values {
            resolution: self,
            position: 0,
        }
    }

    fn slot(&self, key: &Key) -> Option<usize> {
        self.keys.get(key).copied()
    }
}

impl<'a> IntoIterator for &'a Resolution {
    type Item = (&'a Key, Option<&'a Value>);
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys and values of a [`Resolution`].
#[derive(Debug)]
pub struct Values<'a> {
    resolution: &'a Resolution,
    position: usize,
}

impl<'a> Iterator for Values<'a> {
    type Item = (&'a Key, Option<&'a Value>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.resolution.order.get(self.position)?;
        self.position += 1;
        let slot = self.resolution.keys[key];
        Some((key, self.resolution.slots[slot].value.as_ref()))
    }
}

fn natural_key_cmp(a: &Key, b: &Key) -> Ordering {
    natural_cmp(&a.to_string(), &b.to_string())
}

/// Compare strings so that embedded digit runs order numerically (`a2` < `a10`).
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ordering = compare_digits(&l, &r);

                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }

                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::default();

    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }

        digits.push(c);
        chars.next();
    }

    digits
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');

    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.len().cmp(&b.len()))
}
