use indexmap::IndexMap;

use crate::constant::HELP_NAME;
use crate::matcher::{TokenKind, TokenQueue};
use crate::model::{Kind, Key, Value};
use crate::parser::{Interrupt, ParseError};
use crate::registry::{OptionId, Registry};
use crate::view::{Entry, Resolution};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Where the occurrences of a token are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Declared(OptionId),
    // A positional argument nobody declared.
    Dynamic(usize),
}

/// Parse `tokens` (the program name already stripped) against the `registry`.
///
/// All-or-nothing: the first failure aborts the parse.
pub(crate) fn run(
    registry: &Registry,
    tokens: &[String],
    use_default_help: bool,
) -> Result<Resolution, Interrupt> {
    let pending = consume(registry, tokens, use_default_help)?;
    let resolution = commit(registry, pending)?;
    check_requirements(registry, &resolution)?;
    check_relations(registry, &resolution)?;

    #[cfg(feature = "tracing_debug")]
    debug!(
        "Parsed {arguments} argument(s) and {flags} option(s).",
        arguments = resolution.argument_values().len(),
        flags = resolution.flag_values().len()
    );

    Ok(resolution)
}

fn consume(
    registry: &Registry,
    tokens: &[String],
    use_default_help: bool,
) -> Result<IndexMap<Target, Vec<Value>>, Interrupt> {
    let mut queue = TokenQueue::new(tokens, use_default_help);
    let mut pending: IndexMap<Target, Vec<Value>> = IndexMap::default();
    let mut positional_count: usize = 0;

    while let Some(token) = queue.next_token()? {
        if !token.kind.is_named() {
            let target = match registry.lookup(&Key::Index(positional_count)) {
                Some(id) => Target::Declared(id),
                None => {
                    #[cfg(feature = "tracing_debug")]
                    debug!("Auto-creating positional argument {positional_count}.");

                    Target::Dynamic(positional_count)
                }
            };

            pending
                .entry(target)
                .or_default()
                .push(Value::Str(token.name));
            positional_count += 1;
            continue;
        }

        if use_default_help && token.name == HELP_NAME {
            return Err(Interrupt::Help);
        }

        let id = registry
            .lookup(&Key::from(&token.name))
            .ok_or_else(|| ParseError::UnknownOption(token.name.clone()))?;
        let option = registry.get(id);
        let occurrence = match option.kind() {
            Kind::Boolean => option.toggled(),
            Kind::Increment { .. } => Value::Int(1),
            Kind::Plain | Kind::File { .. } => match queue.next_token()? {
                Some(next) if next.kind == TokenKind::Positional => Value::Str(next.name),
                _ => {
                    return Err(ParseError::ExpectedArgument { option: token.name }.into());
                }
            },
        };

        pending
            .entry(Target::Declared(id))
            .or_default()
            .push(occurrence);
    }

    Ok(pending)
}

fn commit(
    registry: &Registry,
    pending: IndexMap<Target, Vec<Value>>,
) -> Result<Resolution, ParseError> {
    let mut committed: IndexMap<OptionId, Value> = IndexMap::default();
    let mut dynamic: Vec<Entry> = Vec::default();

    for (target, occurrences) in pending {
        match target {
            Target::Declared(id) => {
                let option = registry.get(id);
                let mut current = option.initial_value().cloned();

                for raw in occurrences {
                    let next = option.resolve_value(current.as_ref(), raw)?;
                    current = Some(next);
                }

                if let Some(value) = current {
                    committed.insert(id, value);
                }
            }
            Target::Dynamic(index) => {
                dynamic.push(Entry {
                    key: Key::Index(index),
                    aliases: Vec::default(),
                    value: occurrences.into_iter().last(),
                });
            }
        }
    }

    let mut entries: Vec<Entry> = registry
        .iter()
        .map(|(id, option)| Entry {
            key: option.key().clone(),
            aliases: option.aliases().to_vec(),
            value: committed
                .swap_remove(&id)
                .or_else(|| option.initial_value().cloned()),
        })
        .collect();
    entries.extend(dynamic);
    Ok(Resolution::new(entries))
}

fn check_requirements(registry: &Registry, resolution: &Resolution) -> Result<(), ParseError> {
    for (_, option) in registry.iter() {
        if resolution.get(option.key()).is_none() && option.required_by(resolution) {
            return Err(ParseError::MissingRequired {
                class: option.class(),
                option: option.key().clone(),
            });
        }
    }

    Ok(())
}

fn check_relations(registry: &Registry, resolution: &Resolution) -> Result<(), ParseError> {
    for (_, option) in registry.iter() {
        option
            .has_needs(resolution)
            .map_err(|missing| ParseError::UnmetDependency {
                option: option.key().clone(),
                missing,
            })?;
        option
            .has_conflicts(resolution)
            .map_err(|conflicting| ParseError::ConflictingOptions {
                option: option.key().clone(),
                conflicting,
            })?;
    }

    Ok(())
}
