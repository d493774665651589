use regex::Regex;
use std::collections::VecDeque;
use std::sync::OnceLock;

use crate::constant::HELP_NAME;
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

fn option_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^(-{1,2})([A-Za-z][A-Za-z0-9_-]*)(?:=(.*))?$")
            .expect("internal error - invalid option pattern")
    })
}

/// The lexical class of a command line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `-x`
    Short,
    /// `--name`
    Long,
    Positional,
}

impl TokenKind {
    pub(crate) fn is_named(&self) -> bool {
        matches!(self, TokenKind::Short | TokenKind::Long)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) name: String,
    pub(crate) kind: TokenKind,
}

/// Classify a single token, splitting off any `=value` suffix.
pub(crate) fn classify(token: &str) -> Result<(Token, Option<String>), ParseError> {
    if !token.starts_with('-') {
        return Ok((
            Token {
                name: token.to_string(),
                kind: TokenKind::Positional,
            },
            None,
        ));
    }

    let captures = option_pattern()
        .captures(token)
        .ok_or_else(|| ParseError::Syntax {
            token: token.to_string(),
        })?;
    let kind = if captures[1].len() == 1 {
        TokenKind::Short
    } else {
        TokenKind::Long
    };
    let value = captures.get(3).map(|m| m.as_str().to_string());

    Ok((
        Token {
            name: captures[2].to_string(),
            kind,
        },
        value,
    ))
}

#[derive(Debug)]
enum Queued {
    Raw(String),
    // Split off from `--name=value`; never re-classified.
    Literal(String),
}

/// The pending tokens of a parse.
///
/// Grouped short options and `=value` suffixes are expanded in place, so the consumer sees one option per token.
/// With default help enabled, `-help` is kept whole rather than expanded into `-h -e -l -p`.
#[derive(Debug)]
pub(crate) struct TokenQueue {
    queue: VecDeque<Queued>,
    use_default_help: bool,
}

impl TokenQueue {
    pub(crate) fn new(tokens: &[String], use_default_help: bool) -> Self {
        Self {
            queue: tokens.iter().cloned().map(Queued::Raw).collect(),
            use_default_help,
        }
    }

    fn is_grouped(&self, token: &Token) -> bool {
        token.kind == TokenKind::Short
            && token.name.chars().count() > 1
            && !(self.use_default_help && token.name == HELP_NAME)
    }

    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        let raw = match self.queue.pop_front() {
            None => return Ok(None),
            Some(Queued::Literal(value)) => {
                return Ok(Some(Token {
                    name: value,
                    kind: TokenKind::Positional,
                }));
            }
            Some(Queued::Raw(raw)) => raw,
        };

        let (mut token, value) = classify(&raw)?;

        #[cfg(feature = "tracing_debug")]
        debug!("Classified '{raw}' as {kind:?}.", kind = token.kind);

        if let Some(value) = value {
            self.queue.push_front(Queued::Literal(value));
        }

        if self.is_grouped(&token) {
            let mut characters = token.name.chars();
            let first = characters.next().map(String::from).unwrap_or_default();
            let rest: Vec<char> = characters.collect();

            for character in rest.into_iter().rev() {
                self.queue.push_front(Queued::Raw(format!("-{character}")));
            }

            token.name = first;
        }

        Ok(Some(token))
    }
}
