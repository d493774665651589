use terminal_size::{terminal_size, Width};

use crate::constant::{DEFAULT_TERMINAL_WIDTH, DESCRIPTION_INDENT, HELP_MESSAGE, HELP_NAME};
use crate::model::{Key, OptionSpec};
use crate::parser::UserInterface;
use crate::registry::Registry;
use crate::view::natural_cmp;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Descriptions never wrap narrower than this, however small the terminal.
const MINIMUM_WRAP_WIDTH: usize = 20;

/// Renders the help page of a command.
#[derive(Debug)]
pub(crate) struct Printer {
    width: usize,
}

struct HelpEntry {
    // The natural-first key of the option, which decides its position on the page.
    sort_key: String,
    head: String,
    description: Option<String>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let width = if let Some((Width(width), _)) = terminal_size() {
            width as usize
        } else {
            DEFAULT_TERMINAL_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        debug!("Rendering help at width {width}.");

        Self::new(width)
    }

    pub(crate) fn new(width: usize) -> Self {
        Self { width }
    }

    pub(crate) fn render(
        &self,
        program: &str,
        help: Option<&str>,
        registry: &Registry,
        use_default_help: bool,
    ) -> String {
        let mut lines = vec![format!(" {program}")];

        if let Some(help) = help {
            lines.push(String::default());
            lines.extend(wrap(help, self.width.max(MINIMUM_WRAP_WIDTH)));
        }

        lines.push(String::default());

        let mut entries: Vec<HelpEntry> = registry
            .iter()
            .map(|(_, option)| HelpEntry::from(option))
            .collect();

        if use_default_help && registry.lookup(&Key::from(HELP_NAME)).is_none() {
            entries.push(HelpEntry {
                sort_key: HELP_NAME.to_string(),
                head: Key::from(HELP_NAME).cli_form(),
                description: Some(HELP_MESSAGE.to_string()),
            });
        }

        entries.sort_by(|a, b| natural_cmp(&a.sort_key, &b.sort_key));
        let description_width = self
            .width
            .saturating_sub(DESCRIPTION_INDENT)
            .max(MINIMUM_WRAP_WIDTH);

        for entry in entries {
            lines.push(entry.head);

            if let Some(description) = entry.description {
                for line in wrap(&description, description_width) {
                    lines.push(format!("{:DESCRIPTION_INDENT$}{line}", ""));
                }
            }

            lines.push(String::default());
        }

        lines.join("\n")
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        help: Option<&str>,
        registry: &Registry,
        use_default_help: bool,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(self.render(program, help, registry, use_default_help));
    }
}

impl From<&OptionSpec> for HelpEntry {
    fn from(option: &OptionSpec) -> Self {
        let mut keys: Vec<Key> = vec![option.key().clone()];
        keys.extend(option.aliases().iter().map(Key::from));
        keys.sort_by(|a, b| natural_cmp(&a.to_string(), &b.to_string()));

        let mut head = match option.key() {
            Key::Index(index) => format!("arg {index}"),
            Key::Name(_) => keys
                .iter()
                .map(Key::cli_form)
                .collect::<Vec<String>>()
                .join(", "),
        };

        if let Some(title) = option.title() {
            head.push_str(&format!(" <{title}>"));
        }

        HelpEntry {
            sort_key: keys[0].to_string(),
            head,
            description: option.description().map(str::to_string),
        }
    }
}

/// Word-wrap a paragraph to `width` columns, hyphenating words that can't fit on a line of their own.
pub(crate) fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    // Leave room for the hyphen.
    let increment = width.saturating_sub(1).max(1);
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
