use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::model::Kind;
use crate::parser::interface::UserInterface;
use crate::parser::ColumnRenderer;

/// What the usage output shows for one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagUsage {
    pub name: String,
    pub shorthand: Option<char>,
    pub kind: Kind,
    pub separator: String,
    pub description: Option<String>,
    pub default: Option<String>,
    pub required: bool,
    pub env_var: Option<String>,
}

impl FlagUsage {
    #[cfg(test)]
    fn basic(name: &str, shorthand: Option<char>, kind: Kind) -> Self {
        Self {
            name: name.to_string(),
            shorthand,
            kind,
            separator: DEFAULT_SEPARATOR.to_string(),
            description: None,
            default: None,
            required: false,
            env_var: None,
        }
    }

    /// The value placeholder following the flag, including its leading space.
    /// Ex: `" PORT"`, `" ID[,...]"`, or nothing for switches.
    fn grammar(&self) -> String {
        let example = self.name.to_ascii_uppercase().replace('-', "_");

        match self.kind {
            kind if kind.is_switch() => "".to_string(),
            Kind::Slice(_) => format!(" {example}[{}...]", self.separator),
            _ => format!(" {example}"),
        }
    }

    fn summary(&self, grammar: &str) -> String {
        match self.shorthand {
            Some(s) => format!("[{SHORT_PREFIX}{s}{grammar}]"),
            None => format!("[{LONG_PREFIX}{}{grammar}]", self.name),
        }
    }

    fn flags(&self, grammar: &str) -> String {
        match self.shorthand {
            Some(s) => format!(
                "{SHORT_PREFIX}{s}{grammar}, {LONG_PREFIX}{}{grammar}",
                self.name
            ),
            None => format!("{LONG_PREFIX}{}{grammar}", self.name),
        }
    }

    fn help(&self) -> String {
        let mut parts = Vec::default();

        if let Some(description) = &self.description {
            parts.push(description.clone());
        }

        if let Some(default) = &self.default {
            parts.push(format!("(default: {default})"));
        }

        if self.required {
            parts.push("(required)".to_string());
        }

        parts.join(" ")
    }
}

pub(crate) struct Printer {
    flags: Vec<FlagUsage>,
    terminal_width: Option<usize>,
}

// Used when the terminal width is unknown.
const DEFAULT_MIDDLE_WIDTH: usize = 40;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

impl Printer {
    pub(crate) fn terminal(flags: Vec<FlagUsage>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(flags, terminal_width)
    }

    pub(crate) fn new(mut flags: Vec<FlagUsage>, terminal_width: Option<usize>) -> Self {
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            flags,
            terminal_width,
        }
    }

    pub(crate) fn print_usage(
        &self,
        program: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let mut summary = Vec::default();
        let mut rows = Vec::default();
        let mut left_column_width = 0;
        let mut middle_column_width = 0;
        let mut right_column_width = 0;

        for usage in &self.flags {
            let grammar = usage.grammar();
            summary.push(usage.summary(&grammar));
            let left = usage.flags(&grammar);
            let middle = usage.help();
            let right = usage.env_var.clone().unwrap_or_default();
            left_column_width = std::cmp::max(left_column_width, left.len());
            middle_column_width = std::cmp::max(middle_column_width, middle.len());
            right_column_width = std::cmp::max(right_column_width, right.len());
            rows.push((left, middle, right));
        }

        let column_renderer = match self.terminal_width {
            Some(total_width) => ColumnRenderer::guided(
                PADDING_WIDTH,
                left_column_width,
                middle_column_width,
                right_column_width,
                total_width.saturating_sub(MAIN_INDENT),
            ),
            None => ColumnRenderer::new(
                PADDING_WIDTH,
                left_column_width,
                std::cmp::min(middle_column_width, DEFAULT_MIDDLE_WIDTH),
                right_column_width,
            ),
        };

        let program = program.into();

        if summary.is_empty() {
            user_interface.print(format!("usage: {program}"));
        } else {
            user_interface.print(format!("usage: {program} {}", summary.join(" ")));
        }

        if rows.is_empty() {
            return;
        }

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for (left, middle, right) in rows {
            for line in column_renderer.render(MAIN_INDENT, &left, &middle, &right) {
                user_interface.print(line);
            }
        }
    }
}

/// Points a caret at the offending token of a failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// `offset` counts characters across the tokens, excluding the spaces between them.
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let mut consumed = 0;
        let mut column = None;

        for (i, token) in self.tokens.iter().enumerate() {
            if consumed + token.chars().count() > self.offset {
                // Each preceding token is followed by one space.
                column.replace(self.offset + i);
                break;
            }

            consumed += token.chars().count();
        }

        let column = column.unwrap_or(projection.chars().count().saturating_sub(1));
        write!(f, "{projection}\n{:column$}^", "")
    }
}
