use thiserror::Error;
use uncased::UncasedStr;

use crate::api::{AnonymousFlag, ConversionError};
use crate::constant::SHORT_PREFIX;
use crate::matcher::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An invalid flag configuration.
/// These are programmer errors, caught when the [`FlagSet`](crate::FlagSet) is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two flags share a name (compared case-insensitively).
    #[error("Config error: Cannot duplicate the flag '{0}'.")]
    DuplicateName(String),

    /// Two flags share a shorthand (compared case-insensitively).
    #[error("Config error: Cannot duplicate the shorthand '{0}'.")]
    DuplicateShorthand(char),

    /// The name is empty or starts with `-`.
    #[error("Config error: Invalid flag name '{0}'.")]
    InvalidName(String),
}

/// A failure to assign a flag from its raw input.
///
/// Conversion failures keep the underlying cause, available via [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// `--name` does not refer to a registered flag.
    #[error("Parse error: Unknown flag '--{0}'.")]
    UnknownFlag(String),

    /// `-c` does not refer to a registered shorthand.
    #[error("Parse error: Unknown shorthand '-{0}'.")]
    UnknownShorthand(String),

    /// The flag was given twice on the command line, and its kind does not accumulate.
    #[error("Parse error: Flag '{0}' was already parsed.")]
    AlreadyParsed(String),

    /// The flag needs a value, but none followed it.
    #[error("Parse error: No value provided for flag '{0}'.")]
    NoValueProvided(String),

    /// The flag's value could not be converted to its type.
    #[error("Parse error: Failed to parse flag '{name}'.")]
    ConversionFailed {
        /// The flag name.
        name: String,
        /// The conversion failure.
        #[source]
        source: ConversionError,
    },

    /// A custom flag was given a value, but has no [`Parser`](crate::prelude::Parser).
    #[error("Parse error: No input parser defined for flag '{0}'.")]
    NoParserDefined(String),

    /// The flag's environment variable is set, but could not be read as unicode.
    #[error("Parse error: Unreadable environment value for flag '{name}'.")]
    Unreadable {
        /// The flag name.
        name: String,
        /// The read failure.
        #[source]
        source: std::env::VarError,
    },
}

// We need a (dyn .. [ignoring T] ..) here in order to put all the flags of varying types T under one collection.
pub(crate) type FlagBox = Box<dyn AnonymousFlag>;

/// The registered flags, in registration order.
#[derive(Default)]
pub(crate) struct Registry {
    flags: Vec<FlagBox>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.flags.iter().map(|flag| flag.meta().name()))
            .finish()
    }
}

impl Registry {
    pub(crate) fn register(&mut self, flag: FlagBox) -> Result<(), ConfigError> {
        let name = flag.meta().name();

        if name.is_empty() || name.starts_with(SHORT_PREFIX) {
            return Err(ConfigError::InvalidName(name.to_string()));
        }

        if self.position(name).is_some() {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }

        if let Some(shorthand) = flag.meta().shorthand() {
            if self.position_shorthand(shorthand).is_some() {
                return Err(ConfigError::DuplicateShorthand(shorthand));
            }
        }

        self.flags.push(flag);
        Ok(())
    }

    /// Find a flag by its exact name, ignoring ASCII case.
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.flags
            .iter()
            .position(|flag| UncasedStr::new(flag.meta().name()) == UncasedStr::new(name))
    }

    /// Find a flag by its shorthand, ignoring ASCII case.
    pub(crate) fn position_shorthand(&self, shorthand: char) -> Option<usize> {
        self.flags.iter().position(|flag| {
            flag.meta()
                .shorthand()
                .map_or(false, |s| s.eq_ignore_ascii_case(&shorthand))
        })
    }

    pub(crate) fn get(&self, name: &str) -> Option<&FlagBox> {
        self.position(name).map(|index| &self.flags[index])
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &FlagBox> {
        self.flags.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut FlagBox> {
        self.flags.iter_mut()
    }

    fn resolve(&mut self, target: &Target) -> Result<&mut FlagBox, ParseError> {
        let index = match target {
            Target::Long(name) => self
                .position(name)
                .ok_or_else(|| ParseError::UnknownFlag(name.to_string()))?,
            Target::Short(short) => {
                let mut chars = short.chars();
                let index = match (chars.next(), chars.next()) {
                    (Some(c), None) => self.position_shorthand(c),
                    _ => None,
                };
                index.ok_or_else(|| ParseError::UnknownShorthand(short.to_string()))?
            }
        };

        Ok(&mut self.flags[index])
    }

    /// Assign the flags from the command line `tokens`, stopping at the first error.
    ///
    /// Assignments made before the error remain.
    /// The error is paired with the character offset of the offending flag token.
    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<(), (usize, ParseError)> {
        for m in TokenScanner::new(tokens) {
            let flag = self.resolve(&m.target).map_err(|error| (m.offset, error))?;
            let raw = m.joined(flag.meta().separator());

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Matched {} to '{}' with value '{raw}'.",
                    m.target,
                    flag.meta().name()
                );
            }

            flag.from_command_line(&raw)
                .map_err(|error| (m.offset, error))?;
        }

        Ok(())
    }
}
