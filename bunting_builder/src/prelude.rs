//! Traits which, typically, may be imported without concern: `use bunting::prelude::*`.

pub use crate::api::BoxError;

/// Behaviour to convert the raw value of a custom flag into `T`.
///
/// The command line and the environment are separate sources, and may be parsed differently.
/// An empty value (ex: `--level` with nothing after it) is handed over unchanged; it is up to the parser to accept or reject it.
///
/// Any `Fn(&str) -> Result<T, BoxError>` is a `Parser<T>` which treats both sources alike.
///
/// ### Example
/// ```
/// # use bunting_builder as bunting;
/// use bunting::prelude::*;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Level(u8);
///
/// struct LevelParser;
///
/// impl Parser<Level> for LevelParser {
///     fn parse_command_line(&self, raw: &str) -> Result<Level, BoxError> {
///         match raw {
///             "low" => Ok(Level(1)),
///             "high" => Ok(Level(9)),
///             _ => Err(format!("unknown level '{raw}'").into()),
///         }
///     }
///
///     fn parse_environment(&self, raw: &str) -> Result<Level, BoxError> {
///         Ok(Level(raw.parse()?))
///     }
/// }
///
/// assert_eq!(LevelParser.parse_command_line("high").unwrap(), Level(9));
/// assert_eq!(LevelParser.parse_environment("4").unwrap(), Level(4));
/// ```
pub trait Parser<T> {
    /// Parse a value assembled from the command line.
    fn parse_command_line(&self, raw: &str) -> Result<T, BoxError>;

    /// Parse a value read from an environment variable.
    fn parse_environment(&self, raw: &str) -> Result<T, BoxError>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&str) -> Result<T, BoxError>,
{
    fn parse_command_line(&self, raw: &str) -> Result<T, BoxError> {
        self(raw)
    }

    fn parse_environment(&self, raw: &str) -> Result<T, BoxError> {
        self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_parser() {
        let parser = |raw: &str| -> Result<usize, BoxError> { Ok(raw.len()) };
        assert_eq!(parser.parse_command_line("abc").unwrap(), 3);
        assert_eq!(parser.parse_environment("").unwrap(), 0);
    }
}
