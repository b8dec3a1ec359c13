use std::any::Any;

use crate::api::convert::{ConversionError, FlagValue};
use crate::constant::DEFAULT_SEPARATOR;
use crate::model::Kind;
use crate::parser::ParseError;
use crate::prelude::Parser;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The typed slot behind a flag.
///
/// Tracks the configured default, the most recently assigned value, and which sources have assigned it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCell<T> {
    default: Option<T>,
    current: Option<T>,
    from_command_line: bool,
    from_environment: bool,
}

impl<T> ValueCell<T> {
    pub(crate) fn new(default: Option<T>) -> Self {
        Self {
            default,
            current: None,
            from_command_line: false,
            from_environment: false,
        }
    }

    /// The effective value: the current value if one was assigned, otherwise the default.
    pub fn value(&self) -> Option<&T> {
        self.current.as_ref().or(self.default.as_ref())
    }

    /// The configured default.
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// The value assigned from either source, ignoring the default.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Whether the command line assigned this cell.
    pub fn is_set_from_command_line(&self) -> bool {
        self.from_command_line
    }

    /// Whether the environment assigned this cell.
    pub fn is_set_from_environment(&self) -> bool {
        self.from_environment
    }

    /// Whether either source assigned this cell.
    pub fn is_set(&self) -> bool {
        self.from_command_line || self.from_environment
    }

    pub(crate) fn assign_command_line(&mut self, value: T) {
        self.current.replace(value);
        self.from_command_line = true;
    }

    pub(crate) fn assign_environment(&mut self, value: T) {
        self.current.replace(value);
        self.from_environment = true;
    }
}

/// The descriptive attributes of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMeta {
    name: String,
    shorthand: Option<char>,
    description: Option<String>,
    separator: String,
    shared: bool,
    required: bool,
}

impl FlagMeta {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shorthand: None,
            description: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            shared: false,
            required: false,
        }
    }

    /// The long name, matched by `--name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single character alias, matched by `-c`.
    pub fn shorthand(&self) -> Option<char> {
        self.shorthand
    }

    /// The description shown in the usage output.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Splits slice values, and joins multi-token command line values.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Informational marker for flags shared across programs.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Informational marker; see [`FlagSet::missing_required`](crate::FlagSet::missing_required).
    pub fn is_required(&self) -> bool {
        self.required
    }
}

enum Conversion<T> {
    Builtin {
        convert: fn(&str, &str) -> Result<T, ConversionError>,
        occurrence: fn(&str, &str, &ValueCell<T>) -> Result<T, ConversionError>,
    },
    Custom(Option<Box<dyn Parser<T>>>),
}

/// A typed flag definition, registered via [`FlagSetBuilder::add`](crate::FlagSetBuilder::add).
///
/// ### Example
/// ```
/// # use bunting_builder as bunting;
/// use bunting::{Flag, FlagSet};
/// use std::time::Duration;
///
/// let mut flags = FlagSet::builder()
///     .add(Flag::<u16>::new("port").shorthand('p').default_value(8080))
///     .add(Flag::<Duration>::new("timeout").description("How long to wait."))
///     .build_flagset()
///     .unwrap();
///
/// flags.parse_tokens(&["-p", "9000", "--timeout", "1m30s"]).unwrap();
/// assert_eq!(flags.get::<u16>("port").unwrap(), 9000);
/// assert_eq!(flags.get::<Duration>("timeout").unwrap(), Duration::from_secs(90));
/// ```
pub struct Flag<T> {
    meta: FlagMeta,
    kind: Kind,
    cell: ValueCell<T>,
    conversion: Conversion<T>,
    describe: fn(&T) -> String,
}

impl<T> std::fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flag")
            .field("meta", &self.meta)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T: FlagValue> Flag<T> {
    /// Create a flag holding one of the built-in value types.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: FlagMeta::new(name),
            kind: T::KIND,
            cell: ValueCell::new(T::implicit_default()),
            conversion: Conversion::Builtin {
                convert: T::convert,
                occurrence: T::occurrence,
            },
            describe: T::describe,
        }
    }

    /// Create a flag from a [`FlagOptions`] record.
    ///
    /// ### Example
    /// ```
    /// # use bunting_builder as bunting;
    /// use bunting::{Flag, FlagOptions};
    ///
    /// let flag = Flag::with_options(FlagOptions {
    ///     shorthand: Some('v'),
    ///     default_value: Some(false),
    ///     ..FlagOptions::new("verbose")
    /// });
    /// assert_eq!(flag.meta().shorthand(), Some('v'));
    /// ```
    pub fn with_options(options: FlagOptions<T>) -> Self {
        let name = options.name.clone();
        Self::new(name).apply_options(options)
    }
}

impl<T: std::fmt::Debug + 'static> Flag<T> {
    /// Create a flag holding a caller defined type.
    ///
    /// The conversion is supplied via [`Flag::parser`].
    /// Until then, any value given to the flag fails with `NoParserDefined`.
    ///
    /// ### Example
    /// ```
    /// # use bunting_builder as bunting;
    /// use bunting::prelude::*;
    /// use bunting::{Flag, FlagSet};
    /// use std::net::IpAddr;
    ///
    /// let mut flags = FlagSet::builder()
    ///     .add(Flag::<IpAddr>::custom("bind").parser(|raw: &str| -> Result<IpAddr, BoxError> {
    ///         Ok(raw.parse()?)
    ///     }))
    ///     .build_flagset()
    ///     .unwrap();
    ///
    /// flags.parse_tokens(&["--bind", "127.0.0.1"]).unwrap();
    /// assert!(flags.get::<IpAddr>("bind").unwrap().is_loopback());
    /// ```
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            meta: FlagMeta::new(name),
            kind: Kind::Custom,
            cell: ValueCell::new(None),
            conversion: Conversion::Custom(None),
            describe: |value| format!("{value:?}"),
        }
    }

    /// Convert this flag's values with a caller supplied [`Parser`].
    /// If repeated, only the final parser will apply.
    ///
    /// This replaces any built-in conversion, making the flag a [`Kind::Custom`] flag.
    pub fn parser(mut self, parser: impl Parser<T> + 'static) -> Self {
        self.kind = Kind::Custom;
        self.conversion = Conversion::Custom(Some(Box::new(parser)));
        self
    }

    /// Create a caller defined flag from a [`FlagOptions`] record.
    ///
    /// Without [`FlagOptions::parser`], any value given to the flag fails with `NoParserDefined`.
    ///
    /// ### Example
    /// ```
    /// # use bunting_builder as bunting;
    /// use bunting::prelude::*;
    /// use bunting::{Flag, FlagOptions};
    /// use std::net::IpAddr;
    ///
    /// let mut options = FlagOptions::<IpAddr>::new("bind");
    /// options.parser = Some(Box::new(|raw: &str| -> Result<IpAddr, BoxError> { Ok(raw.parse()?) }));
    /// let flag = Flag::custom_with_options(options);
    /// assert_eq!(flag.meta().name(), "bind");
    /// ```
    pub fn custom_with_options(options: FlagOptions<T>) -> Self {
        let name = options.name.clone();
        Self::custom(name).apply_options(options)
    }
}

impl<T> Flag<T> {
    fn apply_options(mut self, options: FlagOptions<T>) -> Self {
        let FlagOptions {
            name: _,
            shorthand,
            description,
            separator,
            default_value,
            shared,
            required,
            parser,
        } = options;
        self.meta.shorthand = shorthand;
        self.meta.description = description;
        self.meta.shared = shared;
        self.meta.required = required;

        if let Some(separator) = separator {
            self.meta.separator = separator;
        }

        if let Some(default_value) = default_value {
            self.cell = ValueCell::new(Some(default_value));
        }

        if let Some(parser) = parser {
            self.kind = Kind::Custom;
            self.conversion = Conversion::Custom(Some(parser));
        }

        self
    }

    /// Document the description of this flag.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description.replace(description.into());
        self
    }

    /// Alias this flag with a single character, matched via `-c`.
    pub fn shorthand(mut self, shorthand: char) -> Self {
        self.meta.shorthand.replace(shorthand);
        self
    }

    /// Use `separator` to split slice values and join multi-token values (default `","`).
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.meta.separator = separator.into();
        self
    }

    /// The value this flag takes when neither the command line nor the environment supply one.
    pub fn default_value(mut self, value: T) -> Self {
        self.cell = ValueCell::new(Some(value));
        self
    }

    /// Mark this flag as shared.
    pub fn shared(mut self) -> Self {
        self.meta.shared = true;
        self
    }

    /// Mark this flag as required.
    /// Not enforced while parsing.
    pub fn required(mut self) -> Self {
        self.meta.required = true;
        self
    }

    /// The descriptive attributes of this flag.
    pub fn meta(&self) -> &FlagMeta {
        &self.meta
    }

    /// The kind of this flag.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The value slot of this flag.
    pub fn cell(&self) -> &ValueCell<T> {
        &self.cell
    }
}

/// The full set of attributes for a flag, as a single record.
///
/// The record form of the [`Flag`] builder methods.
pub struct FlagOptions<T> {
    /// The long name.
    pub name: String,
    /// The single character alias.
    pub shorthand: Option<char>,
    /// The description shown in the usage output.
    pub description: Option<String>,
    /// The separator; `None` keeps the default `","`.
    pub separator: Option<String>,
    /// The default value.
    pub default_value: Option<T>,
    /// Informational shared marker.
    pub shared: bool,
    /// Informational required marker.
    pub required: bool,
    /// The conversion, as with [`Flag::parser`]; `None` keeps the flag's own.
    pub parser: Option<Box<dyn Parser<T>>>,
}

impl<T> FlagOptions<T> {
    /// Options for the flag `name`, everything else unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shorthand: None,
            description: None,
            separator: None,
            default_value: None,
            shared: false,
            required: false,
            parser: None,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for FlagOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagOptions")
            .field("name", &self.name)
            .field("shorthand", &self.shorthand)
            .field("description", &self.description)
            .field("separator", &self.separator)
            .field("default_value", &self.default_value)
            .field("shared", &self.shared)
            .field("required", &self.required)
            .field("parser", &self.parser.is_some())
            .finish()
    }
}

/// Behaviour to assign a flag of an implicit generic type T from a raw `&str`.
///
/// The registry holds flags of varying types T in one collection, so it works through this trait.
pub(crate) trait AnonymousFlag {
    fn meta(&self) -> &FlagMeta;

    fn kind(&self) -> Kind;

    /// Assign a value assembled from the command line.
    fn from_command_line(&mut self, raw: &str) -> Result<(), ParseError>;

    /// Assign a value read from the environment.
    fn from_environment(&mut self, raw: &str) -> Result<(), ParseError>;

    fn is_set_from_command_line(&self) -> bool;

    fn is_set_from_environment(&self) -> bool;

    /// The default, rendered for the usage output.
    fn describe_default(&self) -> Option<String>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AnonymousFlag for Flag<T> {
    fn meta(&self) -> &FlagMeta {
        &self.meta
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn from_command_line(&mut self, raw: &str) -> Result<(), ParseError> {
        let name = &self.meta.name;

        if self.cell.from_command_line && !self.kind.is_repeatable() {
            return Err(ParseError::AlreadyParsed(name.clone()));
        }

        if raw.is_empty() && self.kind.requires_value() {
            return Err(ParseError::NoValueProvided(name.clone()));
        }

        let value = match &self.conversion {
            Conversion::Builtin { occurrence, .. } => {
                occurrence(raw, &self.meta.separator, &self.cell)
            }
            Conversion::Custom(Some(parser)) => parser
                .parse_command_line(raw)
                .map_err(|cause| ConversionError::new(raw, std::any::type_name::<T>(), cause)),
            Conversion::Custom(None) => {
                return Err(ParseError::NoParserDefined(name.clone()));
            }
        }
        .map_err(|source| ParseError::ConversionFailed {
            name: name.clone(),
            source,
        })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Assigned '{name}' from the command line: {}.", (self.describe)(&value));
        }

        self.cell.assign_command_line(value);
        Ok(())
    }

    fn from_environment(&mut self, raw: &str) -> Result<(), ParseError> {
        let name = &self.meta.name;
        let value = match &self.conversion {
            Conversion::Builtin { convert, .. } => convert(raw, &self.meta.separator),
            Conversion::Custom(Some(parser)) => parser
                .parse_environment(raw)
                .map_err(|cause| ConversionError::new(raw, std::any::type_name::<T>(), cause)),
            Conversion::Custom(None) => {
                return Err(ParseError::NoParserDefined(name.clone()));
            }
        }
        .map_err(|source| ParseError::ConversionFailed {
            name: name.clone(),
            source,
        })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Assigned '{name}' from the environment: {}.", (self.describe)(&value));
        }

        self.cell.assign_environment(value);
        Ok(())
    }

    fn is_set_from_command_line(&self) -> bool {
        self.cell.is_set_from_command_line()
    }

    fn is_set_from_environment(&self) -> bool {
        self.cell.is_set_from_environment()
    }

    fn describe_default(&self) -> Option<String> {
        self.cell.default_value().map(self.describe)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
