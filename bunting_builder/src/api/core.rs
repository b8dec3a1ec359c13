use std::env;
use thiserror::Error;

use crate::api::{Flag, FlagMeta, ValueCell};
use crate::model::{Counter, Kind};
use crate::parser::{
    ConfigError, ConsoleInterface, EnvError, EnvNaming, EnvSource, ErrorContext, FlagUsage,
    ParseError, Printer, ProcessEnv, Registry, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A failure to read back the value of a flag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// No flag is registered under the name.
    #[error("Value error: Unknown flag '{0}'.")]
    UnknownFlag(String),

    /// The flag holds a different type than the one requested.
    #[error("Value error: Flag '{name}' holds a {actual} value, not {expected}.")]
    TypeMismatch {
        /// The flag name.
        name: String,
        /// The requested type.
        expected: &'static str,
        /// The kind of the flag.
        actual: Kind,
    },

    /// The flag has neither a default nor an assigned value.
    #[error("Value error: Flag '{0}' has no value.")]
    Unset(String),
}

/// Builds a [`FlagSet`].
///
/// ### Example
/// ```
/// # use bunting_builder as bunting;
/// use bunting::{EnvNaming, Flag, FlagSetBuilder};
///
/// let flags = FlagSetBuilder::new()
///     .env(EnvNaming::new().prefix("app").uppercase())
///     .add(Flag::<String>::new("name").shorthand('n'))
///     .add(Flag::<bool>::new("verbose").shorthand('v'))
///     .build();
///
/// assert_eq!(flags.env_var_name("name"), Some("APP_NAME".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct FlagSetBuilder {
    registry: Registry,
    naming: Option<EnvNaming>,
    error: Option<ConfigError>,
}

impl FlagSetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive environment variable names with `naming`.
    /// If repeated, only the final naming will apply.
    ///
    /// Without this, flags bind to variables named exactly like the flag.
    pub fn env(mut self, naming: EnvNaming) -> Self {
        self.naming.replace(naming);
        self
    }

    /// Add a flag.
    ///
    /// Registration errors (ex: duplicate names) are deferred until the flag set is built.
    /// Only the first such error is kept.
    pub fn add<T: 'static>(mut self, flag: Flag<T>) -> Self {
        if self.error.is_none() {
            if let Err(error) = self.registry.register(Box::new(flag)) {
                self.error.replace(error);
            }
        }

        self
    }

    /// Build the flag set.
    pub fn build_flagset(self) -> Result<FlagSet, ConfigError> {
        let FlagSetBuilder {
            registry,
            naming,
            error,
        } = self;

        match error {
            Some(error) => Err(error),
            None => Ok(FlagSet { registry, naming }),
        }
    }

    /// Build the flag set.
    ///
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> FlagSet {
        match self.build_flagset() {
            Ok(flag_set) => flag_set,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// The registered flags, and the entry point for parsing and reading them back.
///
/// ### Example
/// ```
/// # use bunting_builder as bunting;
/// use bunting::{Counter, Flag, FlagSet};
///
/// let mut flags = FlagSet::builder()
///     .add(Flag::<String>::new("name"))
///     .add(Flag::<Counter>::new("verbose").shorthand('v'))
///     .add(Flag::<Vec<u32>>::new("id"))
///     .build_flagset()
///     .unwrap();
///
/// flags
///     .parse_tokens(&["--name", "Ada", "-vv", "--id", "1,2", "--id", "3"])
///     .unwrap();
///
/// assert_eq!(flags.get::<String>("name").unwrap(), "Ada");
/// assert_eq!(flags.count("verbose").unwrap(), 2);
/// assert_eq!(flags.get::<Vec<u32>>("id").unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct FlagSet {
    registry: Registry,
    naming: Option<EnvNaming>,
}

impl FlagSet {
    /// Start building a flag set.
    pub fn builder() -> FlagSetBuilder {
        FlagSetBuilder::new()
    }

    /// Add a flag after the flag set has been built.
    pub fn register<T: 'static>(&mut self, flag: Flag<T>) -> Result<(), ConfigError> {
        self.registry.register(Box::new(flag))
    }

    /// Assign flags from the command line `tokens`.
    ///
    /// Tokens are matched left to right:
    /// * `--name` matches a flag by name, ignoring ASCII case.
    /// * `-abc` matches each of the shorthands `a`, `b` and `c`.
    /// Only the last one receives values.
    /// * The tokens following a flag, up to the next token starting with `-`, are its value.
    /// Multiple value tokens are joined with the flag's separator.
    /// * Any other token is skipped.
    ///
    /// Stops at the first error; flags assigned before it keep their values.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        self.registry.consume(tokens).map_err(|(_, error)| error)
    }

    /// Assign flags from the command line [`env::args`] (skipping the program name).
    ///
    /// If an error is encountered, prints it (pointing at the offending token) and exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(&mut self) {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        if let Err(code) = self.parse_reporting(&tokens, &ConsoleInterface::default()) {
            std::process::exit(code);
        }
    }

    fn parse_reporting(
        &mut self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<(), i32> {
        match self.registry.consume(tokens) {
            Ok(()) => Ok(()),
            Err((offset, error)) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse failed at offset {offset}: {error}");
                }

                user_interface.print_error(&error);
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    /// Assign flags from the process environment.
    ///
    /// Every flag is looked up under its derived variable name (see [`FlagSetBuilder::env`]).
    /// Unset and empty variables are skipped; a set variable whose value is not valid unicode is a failure.
    /// Unlike the command line, a failure does not stop the remaining flags from binding;
    /// all failures are returned together.
    pub fn bind_env(&mut self) -> Result<(), EnvError> {
        self.bind_env_from(&ProcessEnv)
    }

    /// Assign flags from the variables in `source`.
    ///
    /// ### Example
    /// ```
    /// # use bunting_builder as bunting;
    /// use bunting::{EnvNaming, Flag, FlagSet};
    /// use std::collections::HashMap;
    ///
    /// let mut flags = FlagSet::builder()
    ///     .env(EnvNaming::new().prefix("APP").replace("-", "_").uppercase())
    ///     .add(Flag::<u16>::new("bind-port"))
    ///     .build_flagset()
    ///     .unwrap();
    /// let source = HashMap::from([("APP_BIND_PORT".to_string(), "8080".to_string())]);
    ///
    /// flags.bind_env_from(&source).unwrap();
    /// assert_eq!(flags.get::<u16>("bind-port").unwrap(), 8080);
    /// assert!(flags.is_set_from_environment("bind-port"));
    /// ```
    pub fn bind_env_from(&mut self, source: &impl EnvSource) -> Result<(), EnvError> {
        let naming = self.naming.clone().unwrap_or_default();
        self.registry.overlay(&naming, source)
    }

    /// The value slot of the flag `name`.
    pub fn cell<T: 'static>(&self, name: &str) -> Result<&ValueCell<T>, ValueError> {
        let flag = self
            .registry
            .get(name)
            .ok_or_else(|| ValueError::UnknownFlag(name.to_string()))?;

        flag.as_any()
            .downcast_ref::<Flag<T>>()
            .map(Flag::cell)
            .ok_or_else(|| ValueError::TypeMismatch {
                name: flag.meta().name().to_string(),
                expected: std::any::type_name::<T>(),
                actual: flag.kind(),
            })
    }

    /// The value of the flag `name`: the assigned value, otherwise the default.
    pub fn get<T: Clone + 'static>(&self, name: &str) -> Result<T, ValueError> {
        self.get_opt(name)?
            .ok_or_else(|| ValueError::Unset(name.to_string()))
    }

    /// The value of the flag `name`, or `None` when it has neither a default nor an assigned value.
    pub fn get_opt<T: Clone + 'static>(&self, name: &str) -> Result<Option<T>, ValueError> {
        Ok(self.cell::<T>(name)?.value().cloned())
    }

    /// The value of the flag `name`.
    ///
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn get_or_exit<T: Clone + 'static>(&self, name: &str) -> T {
        match self.get(name) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    /// The count of the [`Counter`] flag `name`.
    pub fn count(&self, name: &str) -> Result<usize, ValueError> {
        self.get::<Counter>(name).map(|counter| counter.count())
    }

    /// Whether the flag `name` was assigned from either source.
    /// `false` for unknown flags.
    pub fn is_set(&self, name: &str) -> bool {
        self.is_set_from_command_line(name) || self.is_set_from_environment(name)
    }

    /// Whether the flag `name` was assigned from the command line.
    /// `false` for unknown flags.
    pub fn is_set_from_command_line(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .map_or(false, |flag| flag.is_set_from_command_line())
    }

    /// Whether the flag `name` was assigned from the environment.
    /// `false` for unknown flags.
    pub fn is_set_from_environment(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .map_or(false, |flag| flag.is_set_from_environment())
    }

    /// The registered flags, in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagMeta> {
        self.registry.iter().map(|flag| flag.meta())
    }

    /// The environment variable the flag `name` binds to.
    pub fn env_var_name(&self, name: &str) -> Option<String> {
        let flag = self.registry.get(name)?;
        let naming = self.naming.clone().unwrap_or_default();
        Some(naming.var_name(flag.meta().name()))
    }

    /// The names of the required flags which were assigned from neither source.
    ///
    /// Parsing does not enforce required flags; it is up to the caller to act on these.
    pub fn missing_required(&self) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|flag| flag.meta().is_required())
            .filter(|flag| !(flag.is_set_from_command_line() || flag.is_set_from_environment()))
            .map(|flag| flag.meta().name())
            .collect()
    }

    /// Print the usage summary and the flag table to stdout.
    ///
    /// The environment variable column is included when a naming is configured (see [`FlagSetBuilder::env`]).
    pub fn print_usage(&self, program: impl Into<String>) {
        self.printer(Printer::terminal)
            .print_usage(program, &ConsoleInterface::default());
    }

    fn printer(&self, create: impl FnOnce(Vec<FlagUsage>) -> Printer) -> Printer {
        let usages = self
            .registry
            .iter()
            .map(|flag| {
                let meta = flag.meta();
                FlagUsage {
                    name: meta.name().to_string(),
                    shorthand: meta.shorthand(),
                    kind: flag.kind(),
                    separator: meta.separator().to_string(),
                    description: meta.description().map(str::to_string),
                    default: flag.describe_default(),
                    required: meta.is_required(),
                    env_var: self.naming.as_ref().map(|naming| naming.var_name(meta.name())),
                }
            })
            .collect();
        create(usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalarKind;
    use crate::parser::util::InMemoryInterface;
    use crate::prelude::{BoxError, Parser};
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::time::Duration;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builder_empty() {
        let mut flags = FlagSetBuilder::new().build_flagset().unwrap();
        flags.parse_tokens(&[]).unwrap();
        flags.parse_tokens(&["anything", "goes"]).unwrap();
        assert_eq!(flags.flags().count(), 0);
    }

    #[test]
    fn builder_keeps_first_error() {
        let error = FlagSet::builder()
            .add(Flag::<u8>::new("a").shorthand('x'))
            .add(Flag::<u8>::new("A"))
            .add(Flag::<u8>::new("b").shorthand('x'))
            .build_flagset()
            .unwrap_err();
        assert_eq!(error, ConfigError::DuplicateName("A".to_string()));
        assert_eq!(error.to_string(), "Config error: Cannot duplicate the flag 'A'.");
    }

    #[test]
    fn register_after_build() {
        let mut flags = FlagSet::builder()
            .add(Flag::<u8>::new("a").shorthand('a'))
            .build_flagset()
            .unwrap();
        assert_eq!(
            flags.register(Flag::<u8>::new("b").shorthand('A')),
            Err(ConfigError::DuplicateShorthand('A'))
        );
        flags.register(Flag::<u8>::new("b")).unwrap();
        flags.parse_tokens(&["--b", "2"]).unwrap();
        assert_eq!(flags.get::<u8>("b").unwrap(), 2);
    }

    #[test]
    fn scenario_name_and_verbose() {
        let mut flags = FlagSet::builder()
            .add(Flag::<String>::new("name").default_value("anon".to_string()))
            .add(Flag::<bool>::new("verbose").shorthand('v').default_value(false))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&["--name", "Ada", "-v"]).unwrap();

        assert_eq!(flags.get::<String>("name").unwrap(), "Ada");
        assert!(flags.get::<bool>("verbose").unwrap());
        assert!(flags.is_set_from_command_line("name"));
        assert!(flags.is_set_from_command_line("VERBOSE"));
        assert!(!flags.is_set_from_environment("name"));
    }

    #[test]
    fn scenario_name_and_verbose_defaults() {
        let mut flags = FlagSet::builder()
            .add(Flag::<String>::new("name").default_value("anon".to_string()))
            .add(Flag::<bool>::new("verbose").shorthand('v').default_value(false))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&[]).unwrap();

        assert_eq!(flags.get::<String>("name").unwrap(), "anon");
        assert!(!flags.get::<bool>("verbose").unwrap());
        assert!(!flags.is_set("name"));
        assert!(!flags.is_set("verbose"));
    }

    #[test]
    fn scenario_defaults() {
        let mut flags = FlagSet::builder()
            .add(Flag::<String>::new("name").default_value("anon".to_string()))
            .add(Flag::<Duration>::new("timeout").default_value(Duration::from_secs(30)))
            .add(Flag::<u8>::new("level"))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&[]).unwrap();

        assert_eq!(flags.get::<String>("name").unwrap(), "anon");
        assert_eq!(
            flags.get::<Duration>("timeout").unwrap(),
            Duration::from_secs(30)
        );
        assert!(!flags.is_set("name"));
        assert_eq!(
            flags.get::<u8>("level"),
            Err(ValueError::Unset("level".to_string()))
        );
        assert_eq!(flags.get_opt::<u8>("level"), Ok(None));
        assert_eq!(flags.cell::<u8>("level").unwrap().default_value(), None);
    }

    #[test]
    fn scenario_env_binding() {
        let mut flags = FlagSet::builder()
            .env(EnvNaming::new().prefix("APP").replace("-", "_").uppercase())
            .add(Flag::<u16>::new("bind-port").default_value(80))
            .add(Flag::<String>::new("host"))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&[]).unwrap();
        flags
            .bind_env_from(&env(&[("APP_BIND_PORT", "8080")]))
            .unwrap();

        assert_eq!(flags.get::<u16>("bind-port").unwrap(), 8080);
        assert!(flags.is_set_from_environment("bind-port"));
        assert!(!flags.is_set_from_command_line("bind-port"));
        assert!(!flags.is_set_from_environment("host"));
        assert!(!flags.is_set_from_command_line("host"));
        assert_eq!(flags.get_opt::<String>("host"), Ok(None));
    }

    #[test]
    fn scenario_stacked() {
        let mut flags = FlagSet::builder()
            .add(Flag::<bool>::new("all").shorthand('a'))
            .add(Flag::<bool>::new("brief").shorthand('b'))
            .add(Flag::<u32>::new("count").shorthand('c'))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&["-abc", "10"]).unwrap();

        assert!(flags.get::<bool>("all").unwrap());
        assert!(flags.get::<bool>("brief").unwrap());
        assert_eq!(flags.get::<u32>("count").unwrap(), 10);
    }

    #[test]
    fn scenario_counter() {
        let mut flags = FlagSet::builder()
            .add(Flag::<Counter>::new("verbose").shorthand('c').default_value(Counter(1)))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&["-ccc", "-c"]).unwrap();

        assert_eq!(flags.count("verbose").unwrap(), 5);
        assert_eq!(flags.get::<Counter>("verbose").unwrap(), Counter(5));
    }

    #[rstest]
    #[case(&["--flag"], Some(true))]
    #[case(&["--flag", "false"], Some(false))]
    #[case(&["--flag", "1"], Some(true))]
    #[case(&[], None)]
    fn scenario_bool(#[case] tokens: &[&str], #[case] expected: Option<bool>) {
        let mut flags = FlagSet::builder()
            .add(Flag::<bool>::new("flag"))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(tokens).unwrap();

        assert_eq!(flags.get_opt::<bool>("flag").unwrap(), expected);
    }

    #[test]
    fn scenario_bool_invalid() {
        let mut flags = FlagSet::builder()
            .add(Flag::<bool>::new("flag"))
            .build_flagset()
            .unwrap();

        let error = flags.parse_tokens(&["--flag", "maybe"]).unwrap_err();

        assert_matches!(error, ParseError::ConversionFailed { name, .. } if name == "flag");
        assert!(!flags.is_set("flag"));
    }

    #[test]
    fn scenario_already_parsed() {
        let mut flags = FlagSet::builder()
            .add(Flag::<u8>::new("x"))
            .build_flagset()
            .unwrap();

        let error = flags.parse_tokens(&["--x", "1", "--x", "2"]).unwrap_err();

        assert_matches!(error, ParseError::AlreadyParsed(name) if name == "x");
        assert_eq!(flags.get::<u8>("x").unwrap(), 1);
    }

    #[test]
    fn scenario_slice_sources() {
        let mut flags = FlagSet::builder()
            .add(Flag::<Vec<String>>::new("tag").default_value(vec!["base".to_string()]))
            .build_flagset()
            .unwrap();

        flags.parse_tokens(&["--tag", "a,b", "--tag", "c"]).unwrap();
        assert_eq!(flags.get::<Vec<String>>("tag").unwrap(), vec!["a", "b", "c"]);

        flags.bind_env_from(&env(&[("tag", "x,y")])).unwrap();
        assert_eq!(flags.get::<Vec<String>>("tag").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn scenario_custom() {
        #[derive(Debug, Clone, PartialEq)]
        enum Level {
            Low,
            High,
        }

        struct LevelParser;

        impl Parser<Level> for LevelParser {
            fn parse_command_line(&self, raw: &str) -> Result<Level, BoxError> {
                match raw {
                    "low" => Ok(Level::Low),
                    "high" => Ok(Level::High),
                    _ => Err(format!("unknown level '{raw}'").into()),
                }
            }

            fn parse_environment(&self, raw: &str) -> Result<Level, BoxError> {
                self.parse_command_line(&raw.to_ascii_lowercase())
            }
        }

        let mut flags = FlagSet::builder()
            .add(Flag::<Level>::custom("level").parser(LevelParser).default_value(Level::Low))
            .add(Flag::<Level>::custom("other"))
            .build_flagset()
            .unwrap();

        assert_eq!(flags.get::<Level>("level").unwrap(), Level::Low);
        flags.parse_tokens(&["--level", "high"]).unwrap();
        assert_eq!(flags.get::<Level>("level").unwrap(), Level::High);

        flags.bind_env_from(&env(&[("level", "LOW")])).unwrap();
        assert_eq!(flags.get::<Level>("level").unwrap(), Level::Low);

        assert_matches!(
            flags.parse_tokens(&["--other", "x"]),
            Err(ParseError::NoParserDefined(name)) if name == "other"
        );
    }

    #[test]
    fn read_back_errors() {
        let flags = FlagSet::builder()
            .add(Flag::<u16>::new("port").default_value(1))
            .build_flagset()
            .unwrap();

        assert_eq!(
            flags.get::<u16>("nope"),
            Err(ValueError::UnknownFlag("nope".to_string()))
        );

        let error = flags.get::<String>("PORT").unwrap_err();
        assert_eq!(
            error,
            ValueError::TypeMismatch {
                name: "port".to_string(),
                expected: std::any::type_name::<String>(),
                actual: Kind::Scalar(ScalarKind::U16),
            }
        );
        assert_contains!(error.to_string(), "holds a u16 value");
        assert_matches!(flags.count("port"), Err(ValueError::TypeMismatch { .. }));
        assert!(!flags.is_set("nope"));
    }

    #[test]
    fn flags_and_env_names() {
        let flags = FlagSet::builder()
            .env(EnvNaming::new().prefix("svc").replace("-", "_").uppercase())
            .add(Flag::<u16>::new("bind-port").shorthand('p'))
            .add(Flag::<bool>::new("dry-run").shared())
            .build_flagset()
            .unwrap();

        let names: Vec<&str> = flags.flags().map(FlagMeta::name).collect();
        assert_eq!(names, vec!["bind-port", "dry-run"]);
        assert_eq!(flags.env_var_name("BIND-PORT"), Some("SVC_BIND_PORT".to_string()));
        assert_eq!(flags.env_var_name("nope"), None);

        let flags = FlagSet::builder()
            .add(Flag::<u16>::new("bind-port"))
            .build_flagset()
            .unwrap();
        assert_eq!(flags.env_var_name("bind-port"), Some("bind-port".to_string()));
    }

    #[test]
    fn missing_required() {
        let mut flags = FlagSet::builder()
            .add(Flag::<String>::new("a").required())
            .add(Flag::<String>::new("b").required().default_value("d".to_string()))
            .add(Flag::<String>::new("c").required())
            .add(Flag::<String>::new("d"))
            .build_flagset()
            .unwrap();

        assert_eq!(flags.missing_required(), vec!["a", "b", "c"]);

        flags.parse_tokens(&["--a", "x"]).unwrap();
        flags.bind_env_from(&env(&[("c", "y")])).unwrap();

        assert_eq!(flags.missing_required(), vec!["b"]);
    }

    #[test]
    fn parse_reporting_error() {
        let mut flags = FlagSet::builder()
            .add(Flag::<u8>::new("x"))
            .build_flagset()
            .unwrap();
        let interface = InMemoryInterface::default();

        let result = flags.parse_reporting(&["--x", "1", "--x", "2"], &interface);

        assert_eq!(result, Err(1));
        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error.unwrap(), "Parse error: Flag 'x' was already parsed.");
        assert_eq!(
            error_context.unwrap().to_string(),
            "--x 1 --x 2\n      ^"
        );
    }

    #[test]
    fn parse_reporting_ok() {
        let mut flags = FlagSet::builder()
            .add(Flag::<u8>::new("x"))
            .build_flagset()
            .unwrap();
        let interface = InMemoryInterface::default();

        assert_eq!(flags.parse_reporting(&["--x", "1"], &interface), Ok(()));
        assert_eq!(interface.consume(), (None, None, None));
    }

    #[test]
    fn usage() {
        let flags = FlagSet::builder()
            .env(EnvNaming::new().prefix("APP").uppercase())
            .add(
                Flag::<u16>::new("port")
                    .shorthand('p')
                    .description("The port.")
                    .default_value(80),
            )
            .add(Flag::<bool>::new("debug"))
            .build_flagset()
            .unwrap();
        let interface = InMemoryInterface::default();

        flags
            .printer(|usages| Printer::new(usages, Some(100)))
            .print_usage("server", &interface);

        assert_eq!(
            interface.consume_message(),
            r#"usage: server [--debug] [-p PORT]

options:
 --debug                                          APP_DEBUG
 -p PORT, --port PORT   The port. (default: 80)   APP_PORT"#
        );
    }
}
