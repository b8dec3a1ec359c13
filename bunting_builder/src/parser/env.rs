use std::collections::HashMap;
use std::env::VarError;

use crate::constant::ENV_PREFIX_JOIN;
use crate::parser::base::{ParseError, Registry};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The convention deriving an environment variable name from a flag name.
///
/// Applied in a fixed order:
/// 1. The prefix is joined on with `_`: `{prefix}_{name}`.
/// 2. The replacement is applied to the whole result.
/// 3. The result is uppercased.
///
/// ### Example
/// ```
/// # use bunting_builder as bunting;
/// use bunting::EnvNaming;
///
/// let naming = EnvNaming::new().prefix("app").replace("-", "_").uppercase();
/// assert_eq!(naming.var_name("bind-port"), "APP_BIND_PORT");
///
/// // Without any options, the flag name is used as is.
/// assert_eq!(EnvNaming::new().var_name("bind-port"), "bind-port");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvNaming {
    prefix: Option<String>,
    replacement: Option<(String, String)>,
    uppercase: bool,
}

impl EnvNaming {
    /// The identity naming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix variable names with `prefix`.
    /// If repeated, only the final prefix will apply.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix.replace(prefix.into());
        self
    }

    /// Replace every occurrence of `from` with `to`.
    /// If repeated, only the final replacement will apply.
    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacement.replace((from.into(), to.into()));
        self
    }

    /// Uppercase variable names.
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// The environment variable name for the flag `name`.
    pub fn var_name(&self, name: &str) -> String {
        let mut var_name = match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}{ENV_PREFIX_JOIN}{name}"),
            _ => name.to_string(),
        };

        if let Some((from, to)) = &self.replacement {
            if !from.is_empty() {
                var_name = var_name.replace(from.as_str(), to);
            }
        }

        if self.uppercase {
            var_name = var_name.to_uppercase();
        }

        var_name
    }
}

/// Behaviour to look up environment variables.
///
/// Implemented for the process environment ([`ProcessEnv`]) and for `HashMap<String, String>`.
pub trait EnvSource {
    /// The value of the variable `name`, or `None` if it is not set.
    ///
    /// A variable which is set but cannot be read is an error, not `None`.
    fn var(&self, name: &str) -> Result<Option<String>, VarError>;
}

/// The environment of the current process, via [`std::env::var`].
///
/// Variables whose value is not valid unicode fail with [`VarError::NotUnicode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<Option<String>, VarError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Result<Option<String>, VarError> {
        Ok(self.get(name).cloned())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, name: &str) -> Result<Option<String>, VarError> {
        (**self).var(name)
    }
}

/// The failures from binding the environment, in registration order.
///
/// Each failure is paired with the variable that caused it.
#[derive(Debug)]
pub struct EnvError(Vec<(String, ParseError)>);

impl EnvError {
    /// The failures, as `(variable, error)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParseError)> {
        self.0.iter().map(|(variable, error)| (variable.as_str(), error))
    }

    /// The number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an `EnvError` holds at least one failure.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (variable, error)) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            write!(f, "{}: {variable}: {error}", i + 1)?;
        }

        Ok(())
    }
}

impl std::error::Error for EnvError {}

impl IntoIterator for EnvError {
    type Item = (String, ParseError);
    type IntoIter = std::vec::IntoIter<(String, ParseError)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Registry {
    /// Assign every flag whose environment variable is set, collecting all failures.
    ///
    /// Unset and empty variables are skipped, while unreadable ones are failures.
    /// Successful assignments remain, regardless of other failures.
    pub(crate) fn overlay(
        &mut self,
        naming: &EnvNaming,
        source: &impl EnvSource,
    ) -> Result<(), EnvError> {
        let mut errors = Vec::default();

        for flag in self.iter_mut() {
            let variable = naming.var_name(flag.meta().name());

            match source.var(&variable) {
                Err(error) => {
                    errors.push((
                        variable,
                        ParseError::Unreadable {
                            name: flag.meta().name().to_string(),
                            source: error,
                        },
                    ));
                }
                Ok(Some(raw)) if !raw.is_empty() => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Binding '{}' from '{variable}'.", flag.meta().name());
                    }

                    if let Err(error) = flag.from_environment(&raw) {
                        errors.push((variable, error));
                    }
                }
                _ => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping '{}': '{variable}' is unset.", flag.meta().name());
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EnvError(errors))
        }
    }
}
