use std::time::Duration;
use thiserror::Error;

use crate::api::duration::{parse_duration, DurationError};
use crate::api::flag::ValueCell;
use crate::model::{Counter, Kind, ScalarKind};

/// Boxed error returned by caller supplied parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A raw token that could not be converted into the flag's type.
///
/// The underlying cause (ex: [`std::num::ParseIntError`]) is available via [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("cannot convert '{token}' to {type_name}.")]
pub struct ConversionError {
    token: String,
    type_name: &'static str,
    #[source]
    cause: BoxError,
}

impl ConversionError {
    pub(crate) fn new(token: &str, type_name: &'static str, cause: impl Into<BoxError>) -> Self {
        Self {
            token: token.to_string(),
            type_name,
            cause: cause.into(),
        }
    }

    /// The token which failed to convert.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The name of the type the token was converted to.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Literal-level failures that have no standard library error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LiteralError {
    #[error("'{0}' is not a boolean literal (true, false, t, f, 1, 0).")]
    Bool(String),

    #[error("'{0}' is out of range for {1}.")]
    FloatRange(String, &'static str),

    #[error("{0}")]
    Duration(#[from] DurationError),
}

mod sealed {
    pub trait Sealed {}
}

/// Behaviour for the closed set of types a built-in flag may hold.
///
/// Implemented for `String`, `bool`, the signed & unsigned integers, `f32`, `f64`, [`Duration`],
/// `Vec` of each of those, and [`Counter`].
/// Any other type is bound via a custom [`Parser`](crate::prelude::Parser) (see [`Flag::custom`](crate::Flag::custom)).
pub trait FlagValue: sealed::Sealed + Clone + std::fmt::Debug + Sized + 'static {
    /// The kind tag of this type.
    const KIND: Kind;

    /// Convert a raw value, as it arrives from the environment.
    fn convert(raw: &str, separator: &str) -> Result<Self, ConversionError>;

    /// Convert a raw value, as it arrives from the command line.
    ///
    /// Cumulative kinds look at what the cell already holds.
    #[doc(hidden)]
    fn occurrence(
        raw: &str,
        separator: &str,
        _cell: &ValueCell<Self>,
    ) -> Result<Self, ConversionError> {
        Self::convert(raw, separator)
    }

    /// The default a flag of this type takes when none is configured.
    #[doc(hidden)]
    fn implicit_default() -> Option<Self> {
        None
    }

    /// Render a value for the usage output.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// A [`FlagValue`] which may also be the element of a slice flag.
pub trait ScalarValue: FlagValue {
    /// The scalar kind tag of this type.
    const SCALAR: ScalarKind;

    /// Convert a single element, strictly (no empty-input shortcuts).
    fn convert_element(token: &str) -> Result<Self, ConversionError>;
}

macro_rules! scalar_value {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl FlagValue for $t {
                const KIND: Kind = Kind::Scalar(ScalarKind::$kind);

                fn convert(raw: &str, _separator: &str) -> Result<Self, ConversionError> {
                    Self::convert_element(raw)
                }

                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! integer_value {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScalarValue for $t {
                const SCALAR: ScalarKind = ScalarKind::$kind;

                fn convert_element(token: &str) -> Result<Self, ConversionError> {
                    token
                        .parse::<$t>()
                        .map_err(|error| ConversionError::new(token, stringify!($t), error))
                }
            }
        )*

        scalar_value!($($t => $kind),*);
    };
}

integer_value!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
);

macro_rules! float_value {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScalarValue for $t {
                const SCALAR: ScalarKind = ScalarKind::$kind;

                fn convert_element(token: &str) -> Result<Self, ConversionError> {
                    let value = token
                        .parse::<$t>()
                        .map_err(|error| ConversionError::new(token, stringify!($t), error))?;

                    // A finite literal too large for the width parses to infinity.
                    if value.is_infinite() && !is_infinity_literal(token) {
                        return Err(ConversionError::new(
                            token,
                            stringify!($t),
                            LiteralError::FloatRange(token.to_string(), stringify!($t)),
                        ));
                    }

                    Ok(value)
                }
            }
        )*

        scalar_value!($($t => $kind),*);
    };
}

float_value!(f32 => F32, f64 => F64);

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token
        .strip_prefix(&['+', '-'][..])
        .unwrap_or(token)
        .to_ascii_lowercase();
    unsigned == "inf" || unsigned == "infinity"
}

impl ScalarValue for String {
    const SCALAR: ScalarKind = ScalarKind::String;

    fn convert_element(token: &str) -> Result<Self, ConversionError> {
        Ok(token.to_string())
    }
}

scalar_value!(String => String);

impl ScalarValue for Duration {
    const SCALAR: ScalarKind = ScalarKind::Duration;

    fn convert_element(token: &str) -> Result<Self, ConversionError> {
        parse_duration(token)
            .map_err(|error| ConversionError::new(token, "duration", LiteralError::from(error)))
    }
}

impl sealed::Sealed for Duration {}

impl FlagValue for Duration {
    const KIND: Kind = Kind::Scalar(ScalarKind::Duration);

    fn convert(raw: &str, _separator: &str) -> Result<Self, ConversionError> {
        Self::convert_element(raw)
    }
}

impl ScalarValue for bool {
    const SCALAR: ScalarKind = ScalarKind::Bool;

    fn convert_element(token: &str) -> Result<Self, ConversionError> {
        const TRUTHY: [&str; 3] = ["true", "t", "1"];
        const FALSY: [&str; 3] = ["false", "f", "0"];

        if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            Ok(true)
        } else if FALSY.iter().any(|f| f.eq_ignore_ascii_case(token)) {
            Ok(false)
        } else {
            Err(ConversionError::new(
                token,
                "bool",
                LiteralError::Bool(token.to_string()),
            ))
        }
    }
}

impl sealed::Sealed for bool {}

impl FlagValue for bool {
    const KIND: Kind = Kind::Scalar(ScalarKind::Bool);

    fn convert(raw: &str, _separator: &str) -> Result<Self, ConversionError> {
        // Bare presence means "on".
        if raw.is_empty() {
            Ok(true)
        } else {
            Self::convert_element(raw)
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T: ScalarValue> sealed::Sealed for Vec<T> {}

impl<T: ScalarValue> FlagValue for Vec<T> {
    const KIND: Kind = Kind::Slice(T::SCALAR);

    fn convert(raw: &str, separator: &str) -> Result<Self, ConversionError> {
        raw.split(separator).map(T::convert_element).collect()
    }

    fn occurrence(
        raw: &str,
        separator: &str,
        cell: &ValueCell<Self>,
    ) -> Result<Self, ConversionError> {
        let parsed = Self::convert(raw, separator)?;

        // Repeated command line occurrences accumulate; the first replaces the default.
        match cell.current() {
            Some(previous) if cell.is_set_from_command_line() => {
                let mut merged = previous.clone();
                merged.extend(parsed);
                Ok(merged)
            }
            _ => Ok(parsed),
        }
    }

    fn describe(&self) -> String {
        let items: Vec<String> = self.iter().map(FlagValue::describe).collect();
        format!("[{}]", items.join(", "))
    }
}

impl sealed::Sealed for Counter {}

impl FlagValue for Counter {
    const KIND: Kind = Kind::Counter;

    fn convert(raw: &str, _separator: &str) -> Result<Self, ConversionError> {
        raw.parse::<usize>()
            .map(Counter)
            .map_err(|error| ConversionError::new(raw, "counter", error))
    }

    fn occurrence(
        _raw: &str,
        _separator: &str,
        cell: &ValueCell<Self>,
    ) -> Result<Self, ConversionError> {
        Ok(cell.value().copied().unwrap_or_default().incremented())
    }

    fn implicit_default() -> Option<Self> {
        Some(Counter::default())
    }

    fn describe(&self) -> String {
        self.count().to_string()
    }
}
