mod convert;
mod core;
mod duration;
mod flag;

pub use self::convert::{BoxError, ConversionError, FlagValue, ScalarValue};
pub use self::core::{FlagSet, FlagSetBuilder, ValueError};
pub use self::duration::DurationError;
pub(crate) use self::flag::AnonymousFlag;
pub use self::flag::{Flag, FlagMeta, FlagOptions, ValueCell};
