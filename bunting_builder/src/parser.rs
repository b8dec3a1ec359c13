mod base;
mod env;
mod interface;
mod printer;

pub use self::base::{ConfigError, ParseError};
pub(crate) use self::base::Registry;
pub use self::env::{EnvError, EnvNaming, EnvSource, ProcessEnv};
pub(crate) use self::interface::*;
pub(crate) use self::printer::*;
