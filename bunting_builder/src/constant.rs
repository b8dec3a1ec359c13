pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const DEFAULT_SEPARATOR: &str = ",";
pub(crate) const ENV_PREFIX_JOIN: &str = "_";
