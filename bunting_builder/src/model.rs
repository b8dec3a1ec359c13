/// The scalar value types a flag may hold, either directly or as the element of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// [`String`]
    String,
    /// [`bool`]
    Bool,
    /// [`i8`]
    I8,
    /// [`i16`]
    I16,
    /// [`i32`]
    I32,
    /// [`i64`]
    I64,
    /// [`isize`]
    Isize,
    /// [`u8`]
    U8,
    /// [`u16`]
    U16,
    /// [`u32`]
    U32,
    /// [`u64`]
    U64,
    /// [`usize`]
    Usize,
    /// [`f32`]
    F32,
    /// [`f64`]
    F64,
    /// [`std::time::Duration`]
    Duration,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Duration => "duration",
        };
        write!(f, "{name}")
    }
}

/// The kind of a flag, fixed when the flag is constructed.
///
/// The kind decides how the parser treats a flag beyond plain conversion:
/// whether an empty value is acceptable, and whether repeated command line occurrences are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single value.
    Scalar(ScalarKind),
    /// A `Vec` of values, split on the flag's separator.
    Slice(ScalarKind),
    /// A [`Counter`] of occurrences.
    Counter,
    /// A caller defined type converted by a [`Parser`](crate::prelude::Parser).
    Custom,
}

impl Kind {
    /// Whether this kind rejects an empty command line value with `NoValueProvided`.
    ///
    /// Booleans treat bare presence as `true`, counters ignore their input, and custom parsers decide for themselves.
    pub fn requires_value(&self) -> bool {
        match self {
            Kind::Scalar(ScalarKind::Bool) => false,
            Kind::Scalar(_) | Kind::Slice(_) => true,
            Kind::Counter | Kind::Custom => false,
        }
    }

    /// Whether this kind may be assigned more than once from the command line.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Kind::Slice(_) | Kind::Counter)
    }

    /// Whether a bare occurrence (no value tokens) is meaningful for this kind.
    pub(crate) fn is_switch(&self) -> bool {
        matches!(self, Kind::Scalar(ScalarKind::Bool) | Kind::Counter)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Scalar(scalar) => write!(f, "{scalar}"),
            Kind::Slice(scalar) => write!(f, "[]{scalar}"),
            Kind::Counter => write!(f, "counter"),
            Kind::Custom => write!(f, "custom"),
        }
    }
}

/// The value held by a counter flag: the number of times it was supplied, on top of its default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter(pub usize);

impl Counter {
    /// The current count.
    pub fn count(&self) -> usize {
        self.0
    }

    pub(crate) fn incremented(self) -> Self {
        Counter(self.0.saturating_add(1))
    }
}

impl From<usize> for Counter {
    fn from(value: usize) -> Self {
        Counter(value)
    }
}
