/// What a flag token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target<'t> {
    /// `--name`
    Long(&'t str),
    /// One character of `-abc`, or the empty string for a lone `-`.
    Short(&'t str),
}

impl<'t> std::fmt::Display for Target<'t> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Long(name) => write!(f, "--{name}"),
            Target::Short(short) => write!(f, "-{short}"),
        }
    }
}

/// A flag token together with the value tokens that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match<'t> {
    pub target: Target<'t>,
    pub values: &'t [&'t str],
    /// Character offset of the flag within the token stream (characters per token summed, spaces excluded).
    pub offset: usize,
}

impl<'t> Match<'t> {
    pub(crate) fn new(target: Target<'t>, values: &'t [&'t str], offset: usize) -> Self {
        Self {
            target,
            values,
            offset,
        }
    }

    /// Join the value tokens with `separator`; empty when there are none.
    pub(crate) fn joined(&self, separator: &str) -> String {
        self.values.join(separator)
    }
}
