use std::collections::VecDeque;

use crate::constant::*;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Walks the token stream, yielding one flag [`Match`] at a time.
///
/// Token classes:
/// 1. `--name`: a long flag.
/// 2. `-abc`: stacked shorthands.
/// Every character but the last is yielded with no values; the last one takes the value span.
/// 3. Anything else, outside of a value span, is skipped.
///
/// A value span runs from the token after the flag up to (not including) the next token starting with `-`.
#[derive(Debug)]
pub(crate) struct TokenScanner<'t> {
    tokens: &'t [&'t str],
    index: usize,
    fed: usize,
    pending: VecDeque<Match<'t>>,
}

impl<'t> TokenScanner<'t> {
    pub(crate) fn new(tokens: &'t [&'t str]) -> Self {
        Self {
            tokens,
            index: 0,
            fed: 0,
            pending: VecDeque::default(),
        }
    }

    fn take_values(&mut self) -> &'t [&'t str] {
        let tokens = self.tokens;
        let start = self.index + 1;
        let end = tokens[start..]
            .iter()
            .position(|token| token.starts_with(SHORT_PREFIX))
            .map_or(tokens.len(), |position| start + position);
        self.fed += tokens[self.index..end]
            .iter()
            .map(|token| token.chars().count())
            .sum::<usize>();
        self.index = end;
        &tokens[start..end]
    }

    fn skip(&mut self) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Skipping positional token '{}'.", self.tokens[self.index]);
        }

        self.fed += self.tokens[self.index].chars().count();
        self.index += 1;
    }
}

impl<'t> Iterator for TokenScanner<'t> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.pop_front() {
            return Some(pending);
        }

        while self.index < self.tokens.len() {
            let token = self.tokens[self.index];
            let offset = self.fed;

            if let Some(name) = token.strip_prefix(LONG_PREFIX) {
                let values = self.take_values();
                return Some(Match::new(Target::Long(name), values, offset));
            } else if let Some(cluster) = token.strip_prefix(SHORT_PREFIX) {
                // The prefix accounts for the 1.
                let mut shorts: Vec<(usize, &'t str)> = cluster
                    .char_indices()
                    .enumerate()
                    .map(|(n, (i, c))| (offset + 1 + n, &cluster[i..i + c.len_utf8()]))
                    .collect();
                let (active_offset, active) = shorts.pop().unwrap_or((offset, ""));

                for (stacked_offset, stacked) in shorts {
                    self.pending
                        .push_back(Match::new(Target::Short(stacked), &[], stacked_offset));
                }

                let values = self.take_values();
                self.pending
                    .push_back(Match::new(Target::Short(active), values, active_offset));
                return self.pending.pop_front();
            } else {
                self.skip();
            }
        }

        None
    }
}
