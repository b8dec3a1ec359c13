use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Lays out rows of `left | middle | right` columns.
///
/// The middle column wraps (hyphenating words that cannot fit on a line of their own).
/// The left and right columns never wrap, and are sized to their widest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    middle: usize,
    right: usize,
}

impl ColumnRenderer {
    /// Produce a renderer, choosing the middle width to fit `total_width` where possible.
    pub(crate) fn guided(
        padding: usize,
        left: usize,
        middle: usize,
        right: usize,
        total_width: usize,
    ) -> Self {
        let mut non_middle = left + padding;

        if right > 0 {
            non_middle += padding + right;
        }

        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle, MINIMUM_MIDDLE_WIDTH);

        let middle = if guided_middle + non_middle <= target_total_width {
            guided_middle
        } else if non_middle < total_width {
            std::cmp::max(total_width - non_middle, MINIMUM_MIDDLE_WIDTH)
        } else {
            MINIMUM_MIDDLE_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} against total {total_width}.  Selecting middle: {middle}.");
        }

        Self::new(padding, left, middle, right)
    }

    pub(crate) fn new(padding: usize, left: usize, middle: usize, right: usize) -> Self {
        Self {
            padding: std::cmp::max(padding, 1),
            left,
            // Room for at least one character and a hyphen.
            middle: std::cmp::max(middle, 2),
            right,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str, right: &str) -> Vec<String> {
        let padding = " ".repeat(self.padding);
        let left_width = self.left;
        let middle_width = self.middle;
        let mut parts = chunk(middle, middle_width).into_iter();
        let mut out = Vec::default();

        let first = parts.next().unwrap_or_default();
        let line = if right.is_empty() || self.right == 0 {
            format!("{:indent$}{left:left_width$}{padding}{first}", "")
        } else {
            format!("{:indent$}{left:left_width$}{padding}{first:middle_width$}{padding}{right}", "")
        };
        out.push(line.trim_end().to_string());

        for part in parts {
            out.push(format!("{:indent$}{:left_width$}{padding}{part}", "", ""));
        }

        out
    }
}

/// Greedily fill lines of `width` with the words of `paragraph`.
fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        let word_length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word_length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split `word` into full lines ending in `-`, leaving the remainder in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut start = 0;

    while characters.len() - start > width {
        let piece: String = characters[start..start + increment].iter().collect();
        lines.push(format!("{piece}-"));
        start += increment;
    }

    current.extend(&characters[start..]);
}

/// Where the parser's output goes.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: &dyn std::error::Error);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Debug, Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &dyn std::error::Error) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 5, vec![])]
    #[case("abc", 5, vec!["abc"])]
    #[case("abc def", 7, vec!["abc def"])]
    #[case("abc def", 6, vec!["abc", "def"])]
    #[case("  abc   def  ", 10, vec!["abc def"])]
    #[case("abcdefgh", 4, vec!["abc-", "def-", "gh"])]
    #[case("abcdef", 3, vec!["ab-", "cd-", "ef"])]
    #[case("ab abcdefgh", 4, vec!["ab", "abc-", "def-", "gh"])]
    #[case("\u{00e9}\u{00e9}\u{00e9}\u{00e9}\u{00e9}", 3, vec!["\u{00e9}\u{00e9}-", "\u{00e9}\u{00e9}\u{00e9}"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[test]
    fn render_simple() {
        let renderer = ColumnRenderer::new(2, 5, 10, 0);
        assert_eq!(renderer.render(1, "abc", "one two", ""), vec![" abc    one two"]);
    }

    #[test]
    fn render_wrapped() {
        let renderer = ColumnRenderer::new(2, 5, 7, 0);
        assert_eq!(
            renderer.render(1, "abc", "one two three", ""),
            vec![" abc    one two", "        three"]
        );
    }

    #[test]
    fn render_right() {
        let renderer = ColumnRenderer::new(2, 5, 7, 4);
        assert_eq!(
            renderer.render(1, "abc", "one two three", "ENV"),
            vec![" abc    one two  ENV", "        three"]
        );
    }

    #[test]
    fn render_empty_middle() {
        let renderer = ColumnRenderer::new(2, 5, 7, 4);
        assert_eq!(renderer.render(1, "abc", "", ""), vec![" abc"]);
        assert_eq!(
            renderer.render(1, "abc", "", "ENV"),
            vec![" abc             ENV"]
        );
    }

    #[rstest]
    #[case(10, 100, 17)]
    #[case(40, 100, 40)]
    #[case(90, 100, 68)]
    #[case(90, 20, MINIMUM_MIDDLE_WIDTH)]
    fn guided_middle(#[case] middle: usize, #[case] total: usize, #[case] expected: usize) {
        // Non-middle: 10 + 2 + 2 + 18 = 32.
        let renderer = ColumnRenderer::guided(2, 10, middle, 18, total);
        assert_eq!(renderer.middle, expected);
    }

    #[test]
    fn in_memory_interface() {
        let interface = util::InMemoryInterface::default();
        interface.print("a".to_string());
        interface.print("b".to_string());
        assert_eq!(interface.consume_message(), "a\nb");

        let interface = util::InMemoryInterface::default();
        assert_eq!(interface.consume(), (None, None, None));
    }
}
