//! Value normalization: dictionary strings become plain display text.

use std::sync::LazyLock;

use regex::Regex;

/// `{{ expression }}` with the whitespace around it.
#[allow(clippy::expect_used)]
static EXPRESSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\{\{.+?\}\}\s*").expect("expression regex should compile")
});

/// Punctuation at the end of the value or right before a final newline.
#[allow(clippy::expect_used)]
static TRAILING_PUNCTUATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;:.!?]+(\n?)$").expect("punctuation regex should compile"));

/// `<br>`, `<br/>` and `<br />`.
#[allow(clippy::expect_used)]
static LINE_BREAK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("line break regex should compile"));

/// Any markup tag, shortest match, may span lines.
#[allow(clippy::expect_used)]
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("tag regex should compile"));

/// Strips expressions, trailing punctuation and markup from a dictionary value.
///
/// The steps run in order and repeat until the value stops changing, so the
/// result is stable under another call: `"Hi!<i></i>"` becomes `"Hi"`, not
/// `"Hi!"`. Every step only shortens the text, so the loop terminates.
///
/// # Examples
/// ```
/// use html_i18n_injector::dictionary::sanitize;
///
/// assert_eq!(sanitize("Hi <b>there</b>!"), "Hi there");
/// assert_eq!(sanitize("Line one<br/>line two"), "Line one line two");
/// ```
#[must_use]
pub fn sanitize(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(value: &str) -> String {
    let value = EXPRESSION_PATTERN.replace_all(value, "");
    let value = TRAILING_PUNCTUATION_PATTERN.replace(&value, "${1}");
    let value = LINE_BREAK_PATTERN.replace_all(&value, " ");
    let value = TAG_PATTERN.replace_all(&value, "");
    value.into_owned()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::expression("Hello {{ user.name }} and welcome", "Helloand welcome")]
    #[case::expression_at_end("Total: {{count}}", "Total")]
    #[case::trailing_punctuation("Save changes?!", "Save changes")]
    #[case::inner_punctuation_kept("a.b, c", "a.b, c")]
    #[case::punctuation_before_final_newline("Hi!\n", "Hi\n")]
    #[case::punctuation_before_inner_newline("Hi!\nthere", "Hi!\nthere")]
    #[case::line_break("one<br>two<br/>three<br />four", "one two three four")]
    #[case::tags("Hi <b>there</b>!", "Hi there")]
    #[case::tag_spanning_lines("a<span\nclass=\"x\">b</span>", "ab")]
    #[case::link("<a href=\"/help\">Help</a>.", "Help")]
    #[case::plain("Already clean", "Already clean")]
    #[case::empty("", "")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_that!(sanitize(input), eq(expected));
    }

    #[rstest]
    fn test_sanitize_punctuation_exposed_by_tag() {
        assert_that!(sanitize("Hi!<i></i>"), eq("Hi"));
    }

    #[rstest]
    #[case("Hi!<i></i>")]
    #[case("Read more...<br>")]
    #[case("{<b></b>{x}} done.")]
    #[case("Click <a href=\"#\">here</a>: {{ link }}!")]
    #[case("Plain text")]
    #[case("Done.\n")]
    fn test_sanitize_is_idempotent(#[case] input: &str) {
        let once = sanitize(input);

        assert_that!(sanitize(&once), eq(once.as_str()));
    }
}
