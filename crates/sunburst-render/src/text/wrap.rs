//! Greedy word wrapping driven by a [`TextMeasurer`].

use super::{TextMeasurer, TextStyle};

/// Splits on any run of whitespace, newlines included.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Packs words into lines no wider than `max_width_px`.
///
/// A word is appended while the measured candidate line still fits; on overflow the current
/// line is committed and the word starts the next one. A word wider than `max_width_px` on its
/// own is emitted as a single overflowing line rather than split. Line breaks already present in
/// `text` are treated as ordinary whitespace, so re-wrapping joined output is stable.
pub fn wrap_words_greedy(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in split_words(text) {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        let fits = !max_width_px.is_finite()
            || measurer.measure(&candidate, style).width <= max_width_px;
        if fits {
            line = candidate;
        } else {
            out.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        out.push(line);
    }
    out
}
