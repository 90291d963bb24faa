use super::*;
use proptest::prelude::*;

#[test]
fn deterministic_width_scales_with_font_size() {
    let m = DeterministicTextMeasurer::default();
    let a = m.measure("Mineral", &TextStyle::sized(10.0));
    let b = m.measure("Mineral", &TextStyle::sized(20.0));
    assert_eq!(a.width, 7.0 * 10.0 * 0.6);
    assert_eq!(b.width, 2.0 * a.width);
    assert_eq!(a.line_count, 1);
}

#[test]
fn wide_glyphs_count_two_columns() {
    let m = DeterministicTextMeasurer::default();
    let narrow = m.measure("ab", &TextStyle::sized(10.0));
    let wide = m.measure("日本", &TextStyle::sized(10.0));
    assert_eq!(wide.width, 2.0 * narrow.width);
}

#[test]
fn greedy_wrap_breaks_before_overflowing_word() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 1.0,
        line_height_factor: 1.0,
    };
    let style = TextStyle::sized(1.0);
    let lines = wrap_words_greedy("aaa bbb cc dddddddddd e", &m, &style, 7.0);
    assert_eq!(lines, vec!["aaa bbb", "cc", "dddddddddd", "e"]);
}

#[test]
fn greedy_wrap_collapses_whitespace_and_handles_empty_input() {
    let m = DeterministicTextMeasurer::default();
    let style = TextStyle::sized(12.0);
    assert!(wrap_words_greedy("   \n\t ", &m, &style, 100.0).is_empty());
    assert_eq!(
        wrap_words_greedy("  a \n b  ", &m, &style, 1000.0),
        vec!["a b"]
    );
    assert_eq!(split_words("x\ty  z"), vec!["x", "y", "z"]);
}

proptest! {
    #[test]
    fn prop_rewrapping_wrapped_text_is_stable(
        words in prop::collection::vec("[a-z]{1,12}", 0..40),
        width in 20.0f64..300.0,
    ) {
        let measurer = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(12.0);
        let text = words.join(" ");
        let once = wrap_words_greedy(&text, &measurer, &style, width);
        let twice = wrap_words_greedy(&once.join("\n"), &measurer, &style, width);
        prop_assert_eq!(once, twice);
    }
}
