//! Greedy line breaking over the embedded font's advance widths.

use crate::fonts::FontMetrics;

/// Breaks `text` into lines no wider than `max_width` points.
///
/// Words are separated on whitespace and packed greedily. A single word wider
/// than the line is split between characters. The result always holds at
/// least one line; empty input yields one empty line.
pub fn wrap_text(metrics: &FontMetrics, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let space = metrics.text_width(" ", font_size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        let word_width = metrics.text_width(word, font_size);

        if current.is_empty() {
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                current_width = split_long_word(metrics, word, font_size, max_width, &mut lines, &mut current);
            }
            continue;
        }

        if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                current_width = split_long_word(metrics, word, font_size, max_width, &mut lines, &mut current);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Emits full-width chunks of `word` into `lines` and leaves the tail in
/// `current`, returning the tail's width.
fn split_long_word(
    metrics: &FontMetrics,
    word: &str,
    font_size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
    current: &mut String,
) -> f32 {
    let mut width = 0.0f32;
    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_width = metrics.text_width(c.encode_utf8(&mut buf), font_size);
        // Always place at least one character per line.
        if width + char_width > max_width && !current.is_empty() {
            lines.push(std::mem::take(current));
            width = 0.0;
        }
        current.push(c);
        width += char_width;
    }
    width
}
