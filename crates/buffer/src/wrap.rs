//! Soft wrapping of logical lines into screen rows.
//!
//! Lines break after a word boundary when one fits, otherwise at the last
//! character that fits. Widths come from `unicode-width`, tabs count as
//! `tab_size` cells.

use unicode_width::UnicodeWidthChar;

/// Cells a character occupies on screen.
pub fn char_display_width(c: char, tab_size: usize) -> usize {
    if c == '\t' {
        tab_size.max(1)
    } else if c.is_control() {
        // rendered as a replacement glyph
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Non-alphanumeric characters are break opportunities.
pub fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Index where the row starting at `start` should end.
///
/// Always makes progress: at least one character goes on each row.
pub fn calculate_wrap_point(chars: &[char], start: usize, max_width: usize, tab_size: usize) -> usize {
    let line_len = chars.len();
    if start >= line_len {
        return line_len;
    }

    let mut display_width = 0;
    let mut ideal_end = start;

    for (i, &c) in chars.iter().enumerate().skip(start) {
        let width = char_display_width(c, tab_size);
        if display_width + width > max_width {
            ideal_end = i;
            break;
        }
        display_width += width;
        ideal_end = i + 1;
    }

    if ideal_end >= line_len {
        return line_len;
    }

    // trailing boundary may hang off the row end
    if is_word_boundary(chars[ideal_end]) && chars[ideal_end] != '\t' && ideal_end > start {
        return ideal_end + 1;
    }

    for i in (start + 1..ideal_end).rev() {
        if is_word_boundary(chars[i]) {
            return i + 1;
        }
    }

    ideal_end.max(start + 1)
}

/// Start index of every screen row of a line. The first entry is always 0.
pub fn wrap_points(chars: &[char], max_width: usize, tab_size: usize) -> Vec<usize> {
    let max_width = max_width.max(1);
    let mut points = vec![0];
    let mut offset = 0;

    loop {
        let end = calculate_wrap_point(chars, offset, max_width, tab_size);
        if end >= chars.len() {
            break;
        }
        points.push(end);
        offset = end;
    }

    points
}
