//! Text measurement and wrapping for the half-width CJK CMap.

/// Advance width of one character at `size`.
///
/// `UniJIS-UCS2-HW-H` maps Latin code points to half-width glyphs; every
/// other character occupies a full em.
fn char_width(c: char, size: f32) -> f32 {
    if c.is_ascii() { size * 0.5 } else { size }
}

/// Estimated advance width of `text` at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|c| char_width(c, size)).sum()
}

/// Greedy per-character wrapping. CJK text has no word boundaries, so
/// breaking between any two characters is correct. Embedded newlines are
/// hard breaks. Always yields at least one (possibly empty) line.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.split('\n') {
        let mut line = String::new();
        let mut width = 0.0;
        for c in source_line.chars() {
            let w = char_width(c, size);
            if !line.is_empty() && width + w > max_width {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            line.push(c);
            width += w;
        }
        lines.push(line);
    }
    lines
}

/// Encodes `text` for a `UCS2` CMap: UTF-16BE bytes, written as a hex
/// string in the content stream.
pub(crate) fn encode_utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_half_width() {
        assert!((text_width("ab", 10.0) - 10.0).abs() < 1e-4);
        assert!((text_width("あい", 10.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn wraps_between_any_characters() {
        let lines = wrap_text("あいうえお", 10.0, 25.0);
        assert_eq!(lines, vec!["あい", "うえ", "お"]);
    }

    #[test]
    fn newlines_are_hard_breaks() {
        let lines = wrap_text("既往歴\n家族歴", 10.0, 1000.0);
        assert_eq!(lines, vec!["既往歴", "家族歴"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 10.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn utf16_encoding_is_big_endian() {
        assert_eq!(encode_utf16_be("A"), vec![0x00, 0x41]);
        // 紹 is U+7D39
        assert_eq!(encode_utf16_be("紹"), vec![0x7D, 0x39]);
    }
}
