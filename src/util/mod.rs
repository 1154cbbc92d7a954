pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Map a UTF-16 offset (what DOM selection APIs report) to a byte index, clamped
/// to a char boundary.
pub(crate) fn utf16_to_byte_idx(s: &str, pos_utf16: u32) -> usize {
    if pos_utf16 == 0 {
        return 0;
    }
    let mut acc: u32 = 0;
    for (i, ch) in s.char_indices() {
        let w = ch.len_utf16() as u32;
        if acc + w > pos_utf16 {
            return i;
        }
        acc += w;
        if acc == pos_utf16 {
            return i + ch.len_utf8();
        }
    }
    s.len()
}

pub(crate) fn byte_idx_to_utf16(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_offsets_roundtrip_on_bullets() {
        let s = "• a\n• b";
        assert_eq!(utf16_len(s), 7);
        assert_eq!(utf16_to_byte_idx(s, 2), "• ".len());
        assert_eq!(byte_idx_to_utf16(s, "• a\n".len()), 4);
    }

    #[test]
    fn utf16_offset_inside_surrogate_pair_clamps_down() {
        let s = "a😀b";
        assert_eq!(utf16_to_byte_idx(s, 2), 1);
        assert_eq!(utf16_to_byte_idx(s, 3), 5);
        assert_eq!(utf16_to_byte_idx(s, 99), s.len());
    }
}
