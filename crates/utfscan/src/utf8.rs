//! Minimal UTF-8 codec over raw byte slices.
//!
//! The scanner needs byte-exact control over scalar boundaries (ranges are
//! byte offsets, and stepping backwards must land on the previous lead byte),
//! so decoding is done here rather than through a text-iteration facility.
//!
//! All three entry points validate what they touch and report malformed input
//! as [`ScanError::InvalidUtf8`] with the offending offset; running off the
//! end of the slice is [`ScanError::EndOfInput`]. No out-of-bounds access is
//! possible on any input.

use crate::error::{Result, ScanError};

/// Bit pattern `10xxxxxx` marks a continuation byte.
#[inline]
pub(crate) const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Encoded length implied by a lead byte.
///
/// Returns `None` for continuation bytes and for lead bytes that can only
/// produce overlong forms (`0xC0`/`0xC1`) or scalars past `U+10FFFF`
/// (`0xF5..`).
#[inline]
pub(crate) const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decodes the scalar starting at `at`, returning it together with the
/// offset one past its encoding.
pub(crate) fn decode(bytes: &[u8], at: usize) -> Result<(char, usize)> {
    let Some(&lead) = bytes.get(at) else {
        return Err(ScanError::EndOfInput);
    };
    if lead < 0x80 {
        return Ok((char::from(lead), at + 1));
    }
    let len = sequence_len(lead).ok_or(ScanError::InvalidUtf8(at))?;
    let Some(tail) = bytes.get(at + 1..at + len) else {
        return Err(ScanError::InvalidUtf8(at));
    };
    let mut scalar = u32::from(lead) & (0x7F_u32 >> len);
    for &byte in tail {
        if !is_continuation(byte) {
            return Err(ScanError::InvalidUtf8(at));
        }
        scalar = (scalar << 6) | u32::from(byte & 0x3F);
    }
    // Smallest scalar each length is allowed to encode; anything below is an
    // overlong form.
    const MIN_SCALAR: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];
    if scalar < MIN_SCALAR[len] {
        return Err(ScanError::InvalidUtf8(at));
    }
    // Rejects surrogates; `sequence_len` already capped the range at U+10FFFF.
    char::from_u32(scalar).map_or(Err(ScanError::InvalidUtf8(at)), |ch| Ok((ch, at + len)))
}

/// Offset of the scalar following the one at `at`, from the lead byte's
/// length alone (no value decode).
pub(crate) fn next_boundary(bytes: &[u8], at: usize) -> Result<usize> {
    let Some(&lead) = bytes.get(at) else {
        return Err(ScanError::EndOfInput);
    };
    let len = sequence_len(lead).ok_or(ScanError::InvalidUtf8(at))?;
    if at + len > bytes.len() {
        return Err(ScanError::InvalidUtf8(at));
    }
    Ok(at + len)
}

/// Offset of the scalar preceding `at`, never scanning below `floor`.
///
/// Walks back at most 4 bytes looking for a non-continuation byte, then
/// checks that the lead byte found actually spans up to `at`.
pub(crate) fn prev_boundary(bytes: &[u8], floor: usize, at: usize) -> Result<usize> {
    if at <= floor {
        return Err(ScanError::EndOfInput);
    }
    let lowest = core::cmp::max(floor, at.saturating_sub(4));
    let mut i = at - 1;
    loop {
        let Some(&byte) = bytes.get(i) else {
            return Err(ScanError::InvalidUtf8(i));
        };
        if !is_continuation(byte) {
            return match sequence_len(byte) {
                Some(len) if i + len == at => Ok(i),
                _ => Err(ScanError::InvalidUtf8(i)),
            };
        }
        if i == lowest {
            return Err(ScanError::InvalidUtf8(i));
        }
        i -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_sequence_length() {
        let text = "a\u{e9}\u{20ac}\u{1f600}"; // 1, 2, 3, and 4 bytes
        let bytes = text.as_bytes();
        assert_eq!(decode(bytes, 0), Ok(('a', 1)));
        assert_eq!(decode(bytes, 1), Ok(('\u{e9}', 3)));
        assert_eq!(decode(bytes, 3), Ok(('\u{20ac}', 6)));
        assert_eq!(decode(bytes, 6), Ok(('\u{1f600}', 10)));
        assert_eq!(decode(bytes, 10), Err(ScanError::EndOfInput));
    }

    #[test]
    fn rejects_stray_continuation_byte() {
        assert_eq!(decode(&[0x80], 0), Err(ScanError::InvalidUtf8(0)));
        assert_eq!(next_boundary(&[0xBF], 0), Err(ScanError::InvalidUtf8(0)));
    }

    #[test]
    fn rejects_truncated_sequence() {
        // Lead byte of a 3-byte sequence with only one continuation byte.
        assert_eq!(decode(&[0xE2, 0x82], 0), Err(ScanError::InvalidUtf8(0)));
        assert_eq!(next_boundary(&[0xE2, 0x82], 0), Err(ScanError::InvalidUtf8(0)));
    }

    #[test]
    fn rejects_non_continuation_tail() {
        assert_eq!(decode(&[0xC3, 0x28], 0), Err(ScanError::InvalidUtf8(0)));
    }

    #[test]
    fn rejects_overlong_forms() {
        // 2-byte overlong leads are invalid outright.
        assert_eq!(decode(&[0xC0, 0xAF], 0), Err(ScanError::InvalidUtf8(0)));
        // 3-byte overlong NUL.
        assert_eq!(decode(&[0xE0, 0x80, 0x80], 0), Err(ScanError::InvalidUtf8(0)));
        // 4-byte overlong encoding of U+0800.
        assert_eq!(
            decode(&[0xF0, 0x80, 0xA0, 0x80], 0),
            Err(ScanError::InvalidUtf8(0))
        );
    }

    #[test]
    fn rejects_surrogates_and_out_of_range() {
        // U+D800.
        assert_eq!(decode(&[0xED, 0xA0, 0x80], 0), Err(ScanError::InvalidUtf8(0)));
        // 0xF5 would start a scalar past U+10FFFF.
        assert_eq!(
            decode(&[0xF5, 0x80, 0x80, 0x80], 0),
            Err(ScanError::InvalidUtf8(0))
        );
    }

    #[test]
    fn next_boundary_uses_lead_byte_only() {
        let bytes = "x\u{e9}y".as_bytes();
        assert_eq!(next_boundary(bytes, 0), Ok(1));
        assert_eq!(next_boundary(bytes, 1), Ok(3));
        assert_eq!(next_boundary(bytes, 3), Ok(4));
        assert_eq!(next_boundary(bytes, 4), Err(ScanError::EndOfInput));
    }

    #[test]
    fn prev_boundary_steps_over_multibyte() {
        let bytes = "a\u{e9}\u{1f600}".as_bytes(); // boundaries at 0, 1, 3, 7
        assert_eq!(prev_boundary(bytes, 0, 7), Ok(3));
        assert_eq!(prev_boundary(bytes, 0, 3), Ok(1));
        assert_eq!(prev_boundary(bytes, 0, 1), Ok(0));
        assert_eq!(prev_boundary(bytes, 0, 0), Err(ScanError::EndOfInput));
    }

    #[test]
    fn prev_boundary_respects_floor() {
        let bytes = "abc".as_bytes();
        assert_eq!(prev_boundary(bytes, 2, 3), Ok(2));
        assert_eq!(prev_boundary(bytes, 2, 2), Err(ScanError::EndOfInput));
    }

    #[test]
    fn prev_boundary_rejects_mismatched_lead() {
        // 'a' followed by a stray continuation byte: stepping back from
        // offset 2 finds a lead byte whose length does not reach 2.
        assert_eq!(prev_boundary(&[0x61, 0x80], 0, 2), Err(ScanError::InvalidUtf8(0)));
        // Nothing but continuation bytes in the window.
        assert_eq!(
            prev_boundary(&[0x80, 0x80, 0x80, 0x80, 0x80], 1, 5),
            Err(ScanError::InvalidUtf8(1))
        );
    }
}
