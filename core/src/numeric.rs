//! `parseInt`-compatible integer scanning.
//!
//! The validators and the URL parser accept whatever a browser's
//! `parseInt(text)` accepts: leading whitespace, an optional sign, a `0x`
//! prefix switching to base 16, then the longest run of digits. Trailing
//! garbage is ignored, so `"1a"` is 1 and `"80/x"` is 80.

/// Characters `parseInt` skips before the number: the ECMAScript
/// `WhiteSpace` (which includes the Zs category) and `LineTerminator` sets.
/// Narrower than `char::is_whitespace`, which also admits U+0085.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
            | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
    )
}

/// Parse the leading integer of `text`, or `None` when no digit is found
/// (the not-a-number case).
///
/// Results saturate at the `i64` bounds instead of losing precision.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start_matches(is_js_whitespace);

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        seen = true;
        let d = i64::from(d);
        value = value.saturating_mul(i64::from(radix));
        value = if negative {
            value.saturating_sub(d)
        } else {
            value.saturating_add(d)
        };
    }

    seen.then_some(value)
}
