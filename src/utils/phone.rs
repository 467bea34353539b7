//! Phone number normalization for `tel:` links.

/// Converts a display phone number into the form used in a `tel:` URI.
///
/// - whitespace, hyphens, dots and parentheses are dropped
/// - a leading `+` is kept, later ones are dropped
/// - letters map to their keypad digits (`1-800-FLOWERS` → `18003569377`)
/// - `,` (pause) is kept and `#` is percent-encoded
/// - anything else is dropped
pub fn phone_friendly(phone: &str) -> String {
    let mut out = String::with_capacity(phone.len());

    for c in phone.trim().chars() {
        match c {
            '+' if out.is_empty() => out.push('+'),
            '0'..='9' | ',' => out.push(c),
            '#' => out.push_str("%23"),
            c if c.is_ascii_alphabetic() => out.push(keypad_digit(c)),
            _ => {}
        }
    }

    out
}

fn keypad_digit(letter: char) -> char {
    match letter.to_ascii_uppercase() {
        'A'..='C' => '2',
        'D'..='F' => '3',
        'G'..='I' => '4',
        'J'..='L' => '5',
        'M'..='O' => '6',
        'P'..='S' => '7',
        'T'..='V' => '8',
        _ => '9',
    }
}
