//! Input masks for the identity step.
//!
//! Both masks are total: every non-digit is dropped, digits past the target
//! count are discarded and punctuation is re-inserted by position. Feeding a
//! masked value back in yields the same value.

/// Digits in a normalized CPF.
pub const DOCUMENT_DIGITS: usize = 11;
/// Digits in a normalized mobile phone (area code + 9 + number).
pub const PHONE_DIGITS: usize = 11;

/// Keeps ASCII digits only.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Masks a CPF as `000.000.000-00`, partially for shorter input.
pub fn format_document(raw: &str) -> String {
    let digits: Vec<char> = digits_only(raw).chars().take(DOCUMENT_DIGITS).collect();
    let mut masked = String::with_capacity(DOCUMENT_DIGITS + 3);
    for (idx, digit) in digits.iter().enumerate() {
        match idx {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(*digit);
    }
    masked
}

/// Masks a phone as `00 00000-0000`.
///
/// Up to ten digits the landline layout `00 0000-0000` is used while typing;
/// the eleventh digit shifts the hyphen one position right.
pub fn format_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    let digits: String = digits.chars().take(PHONE_DIGITS).collect();
    let len = digits.len();

    if len <= 2 {
        digits
    } else if len <= 6 {
        format!("{} {}", &digits[..2], &digits[2..])
    } else if len <= 10 {
        format!("{} {}-{}", &digits[..2], &digits[2..6], &digits[6..])
    } else {
        format!("{} {}-{}", &digits[..2], &digits[2..7], &digits[7..])
    }
}
