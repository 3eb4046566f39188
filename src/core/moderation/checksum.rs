//! Checksum validation for payment identifiers (Luhn, IBAN mod-97)

/// Validate a card number with the Luhn algorithm. Non-digits are ignored.
#[inline]
pub fn luhn_valid(digits: &str) -> bool {
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 2 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, &d) in digits.iter().rev().enumerate() {
        let mut val = d;
        if i % 2 == 1 {
            val *= 2;
            if val > 9 {
                val -= 9;
            }
        }
        sum += val;
    }

    sum % 10 == 0
}

/// Validate an IBAN (ISO 13616): country code, check digits, mod-97 == 1.
/// Spaces are ignored; letters are case-insensitive.
pub fn iban_valid(iban: &str) -> bool {
    let compact: Vec<char> = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if compact.len() < 15 || compact.len() > 34 {
        return false;
    }
    if !compact[..2].iter().all(|c| c.is_ascii_uppercase())
        || !compact[2..4].iter().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    // Move the first four characters to the end, expand letters to 10..35,
    // and reduce digit by digit so the number never overflows.
    let mut remainder: u32 = 0;
    for c in compact[4..].iter().chain(compact[..4].iter()) {
        let value = match c {
            '0'..='9' => *c as u32 - '0' as u32,
            'A'..='Z' => *c as u32 - 'A' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}
