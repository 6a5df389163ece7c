//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Country code prepended to local-format mobile numbers (Brazil)
pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Digits in a local mobile number: two-digit area code plus nine-digit subscriber
pub const LOCAL_NUMBER_LENGTH: usize = 11;

/// Digits in a fully qualified number: country code plus local number
pub const INTERNATIONAL_NUMBER_LENGTH: usize = 13;

// Canonical gateway format: "55" followed by eleven digits
static CANONICAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^55\d{11}$").unwrap()
});

/// Strip every character that is not an ASCII decimal digit
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize free-form user input into the gateway's international format.
///
/// Eleven remaining digits are treated as a local number and receive the
/// default country code; thirteen digits are accepted unchanged when they
/// already carry it. Anything else yields `None`.
///
/// ```
/// use pv_shared::utils::phone::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("11 99999-8888").as_deref(), Some("5511999998888"));
/// assert_eq!(normalize_phone_number("123"), None);
/// ```
pub fn normalize_phone_number(raw: &str) -> Option<String> {
    let digits = strip_non_digits(raw);

    match digits.len() {
        LOCAL_NUMBER_LENGTH => Some(format!("{}{}", DEFAULT_COUNTRY_CODE, digits)),
        INTERNATIONAL_NUMBER_LENGTH if digits.starts_with(DEFAULT_COUNTRY_CODE) => Some(digits),
        _ => None,
    }
}

/// Check whether a string is already in canonical gateway format
pub fn is_canonical_phone(phone: &str) -> bool {
    CANONICAL_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logs and display (e.g., 5511****8888)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = strip_non_digits(phone);
    if digits.len() >= 8 {
        format!("{}****{}", &digits[..4], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_local_number() {
        assert_eq!(
            normalize_phone_number("11 99999-8888"),
            Some("5511999998888".to_string())
        );
        assert_eq!(
            normalize_phone_number("(21) 98765-4321"),
            Some("5521987654321".to_string())
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        assert_eq!(
            normalize_phone_number("5511999998888"),
            Some("5511999998888".to_string())
        );
        assert_eq!(
            normalize_phone_number("+55 (11) 99999-8888"),
            Some("5511999998888".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_other_lengths() {
        assert_eq!(normalize_phone_number("123"), None);
        assert_eq!(normalize_phone_number(""), None);
        assert_eq!(normalize_phone_number("not a phone"), None);
        assert_eq!(normalize_phone_number("1199999888"), None); // 10 digits
        assert_eq!(normalize_phone_number("551199999888"), None); // 12 digits
        assert_eq!(normalize_phone_number("55119999988881"), None); // 14 digits
    }

    #[test]
    fn test_normalize_rejects_foreign_country_code() {
        assert_eq!(normalize_phone_number("4411999998888"), None);
        assert_eq!(normalize_phone_number("+1 415 555 26710"), None);
    }

    #[test]
    fn test_normalize_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not decimal digits for the gateway
        assert_eq!(normalize_phone_number("١١٩٩٩٩٩٨٨٨٨"), None);
        assert_eq!(
            normalize_phone_number("1١1 99999-8888"),
            Some("5511999998888".to_string())
        );
    }

    #[test]
    fn test_every_eleven_digit_string_gets_country_code() {
        for seed in 0u64..200 {
            let local = format!("{:011}", seed * 49_999_999 % 100_000_000_000);
            let normalized = normalize_phone_number(&local).unwrap();
            assert_eq!(normalized.len(), INTERNATIONAL_NUMBER_LENGTH);
            assert!(normalized.starts_with(DEFAULT_COUNTRY_CODE));
            assert!(normalized.ends_with(&local));
            assert!(is_canonical_phone(&normalized));
        }
    }

    #[test]
    fn test_every_international_string_is_unchanged() {
        for seed in 0u64..200 {
            let subscriber = format!("{:011}", seed * 49_999_999 % 100_000_000_000);
            let international = format!("{}{}", DEFAULT_COUNTRY_CODE, subscriber);
            assert_eq!(
                normalize_phone_number(&international),
                Some(international.clone())
            );
            // Punctuation around the same digits changes nothing
            let punctuated = format!("+{} ({}) {}", DEFAULT_COUNTRY_CODE, &subscriber[..2], &subscriber[2..]);
            assert_eq!(normalize_phone_number(&punctuated), Some(international));
        }
    }

    #[test]
    fn test_is_canonical_phone() {
        assert!(is_canonical_phone("5511999998888"));
        assert!(!is_canonical_phone("11999998888"));
        assert!(!is_canonical_phone("+5511999998888"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("5511999998888"), "5511****8888");
        assert_eq!(mask_phone_number("11 99999-8888"), "1199****8888");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
