//! Singapore identity numbers: NRIC/FIN and UEN checksums.

use super::ValidationContext;
use crate::error::ValidateFieldError;

const NRIC_WEIGHTS: [u32; 7] = [2, 7, 6, 5, 4, 3, 2];
const NRIC_CHECK_ST: &[u8; 11] = b"JZIHGFEDCBA";
const NRIC_CHECK_FG: &[u8; 11] = b"XWUTRQPNMLK";
const NRIC_CHECK_M: &[u8; 11] = b"XWUTRQPNJLK";

const UEN_BUSINESS_WEIGHTS: [u32; 8] = [10, 4, 9, 3, 8, 2, 7, 1];
const UEN_BUSINESS_CHECK: &[u8; 11] = b"XMKECAWLJDB";
const UEN_LOCAL_WEIGHTS: [u32; 9] = [10, 8, 6, 4, 9, 7, 5, 3, 1];
const UEN_LOCAL_CHECK: &[u8; 11] = b"ZKCMDNERGWH";
const UEN_OTHER_WEIGHTS: [u32; 9] = [4, 3, 5, 3, 10, 2, 2, 5, 7];
const UEN_OTHER_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWX0123456789";

/// Entity-type codes allowed in positions four and five of an
/// other-entity UEN.
const UEN_ENTITY_TYPES: &[&str] = &[
    "BN", "LP", "LL", "LC", "FC", "PF", "VC", "RF", "MQ", "MM", "NB", "CC", "CS", "MB", "FM",
    "GS", "EC", "DP", "CP", "NR", "CM", "CD", "MD", "HS", "VH", "CH", "MH", "CL", "XL", "CX",
    "HC", "RP", "TU", "TC", "FB", "FN", "FS", "PA", "PB", "SS", "MC", "SM", "GA", "GB", "UF",
];

pub(super) fn validate_nric(answer: &str) -> Result<(), ValidateFieldError> {
    if is_nric_valid(answer) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "NricValidator: answer is not a valid NRIC/FIN",
        ))
    }
}

pub(super) fn validate_uen(answer: &str, ctx: &ValidationContext) -> Result<(), ValidateFieldError> {
    if is_uen_valid(answer, ctx.current_year()) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "UenValidator: answer is not a valid UEN",
        ))
    }
}

/// Check an NRIC or FIN: prefix `S`, `T`, `F`, `G` or `M`, seven digits and
/// a check letter. Case-insensitive.
#[must_use]
pub fn is_nric_valid(value: &str) -> bool {
    let value = value.to_ascii_uppercase();
    let bytes = value.as_bytes();
    if bytes.len() != 9 {
        return false;
    }
    let (prefix, digits, check) = (bytes[0], &bytes[1..8], bytes[8]);
    let (offset, table) = match prefix {
        b'S' => (0, NRIC_CHECK_ST),
        b'T' => (4, NRIC_CHECK_ST),
        b'F' => (0, NRIC_CHECK_FG),
        b'G' => (4, NRIC_CHECK_FG),
        b'M' => (3, NRIC_CHECK_M),
        _ => return false,
    };
    let Some(sum) = weighted_digit_sum(digits, &NRIC_WEIGHTS) else {
        return false;
    };
    table[((sum + offset) % 11) as usize] == check
}

/// Check a UEN issued to a business (8 digits and a letter), a local company
/// (10 characters, starting with the year of incorporation) or another entity
/// (`R`/`S`/`T`, a two-digit year, an entity type, four digits and a letter).
///
/// Incorporation years after `current_year` are rejected.
#[must_use]
pub fn is_uen_valid(value: &str, current_year: i32) -> bool {
    let value = value.trim().to_ascii_uppercase();
    let bytes = value.as_bytes();
    match bytes.len() {
        9 => is_business_uen(bytes),
        10 if bytes[0].is_ascii_digit() => is_local_company_uen(bytes, current_year),
        10 => is_other_entity_uen(bytes, current_year),
        _ => false,
    }
}

fn is_business_uen(bytes: &[u8]) -> bool {
    let Some(sum) = weighted_digit_sum(&bytes[..8], &UEN_BUSINESS_WEIGHTS) else {
        return false;
    };
    UEN_BUSINESS_CHECK[(sum % 11) as usize] == bytes[8]
}

fn is_local_company_uen(bytes: &[u8], current_year: i32) -> bool {
    let Some(sum) = weighted_digit_sum(&bytes[..9], &UEN_LOCAL_WEIGHTS) else {
        return false;
    };
    let Some(year) = parse_digits(&bytes[..4]) else {
        return false;
    };
    if i64::from(year) > i64::from(current_year) {
        return false;
    }
    UEN_LOCAL_CHECK[(sum % 11) as usize] == bytes[9]
}

fn is_other_entity_uen(bytes: &[u8], current_year: i32) -> bool {
    if !matches!(bytes[0], b'R' | b'S' | b'T') {
        return false;
    }
    let Some(year) = parse_digits(&bytes[1..3]) else {
        return false;
    };
    if bytes[0] == b'T' && i64::from(year) > i64::from(current_year.rem_euclid(100)) {
        return false;
    }
    let entity_type = &bytes[3..5];
    if !UEN_ENTITY_TYPES
        .iter()
        .any(|code| code.as_bytes() == entity_type)
    {
        return false;
    }
    if parse_digits(&bytes[5..9]).is_none() {
        return false;
    }

    let mut sum: i64 = 0;
    for (&byte, &weight) in bytes[..9].iter().zip(UEN_OTHER_WEIGHTS.iter()) {
        let Some(index) = UEN_OTHER_ALPHABET.iter().position(|&c| c == byte) else {
            return false;
        };
        sum += i64::from(weight) * index as i64;
    }
    let check = (sum - 5).rem_euclid(11);
    UEN_OTHER_ALPHABET[check as usize] == bytes[9]
}

fn weighted_digit_sum(digits: &[u8], weights: &[u32]) -> Option<u32> {
    if digits.len() != weights.len() {
        return None;
    }
    digits.iter().zip(weights).try_fold(0, |sum, (&digit, &weight)| {
        digit
            .is_ascii_digit()
            .then(|| sum + u32::from(digit - b'0') * weight)
    })
}

fn parse_digits(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0u32, |value, &digit| {
        digit
            .is_ascii_digit()
            .then(|| value * 10 + u32::from(digit - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nric_valid_prefixes() {
        for ok in ["S9912345A", "T1394524H", "F0477844T", "G9592927W", "M1234567K"] {
            assert!(is_nric_valid(ok), "{ok} should pass");
        }
        assert!(is_nric_valid("s9912345a"));
    }

    #[test]
    fn test_nric_invalid() {
        for bad in ["S9912345B", "A9912345A", "S991234A", "S99123456A", "S99I2345A", ""] {
            assert!(!is_nric_valid(bad), "{bad} should fail");
        }
    }

    #[test]
    fn test_uen_business() {
        assert!(is_uen_valid("00192200M", 2024));
        assert!(is_uen_valid(" 00192200m ", 2024));
        assert!(!is_uen_valid("00192200A", 2024));
        assert!(!is_uen_valid("0019220AM", 2024));
    }

    #[test]
    fn test_uen_local_company() {
        assert!(is_uen_valid("197401143C", 2024));
        assert!(!is_uen_valid("197401143D", 2024));
        assert!(!is_uen_valid("197401143C", 1973));
    }

    #[test]
    fn test_uen_other_entity() {
        assert!(is_uen_valid("T09LL0001D", 2024));
        assert!(!is_uen_valid("T09LL0001E", 2024));
        // Year 09 is in the future from 2008.
        assert!(!is_uen_valid("T09LL0001D", 2008));
        // Unknown entity type.
        assert!(!is_uen_valid("T09ZZ0001D", 2024));
        // Unknown prefix.
        assert!(!is_uen_valid("A09LL0001D", 2024));
    }

    #[test]
    fn test_uen_length() {
        assert!(!is_uen_valid("", 2024));
        assert!(!is_uen_valid("12345678", 2024));
        assert!(!is_uen_valid("19740114300C", 2024));
    }
}
