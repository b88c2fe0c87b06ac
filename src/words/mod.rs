//! English amount-in-words rendering for invoice totals.
//!
//! ```
//! use bijak::words::{WordScale, amount_in_words};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(
//!     amount_in_words(dec!(1180), WordScale::International),
//!     "ONE THOUSAND ONE HUNDRED EIGHTY ONLY"
//! );
//! assert_eq!(
//!     amount_in_words(dec!(250000.5), WordScale::Indian),
//!     "TWO LAKH FIFTY THOUSAND AND FIFTY PAISE ONLY"
//! );
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Grouping used for large numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordScale {
    /// Thousand, million, billion, ...
    #[default]
    International,
    /// Thousand, lakh, crore.
    Indian,
}

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

// Enough groups for u128::MAX.
const INTERNATIONAL_GROUPS: [&str; 13] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
    "sextillion",
    "septillion",
    "octillion",
    "nonillion",
    "decillion",
    "undecillion",
];

/// Render an amount as uppercase English words followed by `ONLY`.
///
/// The amount is rounded to two decimals (half away from zero) for the
/// wording; a non-zero fractional part is read as paise.
pub fn amount_in_words(amount: Decimal, scale: WordScale) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let paise = ((magnitude - whole) * dec!(100)).trunc();

    let mut parts = Vec::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        parts.push("minus".to_string());
    }
    // Decimal's range is well inside u128.
    parts.push(integer_in_words(whole.to_u128().unwrap_or_default(), scale));

    let paise = paise.to_u128().unwrap_or_default();
    if paise > 0 {
        parts.push("and".to_string());
        parts.push(integer_in_words(paise, scale));
        parts.push("paise".to_string());
    }
    parts.push("only".to_string());

    parts.join(" ").to_uppercase()
}

/// Lowercase English words for a non-negative integer.
pub fn integer_in_words(n: u128, scale: WordScale) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }
    match scale {
        WordScale::International => international(n),
        WordScale::Indian => indian(n),
    }
}

fn international(mut n: u128) -> String {
    let mut groups = Vec::new();
    let mut index = 0;
    while n > 0 {
        let group = (n % 1000) as u16;
        if group > 0 {
            let words = below_thousand(group);
            groups.push(match INTERNATIONAL_GROUPS[index] {
                "" => words,
                name => format!("{words} {name}"),
            });
        }
        n /= 1000;
        index += 1;
    }
    groups.reverse();
    groups.join(" ")
}

fn indian(n: u128) -> String {
    let crore = n / 10_000_000;
    let rest = n % 10_000_000;
    let lakh = (rest / 100_000) as u16;
    let thousand = ((rest % 100_000) / 1000) as u16;
    let hundreds = (rest % 1000) as u16;

    let mut parts = Vec::new();
    if crore > 0 {
        parts.push(format!("{} crore", indian(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} lakh", below_hundred(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} thousand", below_hundred(thousand)));
    }
    if hundreds > 0 {
        parts.push(below_thousand(hundreds));
    }
    parts.join(" ")
}

fn below_thousand(n: u16) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

fn below_hundred(n: u16) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        unit => format!("{}-{}", TENS[n / 10], ONES[unit]),
    }
}
