//! Converter from English number-word phrases to exact dollar amounts.
//!
//! Deed text spells sale prices out in words ("One Million Two Hundred
//! Thousand Dollars"); this module turns such a phrase into the integer
//! it denotes, or fails loudly. It never guesses: any token outside the
//! known vocabulary is an error rather than something to skip.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount phrase contains no number words")]
    EmptyPhrase,
    #[error("unknown number token '{0}'")]
    UnknownToken(String),
    #[error("amount phrase denotes a value out of range")]
    OutOfRange,
}

/// Convert an English number-word phrase into whole dollars.
///
/// Currency words ("dollar"/"dollars") and the connective "and" are
/// dropped; hyphens and punctuation are treated as token separators.
/// A bare scale word gets an implicit leading one, so "hundred" alone
/// reads as 100.
pub fn words_to_dollars(phrase: &str) -> Result<u64, AmountParseError> {
    let cleaned: String = phrase
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| !matches!(*t, "and" | "dollar" | "dollars"))
        .collect();

    if tokens.is_empty() {
        return Err(AmountParseError::EmptyPhrase);
    }

    let mut total: u64 = 0;
    let mut current: u64 = 0;

    // The phrase is untrusted text: a grammatically valid pile of scale
    // words can exceed u64, so every accumulation is checked.
    for token in tokens {
        if let Some(value) = basic_value(token) {
            current = current
                .checked_add(value)
                .ok_or(AmountParseError::OutOfRange)?;
        } else if token == "hundred" {
            if current == 0 {
                current = 1;
            }
            current = current
                .checked_mul(100)
                .ok_or(AmountParseError::OutOfRange)?;
        } else if let Some(scale) = large_scale(token) {
            if current == 0 {
                current = 1;
            }
            let group = current
                .checked_mul(scale)
                .ok_or(AmountParseError::OutOfRange)?;
            total = total
                .checked_add(group)
                .ok_or(AmountParseError::OutOfRange)?;
            current = 0;
        } else {
            return Err(AmountParseError::UnknownToken(token.to_string()));
        }
    }

    total
        .checked_add(current)
        .ok_or(AmountParseError::OutOfRange)
}

fn basic_value(token: &str) -> Option<u64> {
    let value = match token {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn large_scale(token: &str) -> Option<u64> {
    match token {
        "thousand" => Some(1_000),
        "million" => Some(1_000_000),
        "billion" => Some(1_000_000_000),
        _ => None,
    }
}
