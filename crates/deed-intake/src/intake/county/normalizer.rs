//! County name normalization for OCR noise.
//!
//! Scanned deeds produce forms like "S.Clara", "Santa  Clara County",
//! or "santa-clara | CA". Normalization reduces all of them to one
//! comparison key before any similarity scoring happens.

/// Tokens that carry no identifying information for matching.
const FILLER_TOKENS: [&str; 3] = ["county", "of", "the"];

/// Normalize a raw county string into its comparison key.
///
/// Lowercases, splits OCR-glued tokens ("s.clara" -> "s. clara"),
/// treats `-` `/` `,` `|` as separators, strips punctuation, drops
/// filler tokens, and expands a leading "s."/"st." abbreviation.
/// Idempotent: normalizing an already-normalized key is a no-op.
pub fn normalize_county(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    // OCR frequently glues the next token onto an abbreviation period.
    let chars: Vec<char> = lowered.chars().collect();
    let mut spaced = String::with_capacity(lowered.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        spaced.push(c);
        if c == '.' && i > 0 && chars[i - 1].is_alphabetic() {
            spaced.push(' ');
        }
    }

    let stripped: String = spaced
        .chars()
        .map(|c| match c {
            '-' | '/' | ',' | '|' => ' ',
            c if c.is_alphanumeric() || c == '_' || c == '.' || c.is_whitespace() => c,
            _ => ' ',
        })
        .collect();

    let mut tokens: Vec<String> = stripped
        .split_whitespace()
        .filter(|t| !FILLER_TOKENS.contains(t))
        .map(str::to_string)
        .collect();

    if tokens.is_empty() {
        return String::new();
    }

    // Abbreviations in county names are leading qualifiers, so only the
    // first token is eligible for expansion.
    if let Some(expanded) = expand_abbreviation(&tokens[0]) {
        tokens[0] = expanded.to_string();
    }
    for token in &mut tokens {
        token.retain(|c| c != '.');
    }

    tokens.join(" ")
}

fn expand_abbreviation(token: &str) -> Option<&'static str> {
    match token {
        "s" | "s." => Some("santa"),
        "st" | "st." => Some("saint"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glued_abbreviation_matches_full_name() {
        assert_eq!(normalize_county("S.Clara"), "santa clara");
        assert_eq!(normalize_county("S. Clara"), "santa clara");
        assert_eq!(normalize_county("Santa Clara County"), "santa clara");
    }

    #[test]
    fn saint_abbreviation_expands() {
        assert_eq!(normalize_county("St. Louis"), "saint louis");
        assert_eq!(normalize_county("st.louis"), "saint louis");
    }

    #[test]
    fn expansion_applies_only_to_the_first_token() {
        assert_eq!(normalize_county("Port St. Lucie"), "port st lucie");
    }

    #[test]
    fn separators_and_fillers_are_removed() {
        assert_eq!(normalize_county("santa-clara | county"), "santa clara");
        assert_eq!(normalize_county("County of the Santa   Clara"), "santa clara");
        assert_eq!(normalize_county("san/mateo, county"), "san mateo");
    }

    #[test]
    fn filler_only_input_yields_empty_key() {
        assert_eq!(normalize_county("County of the"), "");
        assert_eq!(normalize_county("   "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["S.Clara", "Santa Clara County", "st. louis", "", "Mars!!"] {
            let once = normalize_county(raw);
            assert_eq!(normalize_county(&once), once, "not idempotent for {raw:?}");
        }
    }
}
