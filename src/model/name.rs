use crate::error::ClanError;

/// Substrings that may not appear (case-insensitively) anywhere in a clan
/// name. Covers staff impersonation and slur evasion spellings.
const BLOCKED_WORDS: &[&str] = &[
    "owner", "staff", "admin", "null", "0wner", "own3r", "niger", "n-word", "nword", "hardr",
    "nigger", "nig", "n1gg3r",
];

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 12;

/// The formatting marker players may embed in names (host color codes).
const FORMAT_MARKER: char = '§';

fn allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == FORMAT_MARKER
}

/// Validate a proposed clan name against length, alphabet, the blocked-word
/// list, and registry uniqueness (`taken` reports whether a name is already
/// registered).
pub fn validate_name(name: &str, taken: impl Fn(&str) -> bool) -> Result<(), ClanError> {
    let len = name.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(ClanError::validation(
            "Invalid clan name! Must be 3-12 characters, no spaces, and not contain forbidden words",
        ));
    }
    if !name.chars().all(allowed_char) {
        return Err(ClanError::validation(
            "Invalid clan name! Must be 3-12 characters, no spaces, and not contain forbidden words",
        ));
    }
    let lowered = name.to_lowercase();
    if BLOCKED_WORDS.iter().any(|w| lowered.contains(w)) {
        return Err(ClanError::validation(
            "Invalid clan name! Must be 3-12 characters, no spaces, and not contain forbidden words",
        ));
    }
    if taken(name) {
        return Err(ClanError::validation("A clan with that name already exists."));
    }
    Ok(())
}
