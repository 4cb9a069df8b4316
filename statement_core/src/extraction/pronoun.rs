//! Pronoun substitution from the last-subject memory.

/// Pronouns replaced by the remembered subject.
pub const PRONOUNS: [&str; 3] = ["it", "they", "them"];

const TRIM_PUNCTUATION: [char; 4] = [',', '.', '!', '?'];

/// Replace whole-word pronouns with `last_subject`.
///
/// Comparison ignores case and surrounding `,.!?`. A pronoun token is replaced
/// as a whole; every other token is kept as written. Tokens are re-joined with
/// single spaces. Without a remembered subject the statement is returned as is.
pub fn resolve_pronouns(statement: &str, last_subject: Option<&str>) -> String {
    let Some(subject) = last_subject.filter(|s| !s.is_empty()) else {
        return statement.to_string();
    };

    statement
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_matches(TRIM_PUNCTUATION.as_slice()).to_lowercase();
            if PRONOUNS.contains(&bare.as_str()) {
                subject
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
