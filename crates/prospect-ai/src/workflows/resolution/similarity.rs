//! Composite string similarity used by entity matching and employer alignment.
//!
//! Two independent measures are blended: a Levenshtein-derived score weighted
//! 0.6 and a token Jaccard score weighted 0.4, both computed over normalized
//! strings. Everything here is deterministic and side-effect free so matching
//! and alignment can be tested without any surrounding state.

use super::nicknames;

const LEVENSHTEIN_WEIGHT: f64 = 0.6;
const JACCARD_WEIGHT: f64 = 0.4;

/// Score returned when two names share a nickname class and carry no
/// surname tokens to compare further.
const NICKNAME_ONLY_SCORE: u8 = 85;

const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')', '\'', '"',
];

/// Lowercase, strip punctuation, and collapse runs of whitespace.
pub(crate) fn normalize(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|ch| !STRIPPED_PUNCTUATION.contains(ch))
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Composite similarity between two strings on a 0-100 scale.
///
/// Identical normalized strings score 100; if exactly one side normalizes to
/// the empty string the score is 0.
pub fn similarity(a: &str, b: &str) -> u8 {
    let left = normalize(a);
    let right = normalize(b);
    scored_normalized(&left, &right)
}

fn scored_normalized(left: &str, right: &str) -> u8 {
    if left == right {
        return 100;
    }
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let blended = LEVENSHTEIN_WEIGHT * levenshtein_score(left, right)
        + JACCARD_WEIGHT * token_jaccard(left, right);
    blended.round().clamp(0.0, 100.0) as u8
}

/// Nickname-aware similarity for person names.
///
/// When the first tokens of both names belong to the same registered nickname
/// class, the score is 85 if neither name carries further tokens, otherwise
/// the average of 100 and the similarity of the remaining tokens. Names
/// outside any shared class fall back to [`similarity`].
pub fn name_similarity(a: &str, b: &str) -> u8 {
    let left = normalize(a);
    let right = normalize(b);

    if left == right {
        return 100;
    }
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let left_tokens: Vec<&str> = left.split(' ').collect();
    let right_tokens: Vec<&str> = right.split(' ').collect();

    if nicknames::same_class(left_tokens[0], right_tokens[0]) {
        let left_rest = left_tokens[1..].join(" ");
        let right_rest = right_tokens[1..].join(" ");

        if left_rest.is_empty() && right_rest.is_empty() {
            return NICKNAME_ONLY_SCORE;
        }

        let surname = scored_normalized(&left_rest, &right_rest);
        let averaged = (100.0 + f64::from(surname)) / 2.0;
        return averaged.round() as u8;
    }

    scored_normalized(&left, &right)
}

/// `(max_len - edit_distance) / max_len * 100` over normalized characters.
fn levenshtein_score(left: &str, right: &str) -> f64 {
    let max_len = left.chars().count().max(right.chars().count());
    if max_len == 0 {
        return 100.0;
    }

    let distance = strsim::levenshtein(left, right);
    ((max_len - distance.min(max_len)) as f64 / max_len as f64) * 100.0
}

/// `|A ∩ B| / |A ∪ B| * 100` over whitespace tokens.
fn token_jaccard(left: &str, right: &str) -> f64 {
    let left_tokens: std::collections::HashSet<&str> = left.split_whitespace().collect();
    let right_tokens: std::collections::HashSet<&str> = right.split_whitespace().collect();

    let union = left_tokens.union(&right_tokens).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = left_tokens.intersection(&right_tokens).count();
    (intersection as f64 / union as f64) * 100.0
}
