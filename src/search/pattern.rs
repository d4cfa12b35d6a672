//! Wildcard expansion of username patterns

use crate::error::{HandleScoutError, Result};

/// The wildcard marker accepted in search patterns
pub const WILDCARD: char = '*';

/// Expand a pattern with a single `*` wildcard into candidate usernames.
///
/// A leading `@` is stripped. A pattern without a wildcard expands to itself
/// (exact-match probe). A pattern with more than one wildcard is unsupported
/// and expands to nothing; the caller reports "no candidates" instead of
/// failing.
///
/// For each infix length from 1 to `max_len`, every ordered combination of
/// charset characters (with repetition) is emitted in charset order, so the
/// output is fully deterministic and truncating it at any limit is
/// reproducible. Nothing here caps the total; `candidate_count` tells the
/// caller how large an expansion will be before it commits.
pub fn expand(pattern: &str, max_len: usize, charset: &str) -> Result<Vec<String>> {
    if max_len == 0 {
        return Err(HandleScoutError::config("probe max_len must be at least 1"));
    }

    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(HandleScoutError::config("expansion charset must not be empty"));
    }

    let pattern = pattern.strip_prefix('@').unwrap_or(pattern);

    if pattern.matches(WILDCARD).count() > 1 {
        // only a single '*' is supported
        return Ok(Vec::new());
    }

    let (prefix, suffix) = match pattern.split_once(WILDCARD) {
        Some(parts) => parts,
        None => return Ok(vec![pattern.to_string()]),
    };

    let base = chars.len() as u128;
    let mut candidates = Vec::new();

    for len in 1..=max_len {
        let total = base.pow(len as u32);
        let mut slots = vec![0usize; len];

        for index in 0..total {
            // decode index as a fixed-width base-N number, most significant slot first
            let mut n = index;
            for slot in (0..len).rev() {
                slots[slot] = (n % base) as usize;
                n /= base;
            }

            let mut candidate = String::with_capacity(prefix.len() + len + suffix.len());
            candidate.push_str(prefix);
            candidate.extend(slots.iter().map(|&i| chars[i]));
            candidate.push_str(suffix);
            candidates.push(candidate);
        }
    }

    Ok(candidates)
}

/// Total candidates `expand` produces for a charset of `charset_len`
/// characters and the given `max_len`: sum of charset_len^L for L in 1..=max_len.
pub fn candidate_count(charset_len: usize, max_len: usize) -> u128 {
    let base = charset_len as u128;
    (1..=max_len as u32).map(|len| base.pow(len)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Charset;

    #[test]
    fn test_exact_pattern_passes_through() {
        let out = expand("someuser", 2, Charset::default().as_str()).unwrap();
        assert_eq!(out, vec!["someuser".to_string()]);
    }

    #[test]
    fn test_leading_at_is_stripped() {
        let out = expand("@someuser", 2, Charset::default().as_str()).unwrap();
        assert_eq!(out, vec!["someuser".to_string()]);
    }

    #[test]
    fn test_multiple_wildcards_unsupported() {
        let out = expand("a*b*c", 2, Charset::default().as_str()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_char_expansion_order() {
        let out = expand("prefix*suffix", 1, "ab").unwrap();
        assert_eq!(out, vec!["prefixasuffix", "prefixbsuffix"]);
    }

    #[test]
    fn test_expansion_is_length_then_lexicographic() {
        let out = expand("x*", 2, "ab").unwrap();
        assert_eq!(out, vec!["xa", "xb", "xaa", "xab", "xba", "xbb"]);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let charset = Charset::default().as_str();
        let first = expand("foo*bar", 2, charset).unwrap();
        let second = expand("foo*bar", 2, charset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_count_formula() {
        assert_eq!(candidate_count(36, 1), 36);
        assert_eq!(candidate_count(36, 2), 1_332);
        assert_eq!(candidate_count(2, 3), 2 + 4 + 8);

        let out = expand("p*", 3, "abc").unwrap();
        assert_eq!(out.len() as u128, candidate_count(3, 3));
    }

    #[test]
    fn test_zero_max_len_is_a_config_error() {
        assert!(expand("foo*", 0, "ab").is_err());
    }

    #[test]
    fn test_empty_charset_is_a_config_error() {
        assert!(expand("foo*", 2, "").is_err());
    }
}
