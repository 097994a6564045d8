//! Edit distance and dictionary lookup for typo correction.

/// Classic edit distance (insert, delete, substitute; each cost 1).
///
/// Case-folded and computed over Unicode scalar values, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// A dictionary entry close to a misspelled token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMatch {
    pub entry: String,
    pub distance: usize,
}

/// Entries within `max_distance` of `token`, keeping only the closest tier.
///
/// Exact matches are excluded. Results keep dictionary order, so ties are
/// reported deterministically.
pub fn closest_matches(
    token: &str,
    dictionary: &[String],
    max_distance: usize,
) -> Vec<DictionaryMatch> {
    if token.is_empty() {
        return Vec::new();
    }

    let within: Vec<DictionaryMatch> = dictionary
        .iter()
        .map(|entry| DictionaryMatch {
            entry: entry.clone(),
            distance: edit_distance(token, entry),
        })
        .filter(|m| m.distance > 0 && m.distance <= max_distance)
        .collect();

    let Some(best) = within.iter().map(|m| m.distance).min() else {
        return Vec::new();
    };

    within.into_iter().filter(|m| m.distance == best).collect()
}
