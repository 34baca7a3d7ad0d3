//! String edit distance for fuzzy tool-name matching.

/// Classic Levenshtein distance between two strings.
///
/// Insertions, deletions and substitutions each cost 1. Adjacent
/// transpositions are not a primitive operation, so `"ab"` → `"ba"` costs 2.
/// Distance is measured in `char`s, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    // Keep the shorter string on the row axis.
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short: Vec<char> = short.chars().collect();

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != *sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[short.len()]
}

/// Find the candidate closest to `name` within `max_distance` edits.
///
/// An exact case-insensitive match wins outright. Otherwise the first
/// candidate with the smallest distance is returned, provided that distance
/// does not exceed `max_distance`.
pub fn closest_match<'a, S: AsRef<str>>(
    name: &str,
    candidates: &'a [S],
    max_distance: usize,
) -> Option<&'a str> {
    let lower = name.to_lowercase();
    if let Some(hit) = candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| candidate.to_lowercase() == lower)
    {
        return Some(hit);
    }

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates.iter().map(AsRef::as_ref) {
        let distance = levenshtein(name, candidate);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.filter(|(_, d)| *d <= max_distance).map(|(c, _)| c)
}
