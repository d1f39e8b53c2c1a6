//! Fuzzy matching of user-entered titles against the reference catalog.

use crate::catalog::{Catalog, CatalogEntry};

/// Offset between a full-width ASCII variant and its half-width character.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Normalize a title for comparison.
///
/// Full-width Latin letters and digits become their ASCII forms, the result is
/// lowercased and every whitespace character (including the ideographic space)
/// is removed.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .map(to_halfwidth)
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn to_halfwidth(c: char) -> char {
    match c {
        '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => {
            char::from_u32(c as u32 - FULLWIDTH_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

/// Find the catalog entry a free-text title refers to.
///
/// After normalization an entry matches when the two titles are equal or
/// either one contains the other. The first matching entry in catalog order
/// wins; there is no scoring between several matches. Empty titles and
/// consoles missing from the catalog never match.
pub fn resolve_title<'a>(
    catalog: &'a Catalog,
    console_id: &str,
    title: &str,
) -> Option<&'a CatalogEntry> {
    if title.is_empty() {
        return None;
    }

    let query = normalize_title(title);
    catalog.games(console_id).iter().find(|entry| {
        let candidate = normalize_title(&entry.title);
        candidate == query || candidate.contains(&query) || query.contains(&candidate)
    })
}
