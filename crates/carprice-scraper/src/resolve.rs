//! Make/model disambiguation of free-text listing titles.

use crate::taxonomy::Taxonomy;

/// Finds the shortest whitespace-token prefix of `text` that is a candidate.
///
/// Tokens are re-joined with single spaces while accumulating, so
/// `"Alfa   Romeo"` is tested as `"Alfa"` then `"Alfa Romeo"`. The first
/// match wins: with both `"Alfa"` and `"Alfa Romeo"` known, `"Alfa"` is
/// returned and the longer name is never tested.
pub fn resolve<F>(text: &str, is_candidate: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let mut pattern = String::new();
    for token in text.split_whitespace() {
        pattern.push_str(token);
        if is_candidate(&pattern) {
            return Some(pattern);
        }
        pattern.push(' ');
    }
    None
}

/// Resolves the make and then the model from a listing title.
///
/// The model is searched in what remains after cutting as many characters
/// as the make has from the front of the raw title. The cut is not
/// token-aware: leading or doubled whitespace in the title shifts it.
/// An unmatched model resolves to an empty string; an unmatched make to
/// `None`.
#[must_use]
pub fn resolve_make_model(title: &str, taxonomy: &Taxonomy) -> Option<(String, String)> {
    let make = resolve(title, |candidate| taxonomy.contains_make(candidate))?;
    let remainder = cut_chars(title, make.chars().count());
    let model = taxonomy
        .models(&make)
        .and_then(|models| resolve(remainder, |candidate| models.contains(candidate)))
        .unwrap_or_default();
    Some((make, model))
}

fn cut_chars(text: &str, count: usize) -> &str {
    text.char_indices()
        .nth(count)
        .map_or("", |(idx, _)| &text[idx..])
}
