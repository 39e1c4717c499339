//! Display helpers for record text.

/// Split a description into pseudo-sentences for stylized rendering.
///
/// Splits on `.`, trims each piece, drops empty pieces and puts the period
/// back, so `"B. C."` becomes `["B.", "C."]`. Purely cosmetic; descriptions
/// are stored unchanged.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("{piece}."))
        .collect()
}
