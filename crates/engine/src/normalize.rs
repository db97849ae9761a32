use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a name into an index/equality key: trim and uppercase.
///
/// Used only for hash keys and exact comparison, never for similarity
/// scoring or display.
pub fn key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Punctuation ignored by tolerant comparison.
const IGNORED: [char; 5] = [' ', '-', '.', ',', ';'];

/// Normalize a name for tolerant comparison: decompose to base characters,
/// drop combining marks and the ignored punctuation set, uppercase.
///
/// Idempotent: `tolerant(tolerant(x)) == tolerant(x)`. ASCII input only
/// changes by case and the dropped punctuation.
pub fn tolerant(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c) && !IGNORED.contains(c))
        .flat_map(char::to_uppercase)
        .collect()
}
