//! String helpers for identifier synthesis.

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a string to camelCase: the first word is lowercased at its first
/// character, every following word is capitalized, and all whitespace is
/// stripped. Idempotent on input that is already camelCase.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split_whitespace().enumerate() {
        if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.extend(chars);
            }
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}
