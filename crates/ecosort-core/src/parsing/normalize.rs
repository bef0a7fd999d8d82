/// Normalize a detector label to the canonical lookup key.
///
/// Steps:
/// 1. Trim surrounding whitespace
/// 2. Upper-case the first character
/// 3. Lower-case everything after it
///
/// Labels that differ only by case map to the same key. An empty label
/// yields an empty key; callers filter blank labels before classifying.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(trimmed.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}
