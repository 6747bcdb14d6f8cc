/// Parse a free-text `"Key: Value"` string.
///
/// Splits on the first colon only and trims both halves. Returns `None`
/// when there is no colon so the caller can apply its own fallback.
pub fn parse_kv(text: &str) -> Option<(&str, &str)> {
    text.split_once(':').map(|(key, value)| (key.trim(), value.trim()))
}
