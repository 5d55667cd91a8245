/// HTML-escapes user text for the notification body and the name length rule.
///
/// On top of `htmlescape::encode_minimal`, `/`, `\` and `` ` `` are encoded too,
/// so `A/` becomes `A&#x2F;`.
pub fn escape(text: &str) -> String {
    let escaped = htmlescape::encode_minimal(text);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}
