/// Splits one raw CSV line into trimmed field values.
///
/// Fields are comma-separated and may be wrapped in double quotes. Inside
/// a quoted field `""` is a literal quote; any other quote toggles quote
/// mode, and commas inside quote mode do not split. Malformed quoting is
/// never an error: an unterminated quote simply consumes the rest of the
/// line as one field.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
