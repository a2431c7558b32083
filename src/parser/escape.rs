//! String literal escape processing

/// Resolve the escape sequences of a string literal token
///
/// Supports `\'`, `\"`, `\\`, `\/`, `\n`, `\r`, `\t`, `\f` and `\uXXXX`.
/// Unknown or malformed escapes are kept literally.
pub fn unescape_string(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\u{000C}'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('\'') => result.push('\''),
            Some('"') => result.push('"'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(unicode_char) => {
                        result.push(unicode_char);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    None => result.push_str("\\u"),
                }
            }
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
