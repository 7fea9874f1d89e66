//! Normalizers applied to field values that passed validation

/// Trim leading and trailing whitespace from a string
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim, then titlecase the first character and lowercase the rest.
///
/// Idempotent: normalizing an already normalized name returns it unchanged.
pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => {
            let mut out = titlecase(first);
            out.extend(chars.flat_map(char::to_lowercase));
            out
        }
        None => String::new(),
    }
}

/// Titlecase form of a single character.
///
/// Differs from uppercase for the Latin digraphs (`ǆ` becomes `ǅ`) and for
/// characters whose uppercase expands, where only the first letter stays
/// capital (`ß` becomes `Ss`, `ﬁ` becomes `Fi`).
fn titlecase(c: char) -> String {
    let digraph = match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    };
    if let Some(title) = digraph {
        return title.to_string();
    }

    let mut upper = c.to_uppercase();
    match upper.next() {
        Some(head) => std::iter::once(head)
            .chain(upper.flat_map(char::to_lowercase))
            .collect(),
        None => c.to_string(),
    }
}

/// Phone numbers are stored trimmed and otherwise untouched
pub fn normalize_phone(phone: &str) -> String {
    trim(phone)
}
