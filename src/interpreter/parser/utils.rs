/// Words the expression lexer reserves. They can never be read back as
/// variables, so assigning to them is rejected.
pub const RESERVED_WORDS: &[&str] = &["and", "or", "not", "in", "true", "false", "True", "False"];

/// Returns the text after `keyword` if `text` starts with it as a whole word.
///
/// The keyword must not be followed by another identifier character, so
/// `output = 1` does not start with the keyword `out`.
///
/// # Example
/// ```
/// use relief::interpreter::parser::utils::strip_keyword;
///
/// assert_eq!(strip_keyword("rep 3 {", "rep"), Some(" 3 {"));
/// assert_eq!(strip_keyword("out(x)", "out"), Some("(x)"));
/// assert_eq!(strip_keyword("outer()", "out"), None);
/// ```
#[must_use]
pub fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if is_identifier_char(c) => None,
        _ => Some(rest),
    }
}

/// Returns `true` if `text` matches `[A-Za-z_][A-Za-z0-9_]*`.
///
/// # Example
/// ```
/// use relief::interpreter::parser::utils::is_identifier;
///
/// assert!(is_identifier("_last_input"));
/// assert!(is_identifier("x2"));
/// assert!(!is_identifier("2x"));
/// assert!(!is_identifier("my-var"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next()
         .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
    && chars.all(is_identifier_char)
}

/// Returns `true` if `text` is an identifier that may be bound in the
/// environment.
#[must_use]
pub fn is_bindable_name(text: &str) -> bool {
    is_identifier(text) && !RESERVED_WORDS.contains(&text)
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Finds the first character outside string literals that satisfies
/// `predicate` and returns its byte offset.
///
/// Both `"` and `'` open a literal that runs to the next matching quote.
pub fn find_outside_strings(text: &str, predicate: impl Fn(char) -> bool) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (index, c) in text.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {},
            None if c == '"' || c == '\'' => quote = Some(c),
            None if predicate(c) => return Some(index),
            None => {},
        }
    }

    None
}

/// Returns the byte offset of the first `{` outside string literals.
#[must_use]
pub fn find_open_brace(text: &str) -> Option<usize> {
    find_outside_strings(text, |c| c == '{')
}

/// Returns the byte offset of the assignment `=` in a line, if there is one.
///
/// Only a bare `=` outside string literals counts; the `=` characters of
/// `==`, `!=`, `<=` and `>=` do not.
///
/// # Example
/// ```
/// use relief::interpreter::parser::utils::find_assignment;
///
/// assert_eq!(find_assignment("x = 1"), Some(2));
/// assert_eq!(find_assignment("flag = a == b"), Some(5));
/// assert_eq!(find_assignment("out(a == b)"), None);
/// assert_eq!(find_assignment("out(\"a=b\")"), None);
/// ```
#[must_use]
pub fn find_assignment(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;

    for (index, &byte) in bytes.iter().enumerate() {
        match quote {
            Some(open) if byte == open => quote = None,
            Some(_) => {},
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None if byte == b'=' => {
                let previous = index.checked_sub(1).map(|i| bytes[i]);
                let next = bytes.get(index + 1).copied();
                let joined_before = matches!(previous, Some(b'=' | b'!' | b'<' | b'>'));
                let joined_after = next == Some(b'=');
                if !joined_before && !joined_after {
                    return Some(index);
                }
            },
            None => {},
        }
    }

    None
}

/// Returns the text between a leading `(` and a trailing `)`.
///
/// # Example
/// ```
/// use relief::interpreter::parser::utils::parenthesized;
///
/// assert_eq!(parenthesized(" (x > 1) "), Some("x > 1"));
/// assert_eq!(parenthesized("x > 1"), None);
/// ```
#[must_use]
pub fn parenthesized(text: &str) -> Option<&str> {
    text.trim()
        .strip_prefix('(')?
        .strip_suffix(')')
}
