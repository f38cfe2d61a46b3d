//! Identifier case conversion.
//!
//! Field keys and enum values are encoded through a [`CaseStyle`](crate::CaseStyle),
//! which delegates to the functions here. All of them first split the input
//! into words, so they accept any of the usual spellings.

/// Split an identifier into words.
///
/// Boundaries are `_`, `-`, `.`, whitespace, a lowercase-to-uppercase
/// transition (`fooBar`), and the last capital of an acronym run
/// (`HTTPServer` → `HTTP`, `Server`).
///
/// # Examples
/// ```
/// use mapgen_core::utils::split_words;
/// assert_eq!(split_words("fooBar_baz"), vec!["foo", "Bar", "baz"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// ```
pub fn split_words(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let bytes: Vec<(usize, char)> = s.char_indices().collect();
    let mut start: Option<usize> = None;

    for (i, &(pos, c)) in bytes.iter().enumerate() {
        if matches!(c, '_' | '-' | '.') || c.is_whitespace() {
            if let Some(st) = start.take() {
                words.push(&s[st..pos]);
            }
            continue;
        }

        let Some(st) = start else {
            start = Some(pos);
            continue;
        };

        let prev = bytes[i - 1].1;
        let next = bytes.get(i + 1).map(|&(_, n)| n);
        let lower_to_upper = c.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit());
        let acronym_end = c.is_uppercase()
            && prev.is_uppercase()
            && next.is_some_and(|n| n.is_lowercase());

        if lower_to_upper || acronym_end {
            words.push(&s[st..pos]);
            start = Some(pos);
        }
    }

    if let Some(st) = start {
        words.push(&s[st..]);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Convert to PascalCase.
///
/// # Examples
/// ```
/// use mapgen_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).into_iter().map(capitalize).collect()
}

/// Convert to camelCase.
///
/// # Examples
/// ```
/// use mapgen_core::utils::to_camel_case;
/// assert_eq!(to_camel_case("first_name"), "firstName");
/// assert_eq!(to_camel_case("FirstName"), "firstName");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, word) in split_words(s).into_iter().enumerate() {
        if i == 0 {
            result.push_str(&word.to_lowercase());
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// Convert to snake_case.
///
/// # Examples
/// ```
/// use mapgen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    join_lower(s, "_")
}

/// Convert to param-case (kebab-case).
pub fn to_param_case(s: &str) -> String {
    join_lower(s, "-")
}

fn join_lower(s: &str, separator: &str) -> String {
    split_words(s)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}
