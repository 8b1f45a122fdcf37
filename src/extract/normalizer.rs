/// Characters that survive normalization besides ASCII letters and digits.
const KEPT_PUNCTUATION: &[char] = &[
    '\'', '/', '\\', ',', '(', ')', '[', ']', '{', '}', '.', '-',
];

/// Fold case and drop every character outside the allow-list.
///
/// Case is folded through uppercase first so characters that only reach ASCII
/// when uppercased ("ß" to "SS", "ı" to "I") normalize the same in either
/// case. Whitespace is not on the list, so "New York" and "Newyork" normalize
/// to the same string and all matching happens on the concatenated form.
pub fn normalize(input: &str) -> String {
    input
        .to_uppercase()
        .to_lowercase()
        .chars()
        .filter(|c| is_kept(*c))
        .collect()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || KEPT_PUNCTUATION.contains(&c)
}
