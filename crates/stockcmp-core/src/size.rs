//! Sheet size description → two-character vendor size code.

/// Known sheet sizes in inches and their vendor size codes.
pub const SIZE_CODES: [(&str, &str); 36] = [
    ("48 X 96", "C1"),
    ("60 X 144", "D3"),
    ("60 X 120", "D2"),
    ("48 X 120", "C2"),
    ("60 X 96", "D1"),
    ("48 X 144", "C3"),
    ("30 X 144", "A3"),
    ("36 X 96", "B1"),
    ("30 X 120", "A2"),
    ("36 X 144", "B3"),
    ("30 X 96", "A1"),
    ("36 X 120", "B2"),
    ("36 X 84", "B7"),
    ("48 X 84", "C7"),
    ("60 X 84", "D7"),
    ("60 X 72", "D6"),
    ("60 X 60", "D5"),
    ("48 X 48", "C4"),
    ("48 X 72", "C6"),
    ("30 X 72", "A6"),
    ("30 X 48", "A4"),
    ("48 X 60", "C5"),
    ("30 X 60", "A5"),
    ("36 X 72", "B6"),
    ("36 X 48", "B4"),
    ("60 X 48", "D4"),
    ("36 X 60", "B5"),
    ("24 X 48", "E4"),
    ("24 X 72", "E6"),
    ("24 X 60", "E5"),
    ("24 X 96", "E1"),
    ("24 X 120", "E2"),
    ("24 X 144", "E3"),
    ("49 X 97", "F1"),
    ("30 X 84", "A7"),
    ("36 X 108", "B9"),
];

/// Puts single spaces around every `X` and collapses whitespace.
///
/// `"48X96"` and `" 48  X 96"` both become `"48 X 96"`. Expects input that
/// has already been upper-cased by catalog normalization.
#[must_use]
pub fn canonicalize_size_description(description: &str) -> String {
    description
        .replace('X', " X ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks up the size code for a description, canonicalizing it first.
///
/// Unknown sizes return `None`; that is a data gap, not an error.
#[must_use]
pub fn size_code(description: &str) -> Option<&'static str> {
    let canonical = canonicalize_size_description(description);
    SIZE_CODES
        .iter()
        .find(|(desc, _)| *desc == canonical)
        .map(|(_, code)| *code)
}
