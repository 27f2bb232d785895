//! Statement line representation: raw text for display, normalized text
//! for vocabulary and similarity matching.

/// One line of extracted statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Trimmed original text, preserved for display and export.
    pub raw: String,
    /// Lowercased text with punctuation and grouping separators removed.
    /// Used only for matching; never shown to the user.
    pub norm: String,
}

impl Line {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let norm = normalize(&raw);
        Self { raw, norm }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Lowercase `text` and replace every non-alphanumeric run with a single
/// space, so `"WIRE TRANSFER FROM Acme, Corp."` and `"wire transfer from
/// acme corp"` normalize identically.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("WIRE TRANSFER FROM Acme, Corp."),
            "wire transfer from acme corp"
        );
    }

    #[test]
    fn test_normalize_drops_thousands_separators_and_symbols() {
        assert_eq!(normalize("Deposit $1,250.00"), "deposit 1 250 00");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  a -- b  "), "a b");
    }

    #[test]
    fn test_line_keeps_raw_for_display() {
        let line = Line::new("  05/02 WIRE TRANSFER FROM Acme Corp $500.00  ");
        assert_eq!(line.raw, "05/02 WIRE TRANSFER FROM Acme Corp $500.00");
        assert_eq!(line.norm, "05 02 wire transfer from acme corp 500 00");
    }
}
