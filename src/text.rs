//! Text helpers for matching Spanish labels
//!
//! Keys from spreadsheets and callers arrive with mixed case and accents.

/// Trim, lowercase and strip Spanish accents (`"Índice Glucémico"` to
/// `"indice glucemico"`)
pub fn fold_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_key() {
        assert_eq!(fold_key("  Índice Glucémico "), "indice glucemico");
        assert_eq!(fold_key("NATACIÓN"), "natacion");
        assert_eq!(fold_key("Año"), "ano");
        assert_eq!(fold_key(""), "");
    }
}
