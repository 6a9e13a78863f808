//! Name ordering for client and dog listings.
//!
//! Approximates a pt-BR locale comparison: case and Latin diacritics are
//! ignored at the primary level, and the raw strings break ties so the order
//! is total and deterministic.

use std::cmp::Ordering;

/// Compares two display names the way listings should order them.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercases and strips Latin diacritics for primary-level comparison.
pub fn fold_name(value: &str) -> String {
    value
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_names, fold_name};
    use std::cmp::Ordering;

    #[test]
    fn fold_removes_case_and_accents() {
        assert_eq!(fold_name("  Álvaro Conceição "), "alvaro conceicao");
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut names = vec!["Zeca", "Érica", "ana", "Bruno", "Eduardo"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["ana", "Bruno", "Eduardo", "Érica", "Zeca"]);
    }

    #[test]
    fn equal_fold_still_orders_deterministically() {
        assert_ne!(compare_names("Ana", "ana"), Ordering::Equal);
        assert_eq!(compare_names("Rex", "Rex"), Ordering::Equal);
    }
}
