use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::repo_types::FoodItem;

pub const UNIT_PLACEHOLDER: &str = "piece(s)";

const PROTEINS: &[&str] = &["chicken", "beef", "pork", "fish", "tofu"];
const CARBS: &[&str] = &["pasta", "rice", "noodles"];
const FALLBACK_NAME: &str = "Mixed Ingredients Salad";
const IMAGE_CATEGORIES: &[&str] = &["bowl", "plate", "salad", "meal"];
const INSTRUCTIONS: [&str; 5] = [
    "Prepare all ingredients and set aside.",
    "Combine main ingredients in a large bowl.",
    "Mix well and season to taste.",
    "Cook on medium heat for 15-20 minutes if needed.",
    "Serve hot and enjoy your meal!",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub recipe_name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub image_ref: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// Distinct from field validation so callers can widen the candidate set
    /// and retry.
    #[error("at least one candidate item is required")]
    InsufficientInput,
}

/// Turns a non-empty candidate set into a recipe draft. The whole contract is
/// input shape to output shape, so a model-backed implementation can replace
/// the heuristic without touching callers.
pub trait RecipeGenerator: Send + Sync {
    fn generate(&self, candidates: &[FoodItem]) -> Result<RecipeDraft, SynthesisError>;
}

/// Word-list heuristic: a protein name leads, a carbohydrate name follows,
/// any match earns a "Bowl" suffix. Not a nutrition engine.
#[derive(Debug, Default, Clone)]
pub struct HeuristicGenerator;

impl RecipeGenerator for HeuristicGenerator {
    fn generate(&self, candidates: &[FoodItem]) -> Result<RecipeDraft, SynthesisError> {
        if candidates.is_empty() {
            return Err(SynthesisError::InsufficientInput);
        }

        let lowered: Vec<String> = candidates.iter().map(|c| c.name.to_lowercase()).collect();
        let protein = match_term(&lowered, PROTEINS);
        let carb = match_term(&lowered, CARBS);

        let recipe_name = if protein.is_none() && carb.is_none() {
            FALLBACK_NAME.to_string()
        } else {
            let mut parts = Vec::new();
            if let Some(p) = protein {
                parts.push(capitalize(p));
            }
            if let Some(c) = carb {
                parts.push(c.to_string());
            }
            parts.push("Bowl".to_string());
            parts.join(" ")
        };

        let ingredients = candidates
            .iter()
            .map(|c| Ingredient {
                name: c.name.clone(),
                quantity: c.quantity,
                unit: c.unit.clone().unwrap_or_else(|| UNIT_PLACEHOLDER.to_string()),
            })
            .collect();

        Ok(RecipeDraft {
            recipe_name,
            ingredients,
            instructions: INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
            image_ref: image_ref_for(candidates.len()),
        })
    }
}

/// First candidate (in input order) containing a vocabulary word wins.
fn match_term(lowered_names: &[String], vocab: &[&'static str]) -> Option<&'static str> {
    lowered_names.iter().find_map(|name| {
        vocab
            .iter()
            .copied()
            .find(|term| name.split_whitespace().any(|word| word == *term))
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Placeholder art, not content-addressed to the dish; the category cycles
/// with the candidate count so the choice stays deterministic.
fn image_ref_for(candidate_count: usize) -> String {
    let category = IMAGE_CATEGORIES[candidate_count % IMAGE_CATEGORIES.len()];
    format!("https://source.unsplash.com/featured/?food,{category}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn item(name: &str, quantity: f64, unit: Option<&str>) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            quantity,
            unit: unit.map(Into::into),
            category: None,
            expiry_date: date!(2025 - 06 - 01),
            receipt_id: None,
            consumed: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let err = HeuristicGenerator.generate(&[]).unwrap_err();
        assert_eq!(err, SynthesisError::InsufficientInput);
    }

    #[test]
    fn protein_and_carb_build_a_bowl() {
        let candidates = vec![item("Chicken Breast", 2.0, Some("lb")), item("Rice", 1.0, Some("cup"))];
        let draft = HeuristicGenerator.generate(&candidates).unwrap();

        assert!(draft.recipe_name.starts_with("Chicken"));
        assert!(draft.recipe_name.contains("rice"));
        assert!(draft.recipe_name.ends_with("Bowl"));

        assert_eq!(draft.ingredients.len(), 2);
        assert_eq!(draft.ingredients[0].name, "Chicken Breast");
        assert_eq!(draft.ingredients[0].quantity, 2.0);
        assert_eq!(draft.ingredients[0].unit, "lb");
        assert_eq!(draft.ingredients[1].quantity, 1.0);
        assert_eq!(draft.ingredients[1].unit, "cup");

        assert_eq!(draft.instructions.len(), 5);
    }

    #[test]
    fn protein_alone_still_earns_the_suffix() {
        let draft = HeuristicGenerator
            .generate(&[item("Tofu", 1.0, Some("block"))])
            .unwrap();
        assert_eq!(draft.recipe_name, "Tofu Bowl");
    }

    #[test]
    fn carb_alone_still_earns_the_suffix() {
        let draft = HeuristicGenerator
            .generate(&[item("Egg Noodles", 1.0, Some("bag"))])
            .unwrap();
        assert_eq!(draft.recipe_name, "noodles Bowl");
    }

    #[test]
    fn no_vocabulary_match_falls_back_to_salad() {
        let draft = HeuristicGenerator
            .generate(&[item("Kale", 1.0, Some("bunch"))])
            .unwrap();
        assert_eq!(draft.recipe_name, "Mixed Ingredients Salad");
        assert_eq!(draft.ingredients.len(), 1);
    }

    #[test]
    fn missing_unit_gets_the_placeholder() {
        let draft = HeuristicGenerator.generate(&[item("Apples", 5.0, None)]).unwrap();
        assert_eq!(draft.ingredients[0].unit, UNIT_PLACEHOLDER);
    }

    #[test]
    fn first_candidate_wins_the_protein_slot() {
        let candidates = vec![item("Beef Strips", 1.0, None), item("Chicken Thighs", 1.0, None)];
        let draft = HeuristicGenerator.generate(&candidates).unwrap();
        assert!(draft.recipe_name.starts_with("Beef"));
    }

    #[test]
    fn same_candidates_produce_the_same_draft() {
        let candidates = vec![item("Fish", 1.0, Some("fillet")), item("Pasta", 2.0, None)];
        let a = HeuristicGenerator.generate(&candidates).unwrap();
        let b = HeuristicGenerator.generate(&candidates).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn image_ref_comes_from_the_fixed_category_set() {
        let draft = HeuristicGenerator
            .generate(&[item("Kale", 1.0, None), item("Apples", 2.0, None)])
            .unwrap();
        assert!(IMAGE_CATEGORIES
            .iter()
            .any(|cat| draft.image_ref.ends_with(&format!("food,{cat}"))));
    }
}
