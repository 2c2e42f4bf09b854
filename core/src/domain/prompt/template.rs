use crate::domain::menu_analysis::value_objects::Preferences;

pub const DEFAULT_DIETARY: &str = "none";
pub const DEFAULT_BUDGET: &str = "no limit";
pub const DEFAULT_MOOD: &str = "anything good";

/// Renders the menu analysis instruction for `preferences`.
///
/// The reply format is spelled out in full because nothing else constrains
/// the model's output.
pub fn build_prompt(preferences: &Preferences) -> String {
    let dietary = preferences.dietary().unwrap_or(DEFAULT_DIETARY);
    let budget = preferences
        .budget()
        .map(|amount| format!("${amount}"))
        .unwrap_or_else(|| DEFAULT_BUDGET.to_string());
    let mood = preferences.mood().unwrap_or(DEFAULT_MOOD);

    format!(
        r#"You are a helpful restaurant menu analyzer.

Read the menu in this image and recommend dishes for a diner with these preferences:
- Dietary restrictions: {dietary}
- Budget: {budget}
- Craving/mood: {mood}

Give 2-3 recommendations. For each one include:
1. The dish name and its price as printed on the menu
2. Why it fits the preferences above
3. Warnings worth knowing (allergens, spice level, etc.), or an empty string
4. A value score from 1 to 10 as an integer

Reply with raw JSON only, without markdown or code blocks, in exactly this shape:
{{
  "recommendations": [
    {{
      "dish": "dish name",
      "price": "12.99",
      "reasoning": "explanation",
      "warnings": "concerns, or empty",
      "valueScore": 8
    }}
  ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_every_specified_preference() {
        let prompt = build_prompt(&Preferences::new("vegetarian", "20", "spicy"));

        assert!(prompt.contains("- Dietary restrictions: vegetarian\n"));
        assert!(prompt.contains("- Budget: $20\n"));
        assert!(prompt.contains("- Craving/mood: spicy\n"));
    }

    #[test]
    fn falls_back_to_defaults_for_each_empty_field() {
        let cases = [
            (("", "", ""), ("none", "no limit", "anything good")),
            (("vegan", "", ""), ("vegan", "no limit", "anything good")),
            (("", "15", ""), ("none", "$15", "anything good")),
            (("", "", "noodles"), ("none", "no limit", "noodles")),
            (("", "40", "seafood"), ("none", "$40", "seafood")),
            (("gluten-free", "", "comfort food"), ("gluten-free", "no limit", "comfort food")),
            (("halal", "25", ""), ("halal", "$25", "anything good")),
        ];

        for ((dietary, budget, mood), (want_dietary, want_budget, want_mood)) in cases {
            let prompt = build_prompt(&Preferences::new(dietary, budget, mood));

            assert!(
                prompt.contains(&format!("- Dietary restrictions: {want_dietary}\n")),
                "dietary for {dietary:?}"
            );
            assert!(
                prompt.contains(&format!("- Budget: {want_budget}\n")),
                "budget for {budget:?}"
            );
            assert!(
                prompt.contains(&format!("- Craving/mood: {want_mood}\n")),
                "mood for {mood:?}"
            );
        }
    }

    #[test]
    fn does_not_double_the_currency_sign() {
        let prompt = build_prompt(&Preferences::new("", "$30", ""));

        assert!(prompt.contains("- Budget: $30\n"));
        assert!(!prompt.contains("$$"));
    }

    #[test]
    fn mandates_the_reply_format() {
        let prompt = build_prompt(&Preferences::default());

        assert!(prompt.contains("2-3 recommendations"));
        assert!(prompt.contains("without markdown"));
        assert!(prompt.contains(r#""valueScore": 8"#));
        assert!(prompt.contains(r#""recommendations": ["#));
    }

    #[test]
    fn is_deterministic() {
        let prefs = Preferences::new("kosher", "50", "steak");

        assert_eq!(build_prompt(&prefs), build_prompt(&prefs));
    }
}
