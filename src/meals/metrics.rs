use serde::Serialize;

use super::repo_types::MealRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_meals: usize,
    pub total_meals_on_diet: usize,
    pub total_meals_out_of_diet: usize,
    /// Longest chronological run of meals sharing the same diet flag.
    pub total_meals_of_sequence: usize,
}

/// Summarises one user's meals. The input order does not matter except
/// among meals with identical timestamps, which keep their relative order.
pub fn compute_metrics(meals: &[MealRecord]) -> MetricsSummary {
    let total_meals_on_diet = meals.iter().filter(|m| m.is_diet == Some(true)).count();
    let total_meals_out_of_diet = meals.iter().filter(|m| m.is_diet == Some(false)).count();

    MetricsSummary {
        total_meals: meals.len(),
        total_meals_on_diet,
        total_meals_out_of_diet,
        total_meals_of_sequence: longest_streak(&chronological(meals)),
    }
}

/// Stable sort on the raw timestamp string; the fixed zero-padded format
/// makes lexical and chronological order agree.
fn chronological(meals: &[MealRecord]) -> Vec<&MealRecord> {
    let mut ordered: Vec<&MealRecord> = meals.iter().collect();
    ordered.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));
    ordered
}

fn longest_streak(ordered: &[&MealRecord]) -> usize {
    if ordered.is_empty() {
        return 0;
    }

    let mut current = 1;
    let mut best = 1;
    for pair in ordered.windows(2) {
        if pair[0].is_diet == pair[1].is_diet {
            current += 1;
        } else {
            best = best.max(current);
            current = 1;
        }
    }
    best.max(current)
}
