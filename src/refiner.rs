use crate::models::{RefinedVacancy, Vacancy};
use std::collections::HashSet;

/// Filters, deduplicates and derives the representative salary.
///
/// Steps, in order: keep only records in the accepted currency, merge rows
/// that are identical across every column, impute a missing bound from the
/// other one, drop rows where both bounds were absent, and compute
/// `salary_mean = round((from + to) / 2)`.
///
/// An empty result is valid output.
pub fn refine(vacancies: Vec<Vacancy>, accepted_currency: &str) -> Vec<RefinedVacancy> {
    let mut seen = HashSet::new();

    vacancies
        .into_iter()
        .filter(|v| v.currency.as_deref() == Some(accepted_currency))
        .filter(|v| seen.insert(v.clone()))
        .filter_map(derive_salary)
        .collect()
}

fn derive_salary(vacancy: Vacancy) -> Option<RefinedVacancy> {
    let from = vacancy.salary_from.or(vacancy.salary_to)?;
    let to = vacancy.salary_to.unwrap_or(from);

    Some(RefinedVacancy {
        id: vacancy.id,
        name: vacancy.name,
        city: vacancy.city,
        schedule: vacancy.schedule,
        accept_temporary: vacancy.accept_temporary,
        published_at: vacancy.published_at,
        salary_mean: mean_salary(from, to),
    })
}

/// Rounds halves away from zero, i.e. half-up for the positive salaries
/// this pipeline handles.
fn mean_salary(from: i64, to: i64) -> i64 {
    ((from + to) as f64 / 2.0).round() as i64
}
