use crate::models::{RawVacancy, Vacancy};
use serde_json::Value;

/// Projects raw search items onto the flat vacancy columns. Total: every
/// item yields exactly one record, nested objects of unexpected shape
/// just leave their columns empty.
pub fn normalize(items: Vec<RawVacancy>) -> Vec<Vacancy> {
    items.into_iter().map(flatten).collect()
}

fn flatten(item: RawVacancy) -> Vacancy {
    Vacancy {
        city: nested_str(&item.area, "name"),
        schedule: nested_str(&item.schedule, "id"),
        salary_from: nested_i64(&item.salary, "from"),
        salary_to: nested_i64(&item.salary, "to"),
        currency: nested_str(&item.salary, "currency"),
        id: item.id,
        name: item.name,
        accept_temporary: item.accept_temporary,
        published_at: item.published_at,
    }
}

/// Sub-key lookup that only succeeds when the value really is an object.
fn nested_str(value: &Value, key: &str) -> Option<String> {
    value.as_object()?.get(key)?.as_str().map(str::to_string)
}

fn nested_i64(value: &Value, key: &str) -> Option<i64> {
    value.as_object()?.get(key)?.as_i64()
}
