use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One search-result entry exactly as the API returns it. The nested
/// objects are kept as raw JSON because the API may send `null` (or any
/// other shape) where an object is documented.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVacancy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub salary: Value,
    #[serde(default)]
    pub schedule: Value,
    #[serde(default)]
    pub area: Value,
    #[serde(default)]
    pub accept_temporary: Option<bool>,
    pub published_at: String,
}

/// Flat vacancy record after normalization. Derives `Eq + Hash` so the
/// refiner can merge rows that are identical across every column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vacancy {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub schedule: Option<String>,
    pub accept_temporary: Option<bool>,
    pub published_at: String,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub currency: Option<String>,
}

/// Vacancy after currency filtering, dedup and salary derivation. The
/// bound and currency columns are gone; `salary_mean` is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedVacancy {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub schedule: Option<String>,
    pub accept_temporary: Option<bool>,
    pub published_at: String,
    pub salary_mean: i64,
}

/// Terminal record shape, written to the CSV sink. Field order here is
/// the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedVacancy {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub schedule: Option<String>,
    pub accept_temporary: Option<bool>,
    pub published_at: String,
    pub salary_mean: i64,
    #[serde(serialize_with = "skills_as_list_literal")]
    pub skills: Vec<String>,
    pub experience: String,
    pub professional_role: String,
    pub employer: String,
    pub employer_trusted: bool,
    pub alternate_url: String,
}

/// A vacancy that could not be enriched: the detail call failed or the
/// response was missing a required field. Reported, never written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichFailure {
    pub id: String,
    pub reason: String,
}

impl std::fmt::Display for EnrichFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vacancy {}: {}", self.id, self.reason)
    }
}

/// Renders the skill list as a single bracketed cell, e.g. `["sql","etl"]`,
/// so the list survives the flat CSV row.
fn skills_as_list_literal<S>(skills: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rendered = serde_json::to_string(skills).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&rendered)
}
