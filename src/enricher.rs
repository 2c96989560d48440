use crate::models::{EnrichFailure, EnrichedVacancy, RefinedVacancy};
use crate::utils::random_delay;
use crate::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde_json::Value;
use std::time::Duration;

const CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct EnricherConfig {
    pub thread_count: usize,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self { thread_count: 1 }
    }
}

/// Successfully enriched vacancies plus the per-record failures. A failed
/// detail fetch never costs more than its own record.
#[derive(Debug)]
pub struct EnrichOutcome {
    pub enriched: Vec<EnrichedVacancy>,
    pub failures: Vec<EnrichFailure>,
}

/// Fetches the detail document for every vacancy and attaches skills,
/// experience, role, employer identity and the canonical posting URL.
pub struct DetailEnricher {
    base_url: String,
    config: EnricherConfig,
}

impl DetailEnricher {
    pub fn new(config: EnricherConfig) -> Self {
        Self {
            base_url: "https://api.hh.ru/vacancies".to_string(),
            config,
        }
    }

    pub fn start_enrich(&self, vacancies: &[RefinedVacancy]) -> Result<EnrichOutcome> {
        println!("\ncollecting details for {} vacancies..", vacancies.len());

        let http = self
            .create_http()
            .inspect_err(|e| eprintln!("❌ failed to build http client: {}", e))?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.thread_count)
            .build()?;

        // par_iter + collect keeps the refined order
        let results: Vec<_> = pool.install(|| {
            vacancies
                .par_iter()
                .map(|vacancy| self.enrich_one(&http, vacancy))
                .collect()
        });

        let mut enriched = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(vacancy) => enriched.push(vacancy),
                Err(failure) => {
                    eprintln!("❌ {}", failure);
                    failures.push(failure);
                }
            }
        }

        println!("✅ enriched {} vacancies, {} failed", enriched.len(), failures.len());
        Ok(EnrichOutcome { enriched, failures })
    }

    fn create_http(&self) -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .map_err(Into::into)
    }

    fn enrich_one(
        &self,
        http: &reqwest::blocking::Client,
        vacancy: &RefinedVacancy,
    ) -> std::result::Result<EnrichedVacancy, EnrichFailure> {
        let detail = self
            .fetch_detail(http, &vacancy.id)
            .map_err(|e| EnrichFailure {
                id: vacancy.id.clone(),
                reason: format!("detail request failed: {}", e),
            })?;

        random_delay();
        extract_detail(vacancy, &detail)
    }

    fn fetch_detail(&self, http: &reqwest::blocking::Client, id: &str) -> Result<Value> {
        let response = http
            .get(format!("{}/{}", self.base_url, id))
            .send()?
            .error_for_status()?;

        response.json().map_err(Into::into)
    }
}

/// Pulls the derived columns out of one detail document. Each required
/// field is checked individually so a failure can name what was missing.
pub fn extract_detail(
    vacancy: &RefinedVacancy,
    detail: &Value,
) -> std::result::Result<EnrichedVacancy, EnrichFailure> {
    let skills = detail
        .get("key_skills")
        .and_then(Value::as_array)
        .map(|skills| {
            skills
                .iter()
                .filter_map(|skill| skill.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let experience = required_str(detail, "/experience/name", &vacancy.id)?;
    let professional_role = required_str(detail, "/professional_roles/0/name", &vacancy.id)?;
    let employer = required_str(detail, "/employer/name", &vacancy.id)?;
    let employer_trusted = detail
        .pointer("/employer/trusted")
        .and_then(Value::as_bool)
        .ok_or_else(|| missing(&vacancy.id, "/employer/trusted"))?;
    let alternate_url = required_str(detail, "/alternate_url", &vacancy.id)?;

    Ok(EnrichedVacancy {
        id: vacancy.id.clone(),
        name: vacancy.name.clone(),
        city: vacancy.city.clone(),
        schedule: vacancy.schedule.clone(),
        accept_temporary: vacancy.accept_temporary,
        published_at: vacancy.published_at.clone(),
        salary_mean: vacancy.salary_mean,
        skills,
        experience,
        professional_role,
        employer,
        employer_trusted,
        alternate_url,
    })
}

fn required_str(detail: &Value, pointer: &str, id: &str) -> std::result::Result<String, EnrichFailure> {
    detail
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing(id, pointer))
}

fn missing(id: &str, pointer: &str) -> EnrichFailure {
    EnrichFailure {
        id: id.to_string(),
        reason: format!("missing field {}", pointer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refined(id: &str) -> RefinedVacancy {
        RefinedVacancy {
            id: id.to_string(),
            name: "ML Engineer".to_string(),
            city: Some("Москва".to_string()),
            schedule: Some("remote".to_string()),
            accept_temporary: Some(false),
            published_at: "2024-03-01T10:00:00+0300".to_string(),
            salary_mean: 250000,
        }
    }

    fn full_detail() -> Value {
        json!({
            "key_skills": [{"name": "Python"}, {"name": "SQL"}],
            "experience": {"id": "between1And3", "name": "От 1 года до 3 лет"},
            "professional_roles": [
                {"id": "165", "name": "Дата-сайентист"},
                {"id": "96", "name": "Программист, разработчик"}
            ],
            "employer": {"id": "42", "name": "Yandex", "trusted": true},
            "alternate_url": "https://hh.ru/vacancy/101"
        })
    }

    #[test]
    fn extracts_all_derived_columns() {
        let enriched = extract_detail(&refined("101"), &full_detail()).unwrap();
        assert_eq!(enriched.skills, vec!["Python", "SQL"]);
        assert_eq!(enriched.experience, "От 1 года до 3 лет");
        // only the first listed role
        assert_eq!(enriched.professional_role, "Дата-сайентист");
        assert_eq!(enriched.employer, "Yandex");
        assert!(enriched.employer_trusted);
        assert_eq!(enriched.alternate_url, "https://hh.ru/vacancy/101");
        assert_eq!(enriched.salary_mean, 250000);
    }

    #[test]
    fn absent_key_skills_yield_an_empty_list() {
        let mut detail = full_detail();
        detail.as_object_mut().unwrap().remove("key_skills");
        let enriched = extract_detail(&refined("101"), &detail).unwrap();
        assert!(enriched.skills.is_empty());
    }

    #[test]
    fn missing_experience_is_a_named_failure() {
        let mut detail = full_detail();
        detail.as_object_mut().unwrap().remove("experience");
        let failure = extract_detail(&refined("101"), &detail).unwrap_err();
        assert_eq!(failure.id, "101");
        assert!(failure.reason.contains("/experience/name"));
    }

    #[test]
    fn empty_professional_roles_is_a_named_failure() {
        let mut detail = full_detail();
        detail["professional_roles"] = json!([]);
        let failure = extract_detail(&refined("101"), &detail).unwrap_err();
        assert!(failure.reason.contains("/professional_roles/0/name"));
    }

    #[test]
    fn one_bad_record_does_not_poison_the_rest() {
        let mut broken = full_detail();
        broken.as_object_mut().unwrap().remove("employer");

        let details = [full_detail(), broken, full_detail()];
        let vacancies = [refined("1"), refined("2"), refined("3")];

        let mut enriched = Vec::new();
        let mut failures = Vec::new();
        for (vacancy, detail) in vacancies.iter().zip(&details) {
            match extract_detail(vacancy, detail) {
                Ok(v) => enriched.push(v),
                Err(f) => failures.push(f),
            }
        }

        assert_eq!(enriched.len(), 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "2");
    }
}
