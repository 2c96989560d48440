use crate::models::RawVacancy;
use crate::utils::random_delay;
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

const PER_PAGE: usize = 100;
const CALL_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: usize = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct HhCrawlConfig {
    /// Search keywords, issued in order. `AND` inside a keyword is the
    /// upstream service's own boolean combinator and passes through
    /// verbatim.
    pub keywords: Vec<String>,
    /// Upper bound on pages fetched per keyword.
    pub pages_per_keyword: usize,
}

impl Default for HhCrawlConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            pages_per_keyword: 1,
        }
    }
}

/// One page of the search response. `items` is optional: the API can
/// answer without it and that simply ends the keyword's result stream.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Option<Vec<RawVacancy>>,
    #[serde(default)]
    pub pages: Option<usize>,
}

pub struct HhClient {
    base_url: String,
    config: HhCrawlConfig,
}

impl HhClient {
    pub fn new(config: HhCrawlConfig) -> Self {
        Self {
            base_url: "https://api.hh.ru/vacancies".to_string(),
            config,
        }
    }

    pub fn start_crawl(&self) -> Result<Vec<RawVacancy>> {
        let http = self
            .create_http()
            .inspect_err(|e| eprintln!("❌ failed to build http client: {}", e))?;

        println!("collecting vacancies for {} keywords..", self.config.keywords.len());

        let mut items = Vec::new();
        for keyword in &self.config.keywords {
            println!("collecting <{}>", keyword);
            let collected = self.fetch_keyword(&http, keyword)?;
            println!("<{}>: {} postings, {} total", keyword, collected.len(), items.len() + collected.len());
            items.extend(collected);
        }

        println!("✅ collected {} raw postings", items.len());
        Ok(items)
    }

    fn create_http(&self) -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .map_err(Into::into)
    }

    /// Walks pages `0..pages_per_keyword` for one keyword. A page without
    /// items ends the keyword early, as does reaching the page count the
    /// API reports for the query.
    fn fetch_keyword(&self, http: &reqwest::blocking::Client, keyword: &str) -> Result<Vec<RawVacancy>> {
        let mut collected = Vec::new();

        for page in 0..self.config.pages_per_keyword {
            let search_page = self.fetch_page_with_retry(http, keyword, page)?;

            match search_page.items {
                Some(batch) if !batch.is_empty() => collected.extend(batch),
                _ => break,
            }

            if let Some(total_pages) = search_page.pages {
                if page + 1 >= total_pages {
                    break;
                }
            }

            random_delay();
        }

        Ok(collected)
    }

    fn fetch_page_with_retry(
        &self,
        http: &reqwest::blocking::Client,
        keyword: &str,
        page: usize,
    ) -> Result<SearchPage> {
        let mut delay = RETRY_BASE_DELAY;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.fetch_page(http, keyword, page) {
                Ok(search_page) => return Ok(search_page),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    eprintln!("page {} of <{}> failed (attempt {}): {}", page, keyword, attempt, e);
                    std::thread::sleep(delay);
                    delay *= 2;
                }
                Err(e) => {
                    eprintln!("❌ page {} of <{}> failed after {} attempts", page, keyword, MAX_ATTEMPTS);
                    return Err(e);
                }
            }
        }

        unreachable!("retry loop always returns")
    }

    fn fetch_page(&self, http: &reqwest::blocking::Client, keyword: &str, page: usize) -> Result<SearchPage> {
        let page_param = page.to_string();
        let per_page_param = PER_PAGE.to_string();
        let response = http
            .get(&self.base_url)
            .query(&[
                ("text", keyword),
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
                ("only_with_salary", "true"),
            ])
            .send()?
            .error_for_status()?;

        response.json().map_err(Into::into)
    }
}
