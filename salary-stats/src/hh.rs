use crate::salary::estimate;
use crate::{Error, LanguageStat, LanguageStatsProvider, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const USER_AGENT: &str = "Chrome/51.0.2704.103";

#[derive(Debug, Clone)]
pub struct HhConfig {
    pub base_url: String,
    /// HeadHunter area id, 1 is Moscow.
    pub area: u32,
    /// Only listings posted within this many days.
    pub period_days: u32,
}

impl Default for HhConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru/vacancies/".to_owned(),
            area: 1,
            period_days: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Salary {
    from: Option<f64>,
    to: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Vacancy {
    salary: Option<Salary>,
}

impl Vacancy {
    /// Estimate in rubles, None for unpriced or non-RUR listings.
    fn rub_estimate(&self) -> Option<f64> {
        let salary = self.salary.as_ref()?;
        if salary.currency.as_deref() != Some("RUR") {
            return None;
        }
        estimate(salary.from, salary.to)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SearchPage {
    found: u64,
    pages: u32,
    items: Vec<Vacancy>,
}

#[async_trait]
trait PageSource {
    async fn search_page(&self, language: &str, page: u32) -> Result<SearchPage>;
}

/// Walk every page for one language and fold the priced listings into a
/// stat. Termination is page-count driven: the server reports how many
/// pages the query has, and the walk stops after requesting the last index.
async fn aggregate<S: PageSource>(source: &S, language: &str) -> Result<LanguageStat> {
    let mut estimates = Vec::new();
    let mut page = 0;
    loop {
        let resp = source.search_page(language, page).await?;
        estimates.extend(resp.items.iter().filter_map(Vacancy::rub_estimate));
        if page + 1 >= resp.pages {
            return Ok(LanguageStat::from_estimates(resp.found, &estimates));
        }
        page += 1;
    }
}

pub struct HhClient {
    client: Client,
    config: HhConfig,
}

impl HhClient {
    pub fn new(config: HhConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PageSource for HhClient {
    async fn search_page(&self, language: &str, page: u32) -> Result<SearchPage> {
        log::debug!("requesting hh vacancies, language: {}, page: {}", language, page);
        let resp = self
            .client
            .get(&self.config.base_url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("area", self.config.area.to_string()),
                ("period", self.config.period_days.to_string()),
                ("text", format!("Программист {}", language)),
                ("page", page.to_string()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            log::error!(
                "hh request not successful, status: {}, language: {}, page: {}",
                status,
                language,
                page
            );
            return Err(Error::RequestNotOk {
                url: self.config.base_url.clone(),
                status,
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl LanguageStatsProvider for HhClient {
    async fn language_stat(&self, language: &str) -> Result<LanguageStat> {
        aggregate(self, language).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;

    struct FakeSource {
        pages: Vec<SearchPage>,
        requests: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(pages: Vec<SearchPage>) -> Self {
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn search_page(&self, _language: &str, page: u32) -> Result<SearchPage> {
            self.requests.lock().unwrap().push(page);
            Ok(self.pages[page as usize].clone())
        }
    }

    fn priced(from: Option<f64>, to: Option<f64>, currency: &str) -> Vacancy {
        Vacancy {
            salary: Some(Salary {
                from,
                to,
                currency: Some(currency.to_owned()),
            }),
        }
    }

    fn unpriced() -> Vacancy {
        Vacancy { salary: None }
    }

    #[tokio::test]
    async fn two_page_search_is_fetched_exactly_twice() {
        let source = FakeSource::new(vec![
            SearchPage {
                found: 2,
                pages: 2,
                items: vec![priced(Some(1000.0), Some(2000.0), "RUR"), unpriced()],
            },
            SearchPage {
                found: 2,
                pages: 2,
                items: vec![],
            },
        ]);
        let stat = aggregate(&source, "Python").await.unwrap();
        assert_eq!(*source.requests.lock().unwrap(), vec![0, 1]);
        assert_eq!(stat.vacancies_found, 2);
        assert_eq!(stat.vacancies_processed, 1);
        assert_eq!(stat.average_salary, 1500);
    }

    #[tokio::test]
    async fn single_page_search_stops_after_one_request() {
        let source = FakeSource::new(vec![SearchPage {
            found: 1,
            pages: 1,
            items: vec![priced(Some(100_000.0), None, "RUR")],
        }]);
        let stat = aggregate(&source, "Go").await.unwrap();
        assert_eq!(source.requests.lock().unwrap().len(), 1);
        assert_eq!(stat.average_salary, 120_000);
    }

    #[tokio::test]
    async fn non_rub_listings_are_skipped_but_still_counted_as_found() {
        let source = FakeSource::new(vec![SearchPage {
            found: 3,
            pages: 1,
            items: vec![
                priced(Some(1000.0), Some(2000.0), "RUR"),
                priced(Some(5000.0), Some(6000.0), "USD"),
                unpriced(),
            ],
        }]);
        let stat = aggregate(&source, "Rust").await.unwrap();
        assert_eq!(stat.vacancies_found, 3);
        assert_eq!(stat.vacancies_processed, 1);
        assert_eq!(stat.average_salary, 1500);
    }

    #[tokio::test]
    async fn language_without_priced_listings_averages_to_zero() {
        let source = FakeSource::new(vec![SearchPage {
            found: 4,
            pages: 1,
            items: vec![unpriced(), priced(None, None, "RUR")],
        }]);
        let stat = aggregate(&source, "Ruby").await.unwrap();
        assert_eq!(stat.vacancies_processed, 0);
        assert_eq!(stat.average_salary, 0);
    }

    #[test]
    fn search_page_deserializes_nested_and_null_salaries() {
        let body = r#"{
            "found": 25,
            "pages": 2,
            "per_page": 20,
            "items": [
                {"id": "1", "salary": {"from": 100000, "to": null, "currency": "RUR", "gross": true}},
                {"id": "2", "salary": null}
            ]
        }"#;
        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.found, 25);
        assert_eq!(page.pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].rub_estimate(), Some(120_000.0));
        assert_eq!(page.items[1].rub_estimate(), None);
    }
}
