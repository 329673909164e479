use crate::salary::estimate;
use crate::{Error, LanguageStat, LanguageStatsProvider, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const APP_ID_HEADER: &str = "X-Api-App-Id";

#[derive(Debug, Clone)]
pub struct SuperJobConfig {
    pub base_url: String,
    /// SuperJob town id, 4 is Moscow.
    pub town: u32,
    /// Catalogue 48 restricts the search to programming jobs.
    pub catalogue: u32,
    /// Application key, rejected requests surface as `Error::Unauthorized`.
    pub api_key: String,
}

impl SuperJobConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: "https://api.superjob.ru/2.0/vacancies/".to_owned(),
            town: 4,
            catalogue: 48,
            api_key,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Vacancy {
    payment_from: f64,
    payment_to: f64,
    currency: String,
}

impl Vacancy {
    /// Estimate in rubles, None for unpriced or non-rub listings.
    /// SuperJob reports a missing bound as 0 rather than null.
    fn rub_estimate(&self) -> Option<f64> {
        if self.currency != "rub" {
            return None;
        }
        let from = (self.payment_from > 0.0).then_some(self.payment_from);
        let to = (self.payment_to > 0.0).then_some(self.payment_to);
        estimate(from, to)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SearchPage {
    total: u64,
    more: bool,
    objects: Vec<Vacancy>,
}

#[async_trait]
trait PageSource {
    async fn search_page(&self, language: &str, page: u32) -> Result<SearchPage>;
}

/// Walk every page for one language and fold the priced listings into a
/// stat. Termination is flag driven: each page reports whether more pages
/// remain, and the walk stops after processing the first page that says no.
async fn aggregate<S: PageSource>(source: &S, language: &str) -> Result<LanguageStat> {
    let mut estimates = Vec::new();
    let mut page = 0;
    loop {
        let resp = source.search_page(language, page).await?;
        estimates.extend(resp.objects.iter().filter_map(Vacancy::rub_estimate));
        if !resp.more {
            return Ok(LanguageStat::from_estimates(resp.total, &estimates));
        }
        page += 1;
    }
}

pub struct SuperJobClient {
    client: Client,
    config: SuperJobConfig,
}

impl SuperJobClient {
    pub fn new(config: SuperJobConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PageSource for SuperJobClient {
    async fn search_page(&self, language: &str, page: u32) -> Result<SearchPage> {
        log::debug!(
            "requesting superjob vacancies, language: {}, page: {}",
            language,
            page
        );
        let resp = self
            .client
            .get(&self.config.base_url)
            .header(APP_ID_HEADER, &self.config.api_key)
            .query(&[
                ("town", self.config.town.to_string()),
                ("catalogues", self.config.catalogue.to_string()),
                ("keyword", format!("Программист {}", language)),
                ("page", page.to_string()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::error!("superjob rejected the application key, status: {}", status);
            return Err(Error::Unauthorized("superjob"));
        }
        if !status.is_success() {
            log::error!(
                "superjob request not successful, status: {}, language: {}, page: {}",
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
impl LanguageStatsProvider for SuperJobClient {
    async fn language_stat(&self, language: &str) -> Result<LanguageStat> {
        aggregate(self, language).await
    }
}
