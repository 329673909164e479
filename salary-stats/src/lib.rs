pub mod hh;
pub mod report;
pub mod salary;
pub mod superjob;

use async_trait::async_trait;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request to '{url}' returned status {status}")]
    RequestNotOk {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Authorization rejected by '{0}', check the API key")]
    Unauthorized(&'static str),
    #[error("Missing configuration value: '{0}'")]
    MissingConfig(&'static str),
}

/// Aggregate salary stats for one language on one job board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStat {
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: u64,
}

impl LanguageStat {
    /// Build a stat from the server-reported match count and the estimates
    /// collected over a completed page traversal.
    pub(crate) fn from_estimates(vacancies_found: u64, estimates: &[f64]) -> Self {
        Self {
            vacancies_found,
            vacancies_processed: estimates.len() as u64,
            average_salary: salary::average(estimates),
        }
    }
}

/// A job board that can report aggregate salary stats for one language.
#[async_trait]
pub trait LanguageStatsProvider {
    async fn language_stat(&self, language: &str) -> Result<LanguageStat>;
}

/// Query the provider once per language, in list order, one request at a
/// time. The first failed language aborts the whole collection.
pub async fn collect_stats<P>(
    provider: &P,
    languages: &[&str],
) -> Result<Vec<(String, LanguageStat)>>
where
    P: LanguageStatsProvider,
{
    let mut stats = Vec::with_capacity(languages.len());
    for language in languages {
        let stat = provider.language_stat(language).await?;
        log::info!(
            "collected stats for {}: found {}, processed {}, average {}",
            language,
            stat.vacancies_found,
            stat.vacancies_processed,
            stat.average_salary
        );
        stats.push((language.to_string(), stat));
    }
    Ok(stats)
}
