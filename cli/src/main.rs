use dotenv::dotenv;
use salary_stats::hh::{HhClient, HhConfig};
use salary_stats::report::stats_table;
use salary_stats::superjob::{SuperJobClient, SuperJobConfig};
use salary_stats::{collect_stats, Error};

const LANGUAGES: [&str; 11] = [
    "JavaScript",
    "Java",
    "Python",
    "Ruby",
    "PHP",
    "C++",
    "C#",
    "C",
    "Go",
    "TypeScript",
    "Rust",
];

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    env_logger::init();
    let api_key =
        std::env::var("SJ_SECRET_KEY").map_err(|_| Error::MissingConfig("SJ_SECRET_KEY"))?;

    log::info!("collecting salary stats for {} languages", LANGUAGES.len());
    let hh = HhClient::new(HhConfig::default());
    let hh_stats = collect_stats(&hh, &LANGUAGES).await?;

    let superjob = SuperJobClient::new(SuperJobConfig::new(api_key));
    let superjob_stats = collect_stats(&superjob, &LANGUAGES).await?;

    println!("{}", stats_table("HeadHunter Moscow", &hh_stats));
    println!();
    println!("{}", stats_table("SuperJob Moscow", &superjob_stats));
    Ok(())
}
