use anyhow::Result;
use clap::Parser;
use clsieve::{
    classifier::RelevanceRules,
    config::{Cli, Config},
    crawler::Crawler,
    fetcher::{Fetcher, USER_AGENTS},
    notifier::SmtpNotifier,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_tracing(config.verbose());

    let fetcher = Fetcher::new(USER_AGENTS)?;
    info!("identifying as {}", fetcher.user_agent());

    let mut crawler = Crawler::new(config.target().clone(), fetcher, RelevanceRules::default());
    if let Some(mail) = config.mail() {
        crawler = crawler.with_notifier(Box::new(SmtpNotifier::new(mail)?));
    }

    crawler.run().await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,clsieve={}", level)))
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .init();
}
