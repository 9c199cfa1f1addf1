//! Runtime configuration.
//!
//! Everything comes from the command line; there is no config file and no
//! environment lookup. [`Config::from_cli`] applies the one cross-field rule
//! (mail delivery needs credentials) before any crawling starts.

use clap::Parser;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Classifieds sites searched on every run.
pub const DEFAULT_SITE_ROOTS: &[&str] = &[
    "http://denver.craigslist.org",
    "http://fortcollins.craigslist.org",
    "http://cosprings.craigslist.org",
    "http://boulder.craigslist.org",
];
/// Category pages checked on each site.
pub const DEFAULT_PAGES: &[&str] = &["cpg", "web", "tch", "sad", "sof", "eng"];
pub const DEFAULT_URL_PREFIX: &str = "/search/";
pub const DEFAULT_MAX_PER_PAGE: usize = 15;
pub const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";

/// Command-line surface.
#[derive(Parser, Debug, Clone)]
#[command(name = "clsieve")]
#[command(
    about = "Searches craigslist and can send posts that contain certain keywords to your gmail address."
)]
pub struct Cli {
    /// Do NOT delay http requests
    #[arg(short, long)]
    pub fast: bool,

    /// Send email of results
    #[arg(short, long)]
    pub email: bool,

    /// Gmail address
    #[arg(short, long)]
    pub gmail: Option<String>,

    /// Gmail password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Maximum results to process on each page
    #[arg(short, long, default_value_t = DEFAULT_MAX_PER_PAGE)]
    pub max: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The site/category matrix one run walks through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub site_roots: Vec<String>,
    pub pages: Vec<String>,
    pub url_prefix: String,
    pub max_per_page: usize,
    pub fast: bool,
}

impl CrawlTarget {
    pub fn new(site_roots: &[&str], pages: &[&str], max_per_page: usize, fast: bool) -> Self {
        Self {
            site_roots: site_roots.iter().map(|s| s.to_string()).collect(),
            pages: pages.iter().map(|s| s.to_string()).collect(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            max_per_page,
            fast,
        }
    }

    /// Search-result URL for one site root and category page.
    pub fn search_url(&self, site_root: &str, page: &str) -> String {
        format!("{}{}{}", site_root, self.url_prefix, page)
    }
}

impl Default for CrawlTarget {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_ROOTS, DEFAULT_PAGES, DEFAULT_MAX_PER_PAGE, false)
    }
}

/// Mail account used both as sender and recipient of match notifications.
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub address: String,
    pub password: String,
    pub relay: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("relay", &self.relay)
            .finish()
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    target: CrawlTarget,
    mail: Option<MailCredentials>,
    verbose: bool,
}

impl Config {
    pub fn new(target: CrawlTarget, mail: Option<MailCredentials>, verbose: bool) -> Self {
        Self {
            target,
            mail,
            verbose,
        }
    }

    /// Build from parsed arguments. Fails when `--email` is set without both
    /// `--gmail` and `--password`.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let target = CrawlTarget::new(DEFAULT_SITE_ROOTS, DEFAULT_PAGES, cli.max, cli.fast);

        let mail = if cli.email {
            match (cli.gmail, cli.password) {
                (Some(address), Some(password)) => Some(MailCredentials {
                    address,
                    password,
                    relay: DEFAULT_SMTP_RELAY.to_string(),
                }),
                _ => return Err(ConfigError::MissingCredentials),
            }
        } else {
            None
        };

        Ok(Self::new(target, mail, cli.verbose))
    }

    pub fn target(&self) -> &CrawlTarget {
        &self.target
    }
    /// Present only when notifications are enabled.
    pub fn mail(&self) -> Option<&MailCredentials> {
        self.mail.as_ref()
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Email delivery was requested without an address and password.
    MissingCredentials,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingCredentials => write!(
                f,
                "Gmail address and password arguments must be used to send email."
            ),
        }
    }
}

impl Error for ConfigError {}
