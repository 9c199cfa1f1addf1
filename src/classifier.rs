use regex::{Regex, RegexBuilder};

use crate::extractor::ListingRecord;

pub const KEYWORD_PATTERN: &str =
    r"mysql|database|ETL|aws|ec2|s3| rds |automate|devops|linux|php|python|web developer|web dev";
pub const TITLE_EXCLUSION_PATTERN: &str = r"java|junior|jr|entry level|oracle|ruby|manager";
// `.net` matches any character followed by "net"
pub const DESCRIPTION_EXCLUSION_PATTERN: &str = r"equity|entry level|pro bono|.net|helpdesk|java";

/// Outcome of each rule against one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub keyword_matched: bool,
    pub title_excluded: bool,
    pub description_excluded: bool,
}

impl Verdict {
    pub fn is_interesting(&self) -> bool {
        self.keyword_matched && !self.title_excluded && !self.description_excluded
    }
}

/// The three case-insensitive patterns that decide whether a listing is
/// worth reporting.
#[derive(Debug, Clone)]
pub struct RelevanceRules {
    keywords: Regex,
    title_exclusions: Regex,
    description_exclusions: Regex,
}

impl RelevanceRules {
    pub fn new(
        keywords: &str,
        title_exclusions: &str,
        description_exclusions: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            keywords: case_insensitive(keywords)?,
            title_exclusions: case_insensitive(title_exclusions)?,
            description_exclusions: case_insensitive(description_exclusions)?,
        })
    }

    pub fn evaluate(&self, record: &ListingRecord) -> Verdict {
        Verdict {
            keyword_matched: self.keywords.is_match(&record.description_text),
            title_excluded: self.title_exclusions.is_match(&record.title),
            description_excluded: self.description_exclusions.is_match(&record.description_text),
        }
    }

    pub fn is_interesting(&self, record: &ListingRecord) -> bool {
        self.evaluate(record).is_interesting()
    }
}

impl Default for RelevanceRules {
    fn default() -> Self {
        Self::new(
            KEYWORD_PATTERN,
            TITLE_EXCLUSION_PATTERN,
            DESCRIPTION_EXCLUSION_PATTERN,
        )
        .expect("built-in relevance patterns must compile")
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
