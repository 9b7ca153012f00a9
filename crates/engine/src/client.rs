// ABOUTME: The main Client struct driving full scrape runs over the configured journals.
// ABOUTME: Provides async scrape_all() / scrape_journal() plus an offline extract_issue_html().

use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::dedupe::dedupe;
use crate::error::ScrapeError;
use crate::extractors::listing::{listing_links, IssueLink};
use crate::extractors::router::{select_parser, ParserKind};
use crate::extractors::variants::extract_fields;
use crate::journals::{load_builtin_journals, Journal};
use crate::options::{ClientBuilder, Options};
use crate::record::{date_stamp, JournalResult, ScrapeRun, SpecialIssueRecord};
use crate::resource::{fetch, FetchOptions};

/// The scrape client. Holds the HTTP client and the journal list; one
/// instance drives any number of runs.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    journals: Vec<Journal>,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(opts.timeout)
                .user_agent(opts.user_agent.clone())
                .build()
                .unwrap_or_default()
        });
        let journals = opts.journals.clone().unwrap_or_else(load_builtin_journals);
        Self {
            opts,
            http_client,
            journals,
        }
    }

    /// The journals this client will scrape.
    pub fn journals(&self) -> &[Journal] {
        &self.journals
    }

    /// Scrape every configured journal and assemble the run artifact.
    ///
    /// Journal failures degrade to empty results; the run itself only fails
    /// if there are no journals configured at all.
    pub async fn scrape_all(&self) -> Result<ScrapeRun, ScrapeError> {
        if self.journals.is_empty() {
            return Err(ScrapeError::extract(
                "",
                "ScrapeAll",
                Some(anyhow::anyhow!("no journals configured")),
            ));
        }

        let mut run = ScrapeRun::new();
        for journal in &self.journals {
            run.journals.push(self.scrape_journal(journal).await);
        }
        Ok(run)
    }

    /// Scrape one journal: landing page, then each discovered detail page.
    ///
    /// Infallible by design. An unreachable landing page yields an empty
    /// result; an unreachable detail page yields a sentinel record.
    pub async fn scrape_journal(&self, journal: &Journal) -> JournalResult {
        info!(journal = %journal.name, url = %journal.url, "scraping journal");

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };

        let landing = match fetch(&self.http_client, &journal.url, &fetch_opts).await {
            Ok(res) => res,
            Err(e) => {
                warn!(journal = %journal.name, error = %e, "landing page unavailable");
                return JournalResult::empty(&journal.name, &journal.url);
            }
        };
        let Ok(base) = Url::parse(&landing.final_url) else {
            warn!(journal = %journal.name, "landing final URL unparseable");
            return JournalResult::empty(&journal.name, &journal.url);
        };
        let html = match landing.text_utf8(None) {
            Ok(html) => html,
            Err(e) => {
                warn!(journal = %journal.name, error = %e, "landing page undecodable");
                return JournalResult::empty(&journal.name, &journal.url);
            }
        };

        let links = {
            let doc = Html::parse_document(&html);
            listing_links(&doc, &base)
        };
        info!(journal = %journal.name, count = links.len(), "issue links discovered");

        let kind = select_parser(&journal.name);
        let mut records = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            if i > 0 && !self.opts.delay.is_zero() {
                tokio::time::sleep(self.opts.delay).await;
            }
            records.push(self.scrape_issue(link, kind, &fetch_opts).await);
        }

        let records = dedupe(records, kind.dedupe_key());
        JournalResult {
            name: journal.name.clone(),
            url: journal.url.clone(),
            special_issues: records,
        }
    }

    /// Fetch and extract one detail page, degrading to a sentinel record.
    async fn scrape_issue(
        &self,
        link: &IssueLink,
        kind: ParserKind,
        fetch_opts: &FetchOptions,
    ) -> SpecialIssueRecord {
        let page = match fetch(&self.http_client, &link.url, fetch_opts).await {
            Ok(res) => res,
            Err(e) => {
                warn!(url = %link.url, error = %e, "detail page unavailable");
                return SpecialIssueRecord::fallback(&link.title, &link.url);
            }
        };
        let html = match page.text_utf8(None) {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %link.url, error = %e, "detail page undecodable");
                return SpecialIssueRecord::fallback(&link.title, &link.url);
            }
        };

        let doc = Html::parse_document(&html);
        let fields = extract_fields(&doc, kind);
        SpecialIssueRecord {
            title: link.title.clone(),
            url: link.url.clone(),
            deadline: fields.deadline,
            guest_editors: fields.guest_editors,
            description: fields.description,
            last_updated: date_stamp(),
        }
    }

    /// Extract a record from already-fetched detail-page HTML, without any
    /// network access. The journal name selects the parser variant.
    pub fn extract_issue_html(
        &self,
        html: &str,
        url: &str,
        journal_name: &str,
        title: &str,
    ) -> Result<SpecialIssueRecord, ScrapeError> {
        if html.is_empty() {
            return Err(ScrapeError::extract(
                url,
                "ExtractHtml",
                Some(anyhow::anyhow!("empty HTML")),
            ));
        }
        Url::parse(url).map_err(|_| {
            ScrapeError::invalid_url(url, "ExtractHtml", Some(anyhow::anyhow!("malformed URL")))
        })?;

        let kind = select_parser(journal_name);
        let doc = Html::parse_document(html);
        let fields = extract_fields(&doc, kind);
        Ok(SpecialIssueRecord {
            title: title.to_string(),
            url: url.to_string(),
            deadline: fields.deadline,
            guest_editors: fields.guest_editors,
            description: fields.description,
            last_updated: date_stamp(),
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
