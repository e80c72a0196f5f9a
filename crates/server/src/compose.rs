//! Reply composition and the degradation ladder.
//!
//! A resource question walks: fresh scrape (or cached/stale, handled below
//! this layer) -> FAQ lookup on the same message -> a fixed apology naming
//! the category. Enrichment, when configured, only ever replaces a reply that
//! already succeeded.

use campus_core::{FaqTable, Intent, ResourceName, classify};
use campus_client::{ContentSource, Enricher};

pub const EMPTY_PROMPT: &str = "Please type a question.";
pub const GENERIC_FALLBACK: &str =
    "I can help with placements, admissions, or general information about the university. Try one of those.";

/// Produce the user-visible reply for one chat message.
///
/// Never fails: every error in the pipeline degrades to FAQ text or an
/// apology string.
pub async fn compose(
    source: &dyn ContentSource, faqs: &FaqTable, enricher: Option<&Enricher>, message: &str,
) -> String {
    let message = message.trim();
    if message.is_empty() {
        return EMPTY_PROMPT.to_string();
    }

    match classify(message, faqs) {
        Intent::Resource(name) => resource_reply(source, faqs, enricher, name, message).await,
        Intent::Faq(answer) => answer,
        Intent::None => GENERIC_FALLBACK.to_string(),
    }
}

async fn resource_reply(
    source: &dyn ContentSource, faqs: &FaqTable, enricher: Option<&Enricher>, name: ResourceName, message: &str,
) -> String {
    match source.resource(name).await {
        Ok(page) => {
            if page.summary.is_empty() && page.rows.is_empty() {
                return format!("No {} information found right now.", name.label());
            }

            let mut reply = page.summary.clone();
            if !page.rows.is_empty() {
                if !reply.is_empty() {
                    reply.push_str("\n\n");
                }
                reply.push_str("Recent rows:\n");
                reply.push_str(&page.rows.join("\n"));
            }

            if let Some(enricher) = enricher
                && let Some(enriched) = enricher.rephrase(message, &reply).await
            {
                return enriched;
            }

            reply
        }
        Err(err) => {
            tracing::warn!(resource = %name, %err, "resource unavailable, degrading");
            match faqs.lookup(message) {
                Some(answer) => answer.to_string(),
                None => apology(name),
            }
        }
    }
}

fn apology(name: ResourceName) -> String {
    format!("Sorry - couldn't fetch {} information right now. Please try again later.", name.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use campus_core::{Error, PageContent};
    use std::sync::Arc;

    struct StubSource {
        result: Result<PageContent, ()>,
    }

    impl StubSource {
        fn ok(summary: &str, rows: &[&str]) -> Self {
            Self { result: Ok(PageContent::new(summary, rows.iter().map(|r| r.to_string()).collect())) }
        }

        fn failing() -> Self {
            Self { result: Err(()) }
        }
    }

    #[async_trait]
    impl ContentSource for StubSource {
        async fn resource(&self, _name: ResourceName) -> Result<Arc<PageContent>, Error> {
            match &self.result {
                Ok(page) => Ok(Arc::new(page.clone())),
                Err(()) => Err(Error::FetchFailed("https://campus.example/placements".into())),
            }
        }
    }

    fn faqs() -> FaqTable {
        FaqTable::from_pairs([("package".to_string(), "Median package details are in the brochure.".to_string())])
    }

    #[tokio::test]
    async fn test_empty_message_returns_prompt() {
        let source = StubSource::failing();
        assert_eq!(compose(&source, &FaqTable::default(), None, "   ").await, EMPTY_PROMPT);
    }

    #[tokio::test]
    async fn test_resource_reply_includes_rows_block() {
        let source = StubSource::ok("Placements were strong.", &["B.Tech | 2024 | 60 LPA"]);
        let reply = compose(&source, &FaqTable::default(), None, "placement stats?").await;
        assert_eq!(reply, "Placements were strong.\n\nRecent rows:\nB.Tech | 2024 | 60 LPA");
    }

    #[tokio::test]
    async fn test_resource_reply_without_rows() {
        let source = StubSource::ok("The university was founded decades ago.", &[]);
        let reply = compose(&source, &FaqTable::default(), None, "tell me about the campus").await;
        assert_eq!(reply, "The university was founded decades ago.");
    }

    #[tokio::test]
    async fn test_empty_extraction_reads_as_no_info() {
        let source = StubSource::ok("", &[]);
        let reply = compose(&source, &FaqTable::default(), None, "placements?").await;
        assert_eq!(reply, "No placement information found right now.");
    }

    #[tokio::test]
    async fn test_fetch_failure_prefers_faq_over_apology() {
        let source = StubSource::failing();
        let reply = compose(&source, &faqs(), None, "what is the highest package").await;
        assert_eq!(reply, "Median package details are in the brochure.");
    }

    #[tokio::test]
    async fn test_fetch_failure_without_faq_yields_apology() {
        let source = StubSource::failing();
        let reply = compose(&source, &FaqTable::default(), None, "placement stats?").await;
        assert_eq!(reply, "Sorry - couldn't fetch placement information right now. Please try again later.");
    }

    #[tokio::test]
    async fn test_faq_intent_answers_directly() {
        let source = StubSource::failing();
        let table = FaqTable::from_pairs([("hostel".to_string(), "Hostels are on campus.".to_string())]);
        let reply = compose(&source, &table, None, "hostel rooms?").await;
        assert_eq!(reply, "Hostels are on campus.");
    }

    #[tokio::test]
    async fn test_unmatched_message_gets_generic_fallback() {
        let source = StubSource::failing();
        let reply = compose(&source, &FaqTable::default(), None, "what's the weather").await;
        assert_eq!(reply, GENERIC_FALLBACK);
    }
}
