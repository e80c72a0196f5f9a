//! Keyword-containment intent classification.
//!
//! Classification is deliberately approximate: lowercase the message, then
//! test containment (not whole-word matching) of any keyword per category in
//! a fixed priority order. A message matching several categories resolves by
//! that order, not by relevance.

use crate::faq::FaqTable;
use crate::types::ResourceName;

/// Where a chat message should be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A live-scraped resource category.
    Resource(ResourceName),
    /// A canned FAQ answer matched by trigger phrase.
    Faq(String),
    /// Nothing matched.
    None,
}

/// Ordered dispatch table. Evaluated top to bottom; first hit wins.
const KEYWORDS: &[(ResourceName, &[&str])] = &[
    (
        ResourceName::Placements,
        &["placement", "placements", "package", "highest", "average", "recruiter"],
    ),
    (
        ResourceName::Admissions,
        &["admission", "apply", "eligibility", "deadline", "last date", "fees"],
    ),
    (ResourceName::About, &["about", "who are you", "overview", "campus"]),
];

pub fn classify(message: &str, faqs: &FaqTable) -> Intent {
    let message = message.to_lowercase();

    for (name, keywords) in KEYWORDS {
        if keywords.iter().any(|keyword| message.contains(keyword)) {
            return Intent::Resource(*name);
        }
    }

    if let Some(answer) = faqs.lookup(&message) {
        return Intent::Faq(answer.to_string());
    }

    Intent::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placements_keywords() {
        let faqs = FaqTable::default();
        assert_eq!(classify("what was the highest package?", &faqs), Intent::Resource(ResourceName::Placements));
        assert_eq!(classify("top recruiters on campus drive", &faqs), Intent::Resource(ResourceName::Placements));
    }

    #[test]
    fn test_admissions_keywords() {
        let faqs = FaqTable::default();
        assert_eq!(classify("how do I apply?", &faqs), Intent::Resource(ResourceName::Admissions));
        assert_eq!(classify("eligibility for b.tech", &faqs), Intent::Resource(ResourceName::Admissions));
    }

    #[test]
    fn test_about_keywords() {
        let faqs = FaqTable::default();
        assert_eq!(classify("tell me ABOUT the university", &faqs), Intent::Resource(ResourceName::About));
    }

    #[test]
    fn test_priority_collision_resolves_to_placements() {
        // contains both a placements keyword ("highest package") and
        // admissions keywords ("deadline", "admission"); placements is
        // checked first
        let faqs = FaqTable::default();
        let intent = classify("what is the highest package deadline for admission", &faqs);
        assert_eq!(intent, Intent::Resource(ResourceName::Placements));
    }

    #[test]
    fn test_containment_not_word_boundary() {
        let faqs = FaqTable::default();
        // "applying" contains "apply"
        assert_eq!(classify("applying this year", &faqs), Intent::Resource(ResourceName::Admissions));
    }

    #[test]
    fn test_faq_checked_after_resources() {
        let faqs = FaqTable::from_pairs([("hostel".to_string(), "Hostels are on campus.".to_string())]);
        assert_eq!(classify("hostel fees please", &faqs), Intent::Resource(ResourceName::Admissions));
        assert_eq!(classify("hostel rooms", &faqs), Intent::Faq("Hostels are on campus.".to_string()));
    }

    #[test]
    fn test_no_match() {
        let faqs = FaqTable::default();
        assert_eq!(classify("what is the weather like", &faqs), Intent::None);
    }
}
