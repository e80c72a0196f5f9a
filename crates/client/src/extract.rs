//! Heuristic content extraction from university pages.
//!
//! The site's visual design changes often; headings are the most stable
//! structural signal, so the extractor pairs each heading with the content
//! that follows it and only falls back to raw paragraphs when no heading
//! yields anything. Table extraction runs independently of both passes.
//!
//! Extraction is a pure function of its inputs: the same document and rules
//! always produce the same output.

use scraper::{ElementRef, Html, Selector};

/// How heading text is paired with the content that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingMode {
    /// Nearest following `p`, `div`, or `span` in document order.
    NextBlock,
    /// Up to three following siblings among `p`, `ul`, `div`.
    Siblings,
}

/// Per-resource extraction tuning.
#[derive(Debug, Clone)]
pub struct ExtractRules {
    pub pairing: PairingMode,

    /// How many `<p>` elements the fallback pass takes.
    pub paragraph_budget: usize,

    /// Character cap per fallback paragraph.
    pub paragraph_cap: usize,

    /// Character cap per heading-paired snippet.
    pub snippet_cap: usize,

    /// How many tables to read rows from.
    pub max_tables: usize,

    /// Row cap per table, header row excluded.
    pub max_rows: usize,

    /// Global character cap on the assembled summary.
    pub summary_cap: usize,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            pairing: PairingMode::NextBlock,
            paragraph_budget: 8,
            paragraph_cap: 400,
            snippet_cap: 600,
            max_tables: 1,
            max_rows: 12,
            summary_cap: 4000,
        }
    }
}

/// Normalized result of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub summary: String,
    pub rows: Vec<String>,
}

const SIBLING_CAP: usize = 3;

/// Extract a `{summary, rows}` record from raw page markup.
pub fn extract(html: &str, rules: &ExtractRules) -> Extraction {
    let doc = Html::parse_document(html);

    let mut parts = heading_parts(&doc, rules);
    if parts.is_empty() {
        parts = paragraph_parts(&doc, rules);
    }

    let summary = truncate_chars(&parts.join("\n\n"), rules.summary_cap);
    let rows = table_rows(&doc, rules);

    Extraction { summary, rows }
}

/// Heading-pairing pass: each h1-h4 label plus the content that follows it,
/// in document order. Headings with no usable following content are skipped.
fn heading_parts(doc: &Html, rules: &ExtractRules) -> Vec<String> {
    let Ok(headings) = Selector::parse("h1,h2,h3,h4") else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    for heading in doc.select(&headings) {
        let label = element_text(&heading);
        if label.is_empty() {
            continue;
        }

        let body = match rules.pairing {
            PairingMode::NextBlock => next_block_text(doc, &heading, rules.snippet_cap),
            PairingMode::Siblings => sibling_text(&heading, rules.snippet_cap),
        };

        if let Some(body) = body {
            parts.push(format!("{label} - {body}"));
        }
    }
    parts
}

/// Nearest element after `heading` in document order among `p`, `div`,
/// `span` that carries visible text.
fn next_block_text(doc: &Html, heading: &ElementRef, cap: usize) -> Option<String> {
    let mut seen = false;
    for node in doc.root_element().descendants() {
        if node.id() == heading.id() {
            seen = true;
            continue;
        }
        if !seen || node.ancestors().any(|a| a.id() == heading.id()) {
            continue;
        }

        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if matches!(element.value().name(), "p" | "div" | "span") {
            let text = element_text(&element);
            if !text.is_empty() {
                return Some(truncate_chars(&text, cap));
            }
        }
    }
    None
}

/// Up to [`SIBLING_CAP`] following siblings among `p`, `ul`, `div`, joined
/// with spaces.
fn sibling_text(heading: &ElementRef, cap: usize) -> Option<String> {
    let mut chunks = Vec::new();
    for sibling in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        if matches!(element.value().name(), "p" | "ul" | "div") {
            let text = element_text(&element);
            if !text.is_empty() {
                chunks.push(truncate_chars(&text, cap));
            }
        }
        if chunks.len() >= SIBLING_CAP {
            break;
        }
    }
    (!chunks.is_empty()).then(|| chunks.join(" "))
}

/// Fallback pass: the first `paragraph_budget` paragraphs, each capped.
fn paragraph_parts(doc: &Html, rules: &ExtractRules) -> Vec<String> {
    let Ok(paragraphs) = Selector::parse("p") else {
        return Vec::new();
    };

    doc.select(&paragraphs)
        .take(rules.paragraph_budget)
        .filter_map(|p| {
            let text = element_text(&p);
            (!text.is_empty()).then(|| truncate_chars(&text, rules.paragraph_cap))
        })
        .collect()
}

/// Rows from the first `max_tables` tables, header row skipped, cells joined
/// with `" | "`.
fn table_rows(doc: &Html, rules: &ExtractRules) -> Vec<String> {
    let (Ok(tables), Ok(tr), Ok(cells)) =
        (Selector::parse("table"), Selector::parse("tr"), Selector::parse("td,th"))
    else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for table in doc.select(&tables).take(rules.max_tables) {
        for row in table.select(&tr).skip(1).take(rules.max_rows) {
            let texts: Vec<String> = row
                .select(&cells)
                .map(|cell| element_text(&cell))
                .filter(|text| !text.is_empty())
                .collect();
            if !texts.is_empty() {
                rows.push(texts.join(" | "));
            }
        }
    }
    rows
}

/// Visible text of an element with whitespace normalized.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, never splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
