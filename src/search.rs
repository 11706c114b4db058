//! # Search and Filter Module
//!
//! ## Purpose
//! Applies a free-text query to the rendered episode index and produces the
//! outcome the page presents: everything, a visibility filter, a synthesized
//! consolidated results block, or a no-results message.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query string, the renderer-built `SearchIndex`
//! - **Output**: `FilterOutcome` describing the full redraw for this query
//! - **Invariants**: Results preserve document order; every outcome is a
//!   pure function of (query, index), so repeating a query reproduces the
//!   same outcome
//!
//! On the flat-card shape a query hides non-matching cards in place. On the
//! grouped shape matching rows are cloned out of their containers into a
//! single results block so matches buried in collapsed sections surface.
//! Each keystroke's outcome fully replaces the previous one.

use crate::config::{Config, SiteMode};
use crate::errors::{Result, SiteError};
use crate::matcher::FuzzyMatcher;
use crate::render::{html_escape, SearchIndex};

/// What the page shows after a filter pass
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Empty query: restore the normal layout, no results block
    ShowAll,
    /// Flat-card shape: ids of the cards that stay visible
    Filtered { visible: Vec<String> },
    /// Grouped shape: synthesized results block replacing the normal view
    Consolidated {
        results_html: String,
        matched: Vec<String>,
    },
    /// No matches: a single message block, never one message per section
    NoResults { query: String, message_html: String },
}

/// Filter engine bound to one rendered page
#[derive(Debug, Clone)]
pub struct FilterEngine {
    matcher: FuzzyMatcher,
    mode: SiteMode,
    max_query_length: usize,
}

impl FilterEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            matcher: FuzzyMatcher::new(&config.search),
            mode: config.render.mode,
            max_query_length: config.search.max_query_length,
        }
    }

    /// Run one filter pass. The query is trimmed first; an all-whitespace
    /// query behaves exactly like an empty one.
    pub fn filter(&self, raw_query: &str, index: &SearchIndex) -> Result<FilterOutcome> {
        let query = raw_query.trim();

        if query.is_empty() {
            return Ok(FilterOutcome::ShowAll);
        }

        if query.chars().count() > self.max_query_length {
            return Err(SiteError::InvalidSearchQuery {
                query: query.chars().take(32).collect(),
                reason: format!("query exceeds {} characters", self.max_query_length),
            });
        }

        // Title and description are both searched, document order kept
        let matched: Vec<&crate::render::IndexedItem> = index
            .iter()
            .filter(|item| {
                self.matcher.is_match(query, &item.title)
                    || self.matcher.is_match(query, &item.description)
            })
            .collect();

        tracing::debug!(query = %query, matches = matched.len(), "filter pass");

        if matched.is_empty() {
            return Ok(FilterOutcome::NoResults {
                query: query.to_string(),
                message_html: Self::no_results_html(query),
            });
        }

        match self.mode {
            SiteMode::FlatCards => Ok(FilterOutcome::Filtered {
                visible: matched.iter().map(|item| item.id.clone()).collect(),
            }),
            SiteMode::Grouped => {
                let ids = matched.iter().map(|item| item.id.clone()).collect();
                Ok(FilterOutcome::Consolidated {
                    results_html: Self::results_block_html(&matched),
                    matched: ids,
                })
            }
        }
    }

    /// Unified results block inserted after the page header. Rows are the
    /// renderer's own markup, cloned verbatim.
    fn results_block_html(matched: &[&crate::render::IndexedItem]) -> String {
        let count = matched.len();
        let plural = if count == 1 { "" } else { "s" };
        let mut block = format!(
            "<div class=\"search-results-section\">\n\
             <h2><i class=\"fas fa-search\"></i> Resultados da Pesquisa \
             ({count} epis&oacute;dio{plural})</h2>\n\
             <div class=\"search-results-list\">\n"
        );
        for item in matched {
            block.push_str(&item.row_html);
        }
        block.push_str("</div></div>\n");
        block
    }

    /// Single no-results message echoing the literal query text, escaped.
    fn no_results_html(query: &str) -> String {
        format!(
            "<div class=\"no-results-message\">\n\
             <i class=\"fas fa-search\"></i>\n\
             <h3>Nenhum epis&oacute;dio encontrado</h3>\n\
             <p>Pesquisa: &quot;{}&quot;</p>\n\
             </div>\n",
            html_escape(query)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::render::HtmlRenderer;

    fn grouped_setup() -> (FilterEngine, SearchIndex) {
        let config = Config::default();
        let page = HtmlRenderer::new(&config.render)
            .render_page(&catalog::builtin(true))
            .unwrap();
        (FilterEngine::new(&config), page.index)
    }

    fn flat_setup() -> (FilterEngine, SearchIndex) {
        let mut config = Config::default();
        config.render.mode = SiteMode::FlatCards;
        config.render.prototype = false;
        let page = HtmlRenderer::new(&config.render)
            .render_page(&catalog::builtin(false))
            .unwrap();
        (FilterEngine::new(&config), page.index)
    }

    #[test]
    fn test_empty_and_whitespace_queries_show_all() {
        let (engine, index) = grouped_setup();
        assert_eq!(engine.filter("", &index).unwrap(), FilterOutcome::ShowAll);
        assert_eq!(
            engine.filter("   ", &index).unwrap(),
            FilterOutcome::ShowAll
        );
    }

    #[test]
    fn test_contrat_consolidates_both_parts() {
        let (engine, index) = grouped_setup();
        match engine.filter("contrat", &index).unwrap() {
            FilterOutcome::Consolidated {
                results_html,
                matched,
            } => {
                assert!(results_html.contains("Resultados da Pesquisa"));
                assert!(results_html.contains("Contratos - Parte I"));
                assert!(results_html.contains("Contratos - Parte II"));
                assert!(!matched.is_empty());
            }
            other => panic!("expected consolidated outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_no_results_is_a_single_message() {
        let (engine, index) = grouped_setup();
        match engine.filter("zzyzxq", &index).unwrap() {
            FilterOutcome::NoResults {
                query,
                message_html,
            } => {
                assert_eq!(query, "zzyzxq");
                assert_eq!(message_html.matches("no-results-message").count(), 1);
                assert!(message_html.contains("Nenhum epis&oacute;dio encontrado"));
                assert!(message_html.contains("&quot;zzyzxq&quot;"));
            }
            other => panic!("expected no-results outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_query_echo_is_escaped() {
        let (engine, index) = grouped_setup();
        match engine.filter("<script>alert(1)</script>", &index).unwrap() {
            FilterOutcome::NoResults { message_html, .. } => {
                assert!(!message_html.contains("<script>"));
                assert!(message_html.contains("&lt;script&gt;"));
            }
            other => panic!("expected no-results outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_results_preserve_document_order() {
        let (engine, index) = grouped_setup();
        let all_ids: Vec<String> = index.iter().map(|i| i.id.clone()).collect();
        match engine.filter("direito", &index).unwrap() {
            FilterOutcome::Consolidated { matched, .. } => {
                let positions: Vec<usize> = matched
                    .iter()
                    .map(|id| all_ids.iter().position(|x| x == id).unwrap())
                    .collect();
                let mut sorted = positions.clone();
                sorted.sort_unstable();
                assert_eq!(positions, sorted);
            }
            other => panic!("expected consolidated outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_mode_filters_in_place() {
        let (engine, index) = flat_setup();
        match engine.filter("contrat", &index).unwrap() {
            FilterOutcome::Filtered { visible } => {
                assert!(!visible.is_empty());
                assert!(visible.len() < index.len());
            }
            other => panic!("expected filtered outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_repeat_query_is_deterministic() {
        let (engine, index) = grouped_setup();
        let first = engine.filter("penal", &index).unwrap();
        let second = engine.filter("penal", &index).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overlong_query_rejected() {
        let (engine, index) = grouped_setup();
        let long = "a".repeat(500);
        let err = engine.filter(&long, &index).unwrap_err();
        assert!(err.is_fail_soft());
    }
}
