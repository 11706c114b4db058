//! # Content Taxonomy Module
//!
//! ## Purpose
//! Static, read-only data model for the podcast content: law areas grouping
//! subdivisions, which hold either nested topics (prototype shape) or flat
//! episode lists, down to the episode leaves and their speakers.
//!
//! ## Input/Output Specification
//! - **Input**: The built-in catalog (see `catalog`), constructed once
//! - **Output**: Validated taxonomy handed to the renderer
//! - **Invariants**: Episode sequence labels are unique across the catalog;
//!   sibling order is insertion order and is preserved in rendering
//!
//! The taxonomy is never mutated after construction. Rendering and search
//! both consume it through shared references.

use crate::errors::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Top-level subject category grouping subdivisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    /// Icon class reference (e.g. "fas fa-balance-scale")
    pub icon: String,
    /// Area name
    pub name: String,
    /// Short description shown in the area header
    pub description: String,
    /// Ordered subdivisions
    pub subdivisions: Vec<Subdivision>,
}

/// Named grouping of topics or episodes within an area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdivision {
    /// Subdivision title
    pub title: String,
    /// Either nested topics or a direct episode list
    pub content: SubdivisionContent,
}

/// The two shapes a subdivision can take. Nested topics only appear in
/// prototype mode; the fallback shape lists episodes directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdivisionContent {
    Topics(Vec<Topic>),
    Episodes(Vec<Episode>),
}

/// Intermediate grouping holding speakers and episodes (prototype mode only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Topic title
    pub title: String,
    /// Topic description
    pub description: String,
    /// Zero or more speakers presenting this topic
    pub speakers: Vec<Speaker>,
    /// Ordered episodes
    pub episodes: Vec<Episode>,
}

/// Speaker profile attached to a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    /// Speaker name
    pub name: String,
    /// Role (e.g. "Professor Catedrático")
    pub role: String,
    /// Institution
    pub institution: String,
    /// Thumbnail image reference
    pub image: String,
    /// Full-size image reference, shown in the enlargement modal
    pub full_image: Option<String>,
    /// Short biography
    pub description: String,
}

impl Speaker {
    /// Image used by the enlargement modal; falls back to the thumbnail
    /// when no full-size reference exists.
    pub fn full_image_or_thumb(&self) -> &str {
        self.full_image.as_deref().unwrap_or(&self.image)
    }
}

/// Leaf content unit with a bound video identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Sequence label, unique across the catalog (e.g. "Ep. 02a")
    pub number: String,
    /// Episode title
    pub title: String,
    /// Episode description
    pub description: String,
    /// Free-text duration (e.g. "45 min")
    pub duration: String,
    /// Free-text publish date (e.g. "15 Mar 2024")
    pub date: String,
    /// External video identifier; `None` means the configured fallback applies
    pub video_id: Option<String>,
}

impl Episode {
    /// Video identifier with the fallback applied
    pub fn video_id_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.video_id.as_deref().unwrap_or(fallback)
    }
}

/// The full content taxonomy, constructed once per process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Ordered areas
    pub areas: Vec<Area>,
}

impl Catalog {
    /// Iterate all episodes in document order (areas, then subdivisions,
    /// then topics, preserving insertion order at every level).
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.areas.iter().flat_map(|area| {
            area.subdivisions
                .iter()
                .flat_map(|sub| match &sub.content {
                    SubdivisionContent::Topics(topics) => topics
                        .iter()
                        .flat_map(|t| t.episodes.iter())
                        .collect::<Vec<_>>(),
                    SubdivisionContent::Episodes(eps) => eps.iter().collect(),
                })
        })
    }

    /// Total episode count
    pub fn episode_count(&self) -> usize {
        self.episodes().count()
    }

    /// Iterate all speakers in document order. Only topic-bearing
    /// subdivisions carry speakers.
    pub fn speakers(&self) -> impl Iterator<Item = &Speaker> {
        self.areas
            .iter()
            .flat_map(|area| area.subdivisions.iter())
            .flat_map(|sub| match &sub.content {
                SubdivisionContent::Topics(topics) => topics
                    .iter()
                    .flat_map(|t| t.speakers.iter())
                    .collect::<Vec<_>>(),
                SubdivisionContent::Episodes(_) => Vec::new(),
            })
    }

    /// Total speaker entries across all topics
    pub fn speaker_count(&self) -> usize {
        self.areas
            .iter()
            .flat_map(|a| a.subdivisions.iter())
            .map(|sub| match &sub.content {
                SubdivisionContent::Topics(topics) => {
                    topics.iter().map(|t| t.speakers.len()).sum()
                }
                SubdivisionContent::Episodes(_) => 0,
            })
            .sum()
    }

    /// Check catalog integrity: non-empty, episode numbers unique.
    pub fn validate(&self) -> Result<()> {
        if self.areas.is_empty() {
            return Err(SiteError::CatalogIntegrity {
                details: "catalog has no areas".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for episode in self.episodes() {
            if !seen.insert(episode.number.as_str()) {
                return Err(SiteError::CatalogIntegrity {
                    details: format!("duplicate episode number '{}'", episode.number),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(number: &str, title: &str) -> Episode {
        Episode {
            number: number.to_string(),
            title: title.to_string(),
            description: String::new(),
            duration: "45 min".to_string(),
            date: "15 Mar 2024".to_string(),
            video_id: None,
        }
    }

    fn single_area_catalog(episodes: Vec<Episode>) -> Catalog {
        Catalog {
            areas: vec![Area {
                icon: "fas fa-balance-scale".to_string(),
                name: "Direito Civil".to_string(),
                description: String::new(),
                subdivisions: vec![Subdivision {
                    title: "Introdução".to_string(),
                    content: SubdivisionContent::Episodes(episodes),
                }],
            }],
        }
    }

    #[test]
    fn test_duplicate_episode_numbers_rejected() {
        let catalog = single_area_catalog(vec![
            episode("Ep. 01", "Conceitos Fundamentais"),
            episode("Ep. 01", "Fontes do Direito"),
        ]);
        assert!(matches!(
            catalog.validate(),
            Err(SiteError::CatalogIntegrity { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Catalog { areas: Vec::new() };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_episode_order_preserved() {
        let catalog = single_area_catalog(vec![
            episode("Ep. 01", "Primeiro"),
            episode("Ep. 02", "Segundo"),
            episode("Ep. 03", "Terceiro"),
        ]);
        catalog.validate().unwrap();
        let numbers: Vec<_> = catalog.episodes().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["Ep. 01", "Ep. 02", "Ep. 03"]);
    }

    #[test]
    fn test_video_id_fallback() {
        let mut ep = episode("Ep. 01", "Conceitos");
        assert_eq!(ep.video_id_or("mCFMn0UkRt0"), "mCFMn0UkRt0");
        ep.video_id = Some("abc123".to_string());
        assert_eq!(ep.video_id_or("mCFMn0UkRt0"), "abc123");
    }
}
