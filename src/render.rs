//! # Content Renderer Module
//!
//! ## Purpose
//! Materializes the static taxonomy as HTML sections: one area section per
//! area, one block per subdivision, and either flat episode rows or nested
//! collapsible topic sections with speakers, depending on the render mode.
//!
//! ## Input/Output Specification
//! - **Input**: Validated `Catalog`, render configuration
//! - **Output**: `RenderedPage` holding the page body, the searchable index
//!   and the accordion section identifiers
//! - **Invariants**: One rendered row per episode, sibling order preserved;
//!   rendering from the same catalog reproduces identical row counts
//!
//! The renderer also builds the `SearchIndex` (episode id → searchable text
//! plus the rendered row), which is handed to the filter engine so search
//! never has to re-derive text from markup. All user-visible text is escaped.
//!
//! Episode thumbnails degrade through a two-step fallback chain: the
//! high-resolution still, then the lower resolution, then an embedded
//! placeholder graphic.

use crate::config::{RenderConfig, SiteMode};
use crate::errors::{Result, SiteError};
use crate::taxonomy::{Catalog, Episode, Speaker, Subdivision, SubdivisionContent, Topic};

/// Embedded placeholder shown when no episode thumbnail resolution loads
const THUMB_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzIwIiBoZWlnaHQ9IjE4MCIgdmlld0JveD0iMCAwIDMyMCAxODAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSIzMjAiIGhlaWdodD0iMTgwIiBmaWxsPSIjMjA0MDQwIi8+Cjx0ZXh0IHg9IjE2MCIgeT0iOTAiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGZpbGw9IiNFRUE0NEEiIGZvbnQtc2l6ZT0iMTQiIGZvbnQtZmFtaWx5PSJBcmlhbCwgc2Fucy1zZXJpZiI+RGlyZWl0byBFZHVjYXRpdm8gPC90ZXh0Pgo8L3N2Zz4=";

/// Embedded placeholder for speaker photos
const AVATAR_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTYwIiBoZWlnaHQ9IjEwMCIgdmlld0JveD0iMCAwIDE2MCAxMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSIxNjAiIGhlaWdodD0iMTAwIiBmaWxsPSIjRjNGNEY2IiByeD0iOCIgcnk9IjgiLz4KPHRleHQgeD0iODAiIHk9IjUwIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmaWxsPSIjOTk5OTk5IiBmb250LXNpemU9IjE0IiBmb250LWZhbWlseT0iQXJpYWwsIHNhbnMtc2VyaWYiPkF2YXRhcjwvdGV4dD4KPC9zdmc+";

/// Escape text for safe inclusion in HTML bodies and attribute values
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Derive a stable element id fragment from a display name
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Subdivision rendering variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Flat episode lists under each subdivision
    Flat,
    /// Nested collapsible topic sections with speakers (prototype)
    Nested,
}

/// One searchable entry, produced during rendering. The id is the episode's
/// sequence label; title and description are the text the filter engine
/// matches against; `row_html` is the rendered row, cloned verbatim into the
/// consolidated results block.
#[derive(Debug, Clone)]
pub struct IndexedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub row_html: String,
}

/// Renderer-maintained index mapping item id to searchable text, built
/// during rendering and handed to the filter engine. Iteration order is
/// document order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    items: Vec<IndexedItem>,
}

impl SearchIndex {
    /// Items in document order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedItem> {
        self.items.iter()
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up one item by its id
    pub fn get(&self, id: &str) -> Option<&IndexedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn push(&mut self, item: IndexedItem) {
        self.items.push(item);
    }
}

/// A fully rendered page: body markup plus the artifacts the other
/// components consume.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page body HTML, replacing any previous content of the target container
    pub body_html: String,
    /// Searchable index built during rendering
    pub index: SearchIndex,
    /// Accordion section ids, in document order, all initially collapsed
    pub section_ids: Vec<String>,
}

/// Renders the taxonomy into HTML and builds the search index
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    mode: SiteMode,
    render_mode: RenderMode,
    fallback_video_id: String,
}

impl HtmlRenderer {
    /// Build a renderer from the render configuration. The mode is resolved
    /// here once; no later step re-probes the page shape.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            mode: config.mode,
            render_mode: if config.prototype {
                RenderMode::Nested
            } else {
                RenderMode::Flat
            },
            fallback_video_id: config.fallback_video_id.clone(),
        }
    }

    /// Render the whole page body. Fails when the catalog is empty, the
    /// analog of the original guard against a missing data source.
    pub fn render_page(&self, catalog: &Catalog) -> Result<RenderedPage> {
        if catalog.areas.is_empty() {
            return Err(SiteError::RenderFailed {
                section: "law-areas".to_string(),
                details: "catalog has no areas to render".to_string(),
            });
        }

        match self.mode {
            SiteMode::FlatCards => self.render_flat_cards(catalog),
            SiteMode::Grouped => self.render_grouped(catalog),
        }
    }

    /// Grouped shape: one `law-area-section` per area, subdivisions inside.
    fn render_grouped(&self, catalog: &Catalog) -> Result<RenderedPage> {
        let mut index = SearchIndex::default();
        let mut section_ids = Vec::new();
        let mut body = String::from("<div class=\"law-areas\"><div class=\"container\">\n");

        for area in &catalog.areas {
            let section_id = format!("area-{}", slug(&area.name));
            section_ids.push(section_id.clone());
            body.push_str(&format!(
                "<div class=\"law-area-section\" id=\"{id}\">\n\
                 <div class=\"area-header\" tabindex=\"0\" role=\"button\" aria-expanded=\"false\">\n\
                 <i class=\"{icon}\"></i>\n\
                 <div class=\"header-content\"><h2>{name}</h2><p>{desc}</p></div>\n\
                 </div>\n<div class=\"law-area-accordion-content\">\n",
                id = html_escape(&section_id),
                icon = html_escape(&area.icon),
                name = html_escape(&area.name),
                desc = html_escape(&area.description),
            ));

            body.push_str("<div class=\"subdivisions-grid\">\n");
            for sub in &area.subdivisions {
                body.push_str(&self.render_subdivision_card(sub, &mut index, &mut section_ids));
            }
            body.push_str("</div>\n");

            body.push_str("</div></div>\n");
        }

        body.push_str("</div></div>\n");

        tracing::debug!(
            episodes = index.len(),
            sections = section_ids.len(),
            "rendered grouped page"
        );

        Ok(RenderedPage {
            body_html: body,
            index,
            section_ids,
        })
    }

    /// Flat-card shape: a single grid of independent episode cards.
    fn render_flat_cards(&self, catalog: &Catalog) -> Result<RenderedPage> {
        let mut index = SearchIndex::default();
        let mut body = String::from("<div class=\"episodes-grid\">\n");

        for episode in catalog.episodes() {
            let card = self.render_episode_card(episode);
            index.push(IndexedItem {
                id: episode.number.clone(),
                title: episode.title.clone(),
                description: episode.description.clone(),
                row_html: card.clone(),
            });
            body.push_str(&card);
        }

        body.push_str("</div>\n");

        tracing::debug!(episodes = index.len(), "rendered flat-card page");

        Ok(RenderedPage {
            body_html: body,
            index,
            section_ids: Vec::new(),
        })
    }

    fn render_subdivision_card(
        &self,
        sub: &Subdivision,
        index: &mut SearchIndex,
        section_ids: &mut Vec<String>,
    ) -> String {
        let mut card = format!(
            "<div class=\"subdivision-card\"><h3>{}</h3>\n",
            html_escape(&sub.title)
        );

        match (&sub.content, self.render_mode) {
            (SubdivisionContent::Topics(topics), RenderMode::Nested) => {
                card.push_str("<div class=\"topics-accordion\">\n");
                for topic in topics {
                    card.push_str(&self.render_topic_section(topic, index, section_ids));
                }
                card.push_str("</div>\n");
            }
            (SubdivisionContent::Episodes(episodes), _) => {
                card.push_str("<div class=\"episode-list\">\n");
                for episode in episodes {
                    let row = self.render_episode_item(episode);
                    index.push(IndexedItem {
                        id: episode.number.clone(),
                        title: episode.title.clone(),
                        description: episode.description.clone(),
                        row_html: row.clone(),
                    });
                    card.push_str(&row);
                }
                card.push_str("</div>\n");
            }
            // Topics present but flat rendering requested: list the episodes
            // without the topic chrome.
            (SubdivisionContent::Topics(topics), RenderMode::Flat) => {
                card.push_str("<div class=\"episode-list\">\n");
                for episode in topics.iter().flat_map(|t| t.episodes.iter()) {
                    let row = self.render_episode_item(episode);
                    index.push(IndexedItem {
                        id: episode.number.clone(),
                        title: episode.title.clone(),
                        description: episode.description.clone(),
                        row_html: row.clone(),
                    });
                    card.push_str(&row);
                }
                card.push_str("</div>\n");
            }
        }

        card.push_str("</div>\n");
        card
    }

    fn render_topic_section(
        &self,
        topic: &Topic,
        index: &mut SearchIndex,
        section_ids: &mut Vec<String>,
    ) -> String {
        let section_id = format!("topic-{}", slug(&topic.title));
        let episode_count = topic.episodes.len();
        let plural = if episode_count == 1 { "" } else { "s" };

        let mut section = format!(
            "<div class=\"topic-section\" id=\"{id}\">\n\
             <div class=\"topic-header\" tabindex=\"0\" role=\"button\" aria-expanded=\"false\">\n\
             <div class=\"topic-header-left\"><h4>{title}</h4>\
             <span class=\"topic-meta\">{count} epis&oacute;dio{plural}</span></div>\n\
             <i class=\"fas fa-chevron-down\"></i>\n</div>\n\
             <div class=\"topic-content\">\n\
             <p class=\"topic-description\">{desc}</p>\n",
            id = html_escape(&section_id),
            title = html_escape(&topic.title),
            count = episode_count,
            plural = plural,
            desc = html_escape(&topic.description),
        );

        if !topic.speakers.is_empty() {
            section.push_str(
                "<div class=\"speakers-section\">\n\
                 <h5><i class=\"fas fa-users\"></i> Apresentadores</h5>\n\
                 <div class=\"speakers-grid\">\n",
            );
            for speaker in &topic.speakers {
                section.push_str(&self.render_speaker_card(speaker));
            }
            section.push_str("</div></div>\n");
        }

        section.push_str("<div class=\"episode-list\">\n");
        for episode in &topic.episodes {
            let row = self.render_episode_item(episode);
            index.push(IndexedItem {
                id: episode.number.clone(),
                title: episode.title.clone(),
                description: episode.description.clone(),
                row_html: row.clone(),
            });
            section.push_str(&row);
        }
        section.push_str("</div></div></div>\n");

        section_ids.push(section_id);
        section
    }

    /// One episode row. The video identifier lands in `data-video-id` for
    /// the modal controller; the thumbnail carries the fallback chain.
    pub fn render_episode_item(&self, episode: &Episode) -> String {
        let video_id = episode.video_id_or(&self.fallback_video_id);
        format!(
            "<div class=\"episode-item\" data-episode-id=\"{id}\">\n\
             <div class=\"episode-content\">\n\
             <div class=\"episode-text\">\n\
             <span class=\"episode-number\">{number}</span>\n\
             <h4>{title}</h4>\n<p>{desc}</p>\n\
             <div class=\"episode-meta\">\
             <span><i class=\"fas fa-clock\"></i> {duration}</span>\
             <span><i class=\"fas fa-calendar\"></i> {date}</span></div>\n\
             </div>\n\
             <div class=\"episode-thumbnail\">\n\
             <div class=\"video-thumbnail\" data-video-id=\"{video}\">\n\
             <img src=\"https://img.youtube.com/vi/{video}/maxresdefault.jpg\" alt=\"Thumbnail\" \
             onerror=\"this.src='https://img.youtube.com/vi/{video}/hqdefault.jpg'; \
             this.onerror=function(){{this.src='{placeholder}';}}\" loading=\"lazy\">\n\
             <div class=\"play-overlay\"><i class=\"fas fa-play\"></i></div>\n\
             </div></div></div></div>\n",
            id = html_escape(&episode.number),
            number = html_escape(&episode.number),
            title = html_escape(&episode.title),
            desc = html_escape(&episode.description),
            duration = html_escape(&episode.duration),
            date = html_escape(&episode.date),
            video = html_escape(video_id),
            placeholder = THUMB_PLACEHOLDER,
        )
    }

    /// Flat-card variant of an episode, used on the flat-cards page shape
    fn render_episode_card(&self, episode: &Episode) -> String {
        let video_id = episode.video_id_or(&self.fallback_video_id);
        format!(
            "<div class=\"episode-card\" data-episode-id=\"{id}\">\n\
             <span class=\"episode-number\">{number}</span>\n\
             <h3>{title}</h3>\n<p>{desc}</p>\n\
             <div class=\"episode-meta\">\
             <span><i class=\"fas fa-clock\"></i> {duration}</span>\
             <span><i class=\"fas fa-calendar\"></i> {date}</span></div>\n\
             <button class=\"watch-video-btn\" data-video-id=\"{video}\">\
             <i class=\"fas fa-play\"></i> Ver epis&oacute;dio</button>\n\
             </div>\n",
            id = html_escape(&episode.number),
            number = html_escape(&episode.number),
            title = html_escape(&episode.title),
            desc = html_escape(&episode.description),
            duration = html_escape(&episode.duration),
            date = html_escape(&episode.date),
            video = html_escape(video_id),
        )
    }

    /// Speaker card with the profile data attributes the enlargement modal
    /// reads, and the avatar placeholder fallback.
    fn render_speaker_card(&self, speaker: &Speaker) -> String {
        format!(
            "<div class=\"speaker-card\">\n\
             <div class=\"speaker-image\" data-speaker-name=\"{name}\" \
             data-speaker-role=\"{role}\" data-speaker-institution=\"{institution}\" \
             data-speaker-description=\"{desc}\" data-full-image=\"{full}\">\n\
             <img src=\"{image}\" alt=\"{name}\" loading=\"lazy\" \
             onerror=\"this.src='{placeholder}'\">\n\
             </div>\n\
             <div class=\"speaker-info\">\n\
             <h6>{name}</h6>\n\
             <p class=\"speaker-role\">{role}</p>\n\
             <p class=\"speaker-institution\">{institution}</p>\n\
             <p class=\"speaker-description\">{desc}</p>\n\
             </div></div>\n",
            name = html_escape(&speaker.name),
            role = html_escape(&speaker.role),
            institution = html_escape(&speaker.institution),
            desc = html_escape(&speaker.description),
            full = html_escape(speaker.full_image_or_thumb()),
            image = html_escape(&speaker.image),
            placeholder = AVATAR_PLACEHOLDER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::Config;

    fn grouped_renderer(prototype: bool) -> HtmlRenderer {
        let mut config = Config::default();
        config.render.prototype = prototype;
        HtmlRenderer::new(&config.render)
    }

    #[test]
    fn test_render_indexes_every_episode() {
        let catalog = catalog::builtin(true);
        let page = grouped_renderer(true).render_page(&catalog).unwrap();
        assert_eq!(page.index.len(), catalog.episode_count());
        assert_eq!(
            page.body_html.matches("class=\"episode-item\"").count(),
            catalog.episode_count()
        );
    }

    #[test]
    fn test_render_is_idempotent_in_content() {
        let catalog = catalog::builtin(true);
        let renderer = grouped_renderer(true);
        let first = renderer.render_page(&catalog).unwrap();
        let second = renderer.render_page(&catalog).unwrap();
        assert_eq!(first.body_html, second.body_html);
        assert_eq!(first.index.len(), second.index.len());
        assert_eq!(
            first.body_html.matches("speaker-card").count(),
            second.body_html.matches("speaker-card").count()
        );
    }

    #[test]
    fn test_nested_mode_renders_speakers_and_sections() {
        let catalog = catalog::builtin(true);
        let page = grouped_renderer(true).render_page(&catalog).unwrap();
        assert_eq!(
            page.body_html.matches("class=\"speaker-card\"").count(),
            catalog.speaker_count()
        );
        // one accordion id per area plus one per topic
        assert!(page.section_ids.iter().any(|id| id == "area-direito-civil"));
        assert!(page
            .section_ids
            .iter()
            .any(|id| id == "topic-contratos-parte-i"));
    }

    #[test]
    fn test_flat_mode_has_no_topic_sections() {
        let catalog = catalog::builtin(false);
        let page = grouped_renderer(false).render_page(&catalog).unwrap();
        assert!(!page.body_html.contains("topic-section"));
        assert_eq!(page.index.len(), catalog.episode_count());
    }

    #[test]
    fn test_fallback_video_id_is_applied() {
        let catalog = catalog::builtin(true);
        let page = grouped_renderer(true).render_page(&catalog).unwrap();
        assert!(page.body_html.contains("data-video-id=\"mCFMn0UkRt0\""));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(html_escape("Ferreira & Associados"), "Ferreira &amp; Associados");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");

        let catalog = catalog::builtin(true);
        let page = grouped_renderer(true).render_page(&catalog).unwrap();
        assert!(page.body_html.contains("Ferreira &amp; Associados"));
    }

    #[test]
    fn test_flat_cards_shape() {
        let mut config = Config::default();
        config.render.mode = SiteMode::FlatCards;
        config.render.prototype = false;
        let renderer = HtmlRenderer::new(&config.render);

        let catalog = catalog::builtin(false);
        let page = renderer.render_page(&catalog).unwrap();
        assert!(page.body_html.starts_with("<div class=\"episodes-grid\">"));
        assert_eq!(
            page.body_html.matches("class=\"episode-card\"").count(),
            catalog.episode_count()
        );
        assert!(page.section_ids.is_empty());
    }

    #[test]
    fn test_empty_catalog_render_fails() {
        let empty = crate::taxonomy::Catalog { areas: Vec::new() };
        let err = grouped_renderer(true).render_page(&empty).unwrap_err();
        assert_eq!(err.category(), "render");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Direito Civil"), "direito-civil");
        assert_eq!(slug("Contratos - Parte I"), "contratos-parte-i");
    }
}
