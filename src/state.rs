//! # Page State Module
//!
//! ## Purpose
//! Explicit owners for the page's transient interactive state: which
//! accordion sections are open, which modal is showing, the active toast
//! and the current query. Nothing re-derives this state from markup.
//!
//! ## Input/Output Specification
//! - **Input**: User interactions (toggle, open, dismiss, keystrokes)
//! - **Output**: State transitions the page layer renders from
//! - **Invariants**: At most one modal and one toast at a time; accordion
//!   sections toggle independently of their siblings

use crate::taxonomy::Speaker;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Open/closed bookkeeping for the collapsible sections. All sections start
/// collapsed; toggling one never touches its peers.
#[derive(Debug, Clone, Default)]
pub struct AccordionController {
    open: HashSet<String>,
}

impl AccordionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one section, returning whether it is now open
    pub fn toggle(&mut self, section_id: &str) -> bool {
        if self.open.remove(section_id) {
            false
        } else {
            self.open.insert(section_id.to_string());
            true
        }
    }

    pub fn is_open(&self, section_id: &str) -> bool {
        self.open.contains(section_id)
    }

    /// Collapse everything, used when a consolidated results block replaces
    /// the normal view
    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

/// The modal the page is currently showing, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ModalState {
    Closed,
    /// Video playback modal with the embedded player
    Video { video_id: String, embed_url: String },
    /// Speaker photo enlargement with the profile text
    Image { profile: SpeakerProfile },
}

/// Profile data shown alongside an enlarged speaker photo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerProfile {
    pub name: String,
    pub role: String,
    pub institution: String,
    pub description: String,
    pub full_image: String,
}

impl From<&Speaker> for SpeakerProfile {
    fn from(speaker: &Speaker) -> Self {
        Self {
            name: speaker.name.clone(),
            role: speaker.role.clone(),
            institution: speaker.institution.clone(),
            description: speaker.description.clone(),
            full_image: speaker.full_image_or_thumb().to_string(),
        }
    }
}

/// Single-modal controller. Opening a modal replaces whatever was showing;
/// closing always returns to `Closed`.
#[derive(Debug, Clone)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Open the video modal. The embed uses the privacy-enhanced player
    /// host with autoplay enabled.
    pub fn open_video(&mut self, video_id: &str) {
        self.state = ModalState::Video {
            video_id: video_id.to_string(),
            embed_url: format!(
                "https://www.youtube-nocookie.com/embed/{}?autoplay=1&rel=0",
                video_id
            ),
        };
    }

    /// Open the speaker photo enlargement
    pub fn open_image(&mut self, speaker: &Speaker) {
        self.state = ModalState::Image {
            profile: SpeakerProfile::from(speaker),
        };
    }

    /// Close any open modal. Closing the video modal discards the embed
    /// URL, which stops playback.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// One transient notification
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: DateTime<Utc>,
}

/// Single-toast notifier. Showing a new toast replaces the current one;
/// toasts expire after the configured dismiss delay.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Toast>,
    dismiss_after: Duration,
}

impl Notifier {
    pub fn new(dismiss_ms: u64) -> Self {
        Self {
            current: None,
            dismiss_after: Duration::milliseconds(dismiss_ms as i64),
        }
    }

    /// Show a toast, replacing any existing one immediately
    pub fn show(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.current = Some(Toast {
            message: message.into(),
            level,
            created_at: Utc::now(),
        });
    }

    /// The active toast, if it has not yet expired
    pub fn active(&self) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| Utc::now() - toast.created_at < self.dismiss_after)
    }

    /// Drop an expired toast; call before rendering
    pub fn sweep(&mut self) {
        if self.active().is_none() {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

/// Current search box state
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub query: String,
}

/// Aggregate owner of all transient page state
#[derive(Debug, Clone)]
pub struct PageController {
    pub accordion: AccordionController,
    pub modal: ModalController,
    pub notifier: Notifier,
    pub query: QueryState,
}

impl PageController {
    pub fn new(toast_dismiss_ms: u64) -> Self {
        Self {
            accordion: AccordionController::new(),
            modal: ModalController::new(),
            notifier: Notifier::new(toast_dismiss_ms),
            query: QueryState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speaker() -> Speaker {
        Speaker {
            name: "Prof. Ana Silva".to_string(),
            role: "Professora Catedrática".to_string(),
            institution: "Universidade de Lisboa".to_string(),
            image: "thumb.jpg".to_string(),
            full_image: Some("full.jpg".to_string()),
            description: "Especialista em direito civil.".to_string(),
        }
    }

    #[test]
    fn test_sections_start_collapsed_and_toggle_independently() {
        let mut accordion = AccordionController::new();
        assert!(!accordion.is_open("area-direito-civil"));
        assert!(!accordion.is_open("area-direito-penal"));

        assert!(accordion.toggle("area-direito-civil"));
        assert!(accordion.is_open("area-direito-civil"));
        assert!(!accordion.is_open("area-direito-penal"));

        assert!(accordion.toggle("area-direito-penal"));
        assert!(accordion.is_open("area-direito-civil"));

        assert!(!accordion.toggle("area-direito-civil"));
        assert!(!accordion.is_open("area-direito-civil"));
        assert!(accordion.is_open("area-direito-penal"));
    }

    #[test]
    fn test_collapse_all() {
        let mut accordion = AccordionController::new();
        accordion.toggle("a");
        accordion.toggle("b");
        accordion.collapse_all();
        assert_eq!(accordion.open_count(), 0);
    }

    #[test]
    fn test_video_modal_embed_url() {
        let mut modal = ModalController::new();
        modal.open_video("mCFMn0UkRt0");
        match modal.state() {
            ModalState::Video { embed_url, .. } => {
                assert_eq!(
                    embed_url,
                    "https://www.youtube-nocookie.com/embed/mCFMn0UkRt0?autoplay=1&rel=0"
                );
            }
            other => panic!("expected video modal, got {:?}", other),
        }
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn test_image_modal_uses_full_image() {
        let mut modal = ModalController::new();
        modal.open_image(&speaker());
        match modal.state() {
            ModalState::Image { profile } => {
                assert_eq!(profile.full_image, "full.jpg");
                assert_eq!(profile.name, "Prof. Ana Silva");
            }
            other => panic!("expected image modal, got {:?}", other),
        }
    }

    #[test]
    fn test_opening_a_modal_replaces_the_previous_one() {
        let mut modal = ModalController::new();
        modal.open_video("abc");
        modal.open_image(&speaker());
        assert!(matches!(modal.state(), ModalState::Image { .. }));
    }

    #[test]
    fn test_toast_replaces_and_dismisses() {
        let mut notifier = Notifier::new(5000);
        notifier.show("Primeira", ToastLevel::Info);
        notifier.show("Segunda", ToastLevel::Success);
        assert_eq!(notifier.active().map(|t| t.message.as_str()), Some("Segunda"));

        notifier.dismiss();
        assert!(notifier.active().is_none());
    }

    #[test]
    fn test_toast_expires() {
        let mut notifier = Notifier::new(0);
        notifier.show("Efémera", ToastLevel::Error);
        assert!(notifier.active().is_none());
        notifier.sweep();
        assert!(notifier.active().is_none());
    }
}
