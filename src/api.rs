//! # API Server Module
//!
//! ## Purpose
//! HTTP server exposing the rendered page, the episode filter and the page
//! interactions (modals, forms) as endpoints, with JSON responses for
//! everything the page layer needs to redraw.
//!
//! ## Input/Output Specification
//! - **Input**: HTTP requests with search queries, form fields, interaction
//!   events
//! - **Output**: Rendered HTML for the index, JSON for everything else
//! - **Endpoints**: Page, search, forms, modal transitions, state, health
//!
//! ## Key Features
//! - CORS support for web frontends
//! - Structured error responses
//! - Fail-soft handling: a bad query degrades to an error payload, never a
//!   crash

use crate::errors::{Result, SiteError};
use crate::forms::{ContactSubmission, NewsletterSubmission};
use crate::search::FilterOutcome;
use crate::state::ModalState;
use actix_cors::Cors;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};

/// Application state wrapper for the HTTP server
pub struct ApiServer {
    app_state: crate::AppState,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Search response payload
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: &'static str,
    pub query: String,
    pub total_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_html: Option<String>,
    pub query_time_ms: u64,
}

/// Form submission response payload
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub message: String,
    pub level: crate::state::ToastLevel,
    pub reset_form: bool,
}

/// Video modal open request
#[derive(Debug, Deserialize)]
pub struct VideoModalRequest {
    pub video_id: Option<String>,
}

/// Speaker photo modal open request
#[derive(Debug, Deserialize)]
pub struct ImageModalRequest {
    pub speaker_name: String,
}

/// Accordion toggle request
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub section_id: String,
}

/// Snapshot of the transient page state
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub query: String,
    pub modal: ModalState,
    pub toast: Option<crate::state::Toast>,
    pub open_sections: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub episodes_indexed: usize,
    pub mode: crate::config::SiteMode,
}

impl ApiServer {
    /// Create new API server
    pub fn new(app_state: crate::AppState) -> Self {
        Self { app_state }
    }

    /// Run the API server until shutdown
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!(
            "{}:{}",
            self.app_state.config.server.host, self.app_state.config.server.port
        );
        let enable_cors = self.app_state.config.server.enable_cors;

        tracing::info!("Starting API server on {}", bind_addr);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(self.app_state.clone()))
                .wrap(Condition::new(enable_cors, Cors::permissive()))
                .route("/", web::get().to(index_handler))
                .route("/search", web::get().to(search_handler))
                .route("/contact", web::post().to(contact_handler))
                .route("/newsletter", web::post().to(newsletter_handler))
                .route("/modal/video", web::post().to(video_modal_handler))
                .route("/modal/image", web::post().to(image_modal_handler))
                .route("/modal/close", web::post().to(close_modal_handler))
                .route("/accordion/toggle", web::post().to(toggle_handler))
                .route("/state", web::get().to(state_handler))
                .route("/health", web::get().to(health_handler))
        })
        .bind(&bind_addr)
        .map_err(|e| SiteError::Internal {
            message: format!("Failed to bind server to {}: {}", bind_addr, e),
        })?
        .run();

        server.await.map_err(|e| SiteError::Internal {
            message: format!("Server error: {}", e),
        })?;

        Ok(())
    }
}

/// Serve the rendered page
async fn index_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"pt\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Lexcast - Podcast de Direito</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        app_state.page.body_html
    );
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Filter endpoint. Runs one filter pass, records the query and, when the
/// consolidated block takes over the view, collapses all sections.
async fn search_handler(
    app_state: web::Data<crate::AppState>,
    params: web::Query<SearchParams>,
) -> ActixResult<HttpResponse> {
    let start_time = std::time::Instant::now();

    let outcome = match app_state.filter.filter(&params.q, &app_state.page.index) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Rejected search query: {}", e);
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid search query",
                "message": e.to_string(),
            })));
        }
    };

    {
        let mut controller = app_state.controller.write();
        controller.query.query = params.q.trim().to_string();
        if matches!(outcome, FilterOutcome::Consolidated { .. }) {
            controller.accordion.collapse_all();
        }
    }

    let query_time_ms = start_time.elapsed().as_millis() as u64;
    let query = params.q.trim().to_string();

    let response = match outcome {
        FilterOutcome::ShowAll => SearchResponse {
            outcome: "show_all",
            query,
            total_matches: app_state.page.index.len(),
            visible: None,
            matched: None,
            results_html: None,
            message_html: None,
            query_time_ms,
        },
        FilterOutcome::Filtered { visible } => SearchResponse {
            outcome: "filtered",
            query,
            total_matches: visible.len(),
            visible: Some(visible),
            matched: None,
            results_html: None,
            message_html: None,
            query_time_ms,
        },
        FilterOutcome::Consolidated {
            results_html,
            matched,
        } => SearchResponse {
            outcome: "consolidated",
            query,
            total_matches: matched.len(),
            visible: None,
            matched: Some(matched),
            results_html: Some(results_html),
            message_html: None,
            query_time_ms,
        },
        FilterOutcome::NoResults {
            query,
            message_html,
        } => SearchResponse {
            outcome: "no_results",
            query,
            total_matches: 0,
            visible: None,
            matched: None,
            results_html: None,
            message_html: Some(message_html),
            query_time_ms,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Contact form endpoint. Validation failures are part of the normal flow,
/// so the response is always 200 with the toast payload.
async fn contact_handler(
    app_state: web::Data<crate::AppState>,
    submission: web::Json<ContactSubmission>,
) -> ActixResult<HttpResponse> {
    let outcome = submission.validate();
    app_state
        .controller
        .write()
        .notifier
        .show(outcome.message.clone(), outcome.level);

    Ok(HttpResponse::Ok().json(FormResponse {
        message: outcome.message,
        level: outcome.level,
        reset_form: outcome.reset_form,
    }))
}

/// Newsletter form endpoint
async fn newsletter_handler(
    app_state: web::Data<crate::AppState>,
    submission: web::Json<NewsletterSubmission>,
) -> ActixResult<HttpResponse> {
    let outcome = submission.validate();
    app_state
        .controller
        .write()
        .notifier
        .show(outcome.message.clone(), outcome.level);

    Ok(HttpResponse::Ok().json(FormResponse {
        message: outcome.message,
        level: outcome.level,
        reset_form: outcome.reset_form,
    }))
}

/// Open the video modal. A missing identifier falls back to the configured
/// default video.
async fn video_modal_handler(
    app_state: web::Data<crate::AppState>,
    request: web::Json<VideoModalRequest>,
) -> ActixResult<HttpResponse> {
    let video_id = request
        .video_id
        .clone()
        .unwrap_or_else(|| app_state.config.render.fallback_video_id.clone());

    let mut controller = app_state.controller.write();
    controller.modal.open_video(&video_id);

    Ok(HttpResponse::Ok().json(controller.modal.state()))
}

/// Open the speaker photo enlargement for a catalog speaker
async fn image_modal_handler(
    app_state: web::Data<crate::AppState>,
    request: web::Json<ImageModalRequest>,
) -> ActixResult<HttpResponse> {
    let speaker = app_state.catalog.speakers().find(|s| s.name == request.speaker_name);

    match speaker {
        Some(speaker) => {
            let mut controller = app_state.controller.write();
            controller.modal.open_image(speaker);
            Ok(HttpResponse::Ok().json(controller.modal.state()))
        }
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Unknown speaker",
            "speaker_name": request.speaker_name,
        }))),
    }
}

/// Close whichever modal is open
async fn close_modal_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let mut controller = app_state.controller.write();
    controller.modal.close();
    Ok(HttpResponse::Ok().json(controller.modal.state()))
}

/// Toggle one accordion section
async fn toggle_handler(
    app_state: web::Data<crate::AppState>,
    request: web::Json<ToggleRequest>,
) -> ActixResult<HttpResponse> {
    if !app_state
        .page
        .section_ids
        .iter()
        .any(|id| id == &request.section_id)
    {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Unknown section",
            "section_id": request.section_id,
        })));
    }

    let mut controller = app_state.controller.write();
    let open = controller.accordion.toggle(&request.section_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "section_id": request.section_id,
        "open": open,
    })))
}

/// Snapshot of the current transient state
async fn state_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let mut controller = app_state.controller.write();
    controller.notifier.sweep();

    let response = StateResponse {
        query: controller.query.query.clone(),
        modal: controller.modal.state().clone(),
        toast: controller.notifier.active().cloned(),
        open_sections: controller.accordion.open_count(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Health check endpoint handler
async fn health_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        episodes_indexed: app_state.page.index.len(),
        mode: app_state.config.render.mode,
    };

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn test_state() -> crate::AppState {
        crate::AppState::from_config(crate::Config::default()).unwrap()
    }

    #[actix_web::test]
    async fn test_search_endpoint_consolidates() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/search", web::get().to(search_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/search?q=contrat")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["outcome"], "consolidated");
        assert!(body["total_matches"].as_u64().unwrap() >= 2);
        assert!(body["results_html"]
            .as_str()
            .unwrap()
            .contains("Resultados da Pesquisa"));
    }

    #[actix_web::test]
    async fn test_empty_query_shows_all() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/search", web::get().to(search_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/search?q=").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], "show_all");
    }

    #[actix_web::test]
    async fn test_contact_validation_flow_is_200() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/contact", web::post().to(contact_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/contact")
            .set_json(serde_json::json!({
                "name": "Ana",
                "email": "não-é-email",
                "message": "Olá"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Por favor, insira um email válido.");
        assert_eq!(body["reset_form"], false);
    }

    #[actix_web::test]
    async fn test_health_reports_index_size() {
        let state = test_state();
        let expected = state.page.index.len();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/health", web::get().to(health_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["episodes_indexed"].as_u64().unwrap() as usize, expected);
    }
}
