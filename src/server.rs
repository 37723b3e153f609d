//! # HTTP Service
//!
//! Exposes a [`PlacementSession`] over HTTP:
//!
//! | Route | Method | Response |
//! |-------|--------|----------|
//! | `/` | GET | greeting pointing at `/readme` |
//! | `/readme` | GET | HTML route documentation |
//! | `/placeLogo` | POST | `{ "image": url }` or `{ "error": ... }` |
//! | `/<public_path>/*` | GET | the generated images, from `output_dir` |
//!
//! Any other path redirects to `/readme`.
//!
//! `/placeLogo` keeps the three outcomes apart by status: 200 when the logo
//! was placed, 422 when no corner qualified, 400 for an invalid body and 500
//! when fetching or processing failed.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::PlacementError;
use crate::session::{PlacementOutcome, PlacementRequest, PlacementSession, failure_response};

const GREETING: &str = "Hello To Logo Placer! Please go to /readme for full documentations";

const README: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Logo Placer</title>
</head>
<body>
  <h1>Hello to Logo Placer!</h1>
  <h2>Routes</h2>
  <p><code>POST /placeLogo</code> with a JSON body:</p>
  <ol>
    <li><code>image</code> (string): image the logo is placed on</li>
    <li><code>logo</code> (string): logo for dark backgrounds</li>
    <li><code>dark_logo</code> (string, optional): logo for light backgrounds</li>
  </ol>
  <p>References may be http(s) URLs, server-side paths or base64 data URIs.</p>
  <p>Responds with <code>{"image": "&lt;url&gt;"}</code>, or <code>{"error": "..."}</code>
  with status 422 when no suitable location exists.</p>
</body>
</html>"#;

/// JSON body of `POST /placeLogo`.
///
/// Missing fields deserialize as empty so they fail request validation with
/// the same message as blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceLogoBody {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, alias = "darkLogo")]
    pub dark_logo: Option<String>,
}

impl From<PlaceLogoBody> for PlacementRequest {
    fn from(body: PlaceLogoBody) -> Self {
        let request = PlacementRequest::new(body.image, body.logo);
        match body.dark_logo {
            Some(dark) => request.with_dark_logo(dark),
            None => request,
        }
    }
}

/// Routes for `session`, with its output directory served under its public route.
pub fn router(session: PlacementSession) -> Router {
    let images = format!("/{}", session.writer().public_route());
    let files = ServeDir::new(session.writer().output_dir());

    Router::new()
        .route("/", get(index))
        .route("/readme", get(readme))
        .route("/placeLogo", post(place_logo))
        .nest_service(&images, files)
        .fallback(to_readme)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(session))
}

async fn index() -> &'static str {
    GREETING
}

async fn readme() -> Html<&'static str> {
    Html(README)
}

async fn to_readme() -> Redirect {
    Redirect::to("/readme")
}

async fn place_logo(
    State(session): State<Arc<PlacementSession>>,
    Json(body): Json<PlaceLogoBody>,
) -> (StatusCode, Json<serde_json::Value>) {
    let request = PlacementRequest::from(body);
    if let Err(e) = request.validate() {
        warn!(category = e.category(), "Rejected placement request: {}", e);
        let message = match e {
            PlacementError::InputValidation { reason, .. } => reason,
            other => other.to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message })));
    }

    match session.place(&request).await {
        Some(outcome @ PlacementOutcome::Placed(_)) => (StatusCode::OK, Json(outcome.to_response())),
        Some(outcome @ PlacementOutcome::NoPlacementFound) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(outcome.to_response()))
        }
        None => (StatusCode::INTERNAL_SERVER_ERROR, Json(failure_response())),
    }
}
