//! # Planogram Server Library
//!
//! HTTP presentation layer for the planogram catalog.
//!
//! ## Module Organization
//! ```text
//! planogram_server/
//! ├── lib.rs          ◄─── You are here (router, startup, shutdown)
//! ├── config.rs       ◄─── File + environment configuration
//! ├── error.rs        ◄─── ApiError and HTTP status mapping
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState shared by all handlers
//! │   └── session.rs  ◄─── Per-browser navigation + flash messages
//! ├── handlers/
//! │   ├── pages.rs    ◄─── GET / and menu navigation
//! │   ├── planogram.rs◄─── create / update / select / delete
//! │   ├── media.rs    ◄─── stored image and QR PNG routes
//! │   └── api.rs      ◄─── JSON read API and health
//! └── views.rs        ◄─── HTML rendering
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use planogram_db::Database;
use state::{AppState, SessionStore};

/// Builds the application router.
///
/// ## Routes
/// ```text
/// GET  /                          current page of the session
/// POST /nav/{page}                menu
/// POST /planograms                create (multipart)
/// POST /planograms/{id}           update (multipart)
/// POST /planograms/{id}/select    edit from the list
/// POST /planograms/{id}/delete    delete from the list
/// GET  /planograms/{id}/image     stored bytes
/// GET  /planograms/{id}/qr.png    QR of the record link
/// GET  /api/planograms[/{id}]     JSON
/// GET  /health                    liveness + database probe
/// ```
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/nav/{page}", post(handlers::pages::navigate))
        .route("/planograms", post(handlers::planogram::create))
        .route("/planograms/{id}", post(handlers::planogram::update))
        .route("/planograms/{id}/select", post(handlers::planogram::select))
        .route("/planograms/{id}/delete", post(handlers::planogram::delete))
        .route("/planograms/{id}/image", get(handlers::media::image))
        .route("/planograms/{id}/qr.png", get(handlers::media::qr_code))
        .route("/api/planograms", get(handlers::api::list_planograms))
        .route("/api/planograms/{id}", get(handlers::api::get_planogram))
        .route("/health", get(handlers::api::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Runs the server until Ctrl+C or SIGTERM.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (RUST_LOG, default info,planogram=debug)        │
/// │  2. Load ServerConfig (defaults → planogram.toml → PLANOGRAM_* env)    │
/// │  3. Open SQLite (WAL) and apply migrations                             │
/// │  4. Build AppState + Router, bind the listener                         │
/// │  5. Serve; on shutdown signal drain requests and close the pool        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting planogram catalog server");

    let config = ServerConfig::load()?;
    let db_config = config.db_config()?;
    info!(
        db_path = ?db_config.database_path,
        port = config.server.port,
        "Configuration loaded"
    );

    let db = Database::new(db_config).await?;
    info!("Database connected and migrations applied");

    let state = AppState::new(
        db.clone(),
        SessionStore::new(config.session_idle()),
        config.record_link(),
    );
    let app = build_router(state, config.server.max_upload_bytes);

    let addr = config.bind_address()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=planogram=trace` - Trace for planogram crates only
/// - Default: `info,planogram=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,planogram=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use image::{ImageFormat, Rgb, RgbImage};
    use planogram_core::{NewPlanogram, Page, RecordLink};
    use planogram_db::DbConfig;
    use std::io::Cursor;
    use tower::ServiceExt;
    use uuid::Uuid;

    const BOUNDARY: &str = "planogram-test-boundary";

    struct TestApp {
        router: Router,
        state: AppState,
    }

    async fn app() -> TestApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = AppState::new(
            db,
            SessionStore::new(chrono::Duration::minutes(30)),
            RecordLink::new("localhost", 8080),
        );
        TestApp {
            router: build_router(state.clone(), 1024 * 1024),
            state,
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn session_of(response: &Response<Body>) -> Uuid {
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        let value = cookie.split(';').next().unwrap().split_once('=').unwrap().1;
        Uuid::parse_str(value).unwrap()
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        session: Option<Uuid>,
        body: Option<Vec<u8>>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = session {
            builder = builder.header(header::COOKIE, format!("{}={}", state::SESSION_COOKIE, id));
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                );
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn shelf_a_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "Shelf A"),
            ("store", "Store1"),
            ("aisle", "Aisle3"),
            ("shelf", "Shelf2"),
        ]
    }

    #[tokio::test]
    async fn test_fresh_session_renders_create_form() {
        let app = app().await;
        let resp = send(&app.router, "GET", "/", None, None).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let session = session_of(&resp);
        assert_eq!(app.state.sessions.nav(session).current_page(), Page::Create);
        assert!(body_text(resp).await.contains("action=\"/planograms\""));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app().await;
        let image = png(4, 3);

        let resp = send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("shelf.PNG", image.as_slice())))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        let session = session_of(&resp);

        let record = app.state.db.planograms().get(1).await.unwrap().unwrap();
        assert_eq!(record.name, "Shelf A");
        assert_eq!(record.image, image);

        // Create does not navigate away
        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Planogram saved"));
        assert!(page.contains("action=\"/planograms\""));

        send(&app.router, "POST", "/nav/list", Some(session), None).await;
        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Store: Store1 | Aisle: Aisle3 | Shelf: Shelf2"));
        assert!(page.contains("/planograms/1/image"));
        assert!(!page.contains("Planogram saved"));
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_rejected() {
        let app = app().await;
        let image = png(2, 2);
        let fields = [("name", "Shelf A"), ("store", ""), ("aisle", "A"), ("shelf", "S")];

        let resp = send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&fields, Some(("a.png", image.as_slice())))),
        )
        .await;
        let session = session_of(&resp);

        assert_eq!(app.state.db.planograms().count().await.unwrap(), 0);
        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("store is required"));
    }

    #[tokio::test]
    async fn test_create_rejects_unsupported_extension() {
        let app = app().await;
        let resp = send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("shelf.gif", b"GIF89a".as_slice())))),
        )
        .await;
        let session = session_of(&resp);

        assert_eq!(app.state.db.planograms().count().await.unwrap(), 0);
        assert!(app
            .state
            .sessions
            .take_flash(session)
            .unwrap()
            .message
            .contains("shelf.gif"));
    }

    #[tokio::test]
    async fn test_select_shows_detail_with_qr() {
        let app = app().await;
        let id = app
            .state
            .db
            .planograms()
            .create(&NewPlanogram {
                name: "Shelf A".into(),
                image: png(6, 5),
                store: "Store1".into(),
                aisle: "Aisle3".into(),
                shelf: "Shelf2".into(),
            })
            .await
            .unwrap();

        let resp = send(&app.router, "POST", &format!("/planograms/{id}/select"), None, None).await;
        let session = session_of(&resp);

        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("value=\"Shelf A\""));
        assert!(page.contains("localhost:8080/1"));
        assert!(page.contains("(6×5)"));

        let qr = send(&app.router, "GET", "/planograms/1/qr.png", None, None).await;
        assert_eq!(qr.status(), StatusCode::OK);
        assert_eq!(qr.headers()[header::CONTENT_TYPE], "image/png");
        let first = axum::body::to_bytes(qr.into_body(), 1024 * 1024).await.unwrap();
        let expected = app.state.qr.encode("localhost:8080/1").unwrap();
        assert_eq!(first.to_vec(), expected);
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_bytes() {
        let app = app().await;
        let image = png(3, 3);
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("aisle3.png", image.as_slice())))),
        )
        .await;

        let fields = [("name", "Shelf A2"), ("store", "Store1"), ("aisle", "Aisle3"), ("shelf", "Shelf2")];
        let resp = send(
            &app.router,
            "POST",
            "/planograms/1",
            None,
            Some(multipart_body(&fields, Some(("", b"".as_slice())))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let record = app.state.db.planograms().get(1).await.unwrap().unwrap();
        assert_eq!(record.name, "Shelf A2");
        assert_eq!(record.image, image);
    }

    #[tokio::test]
    async fn test_update_with_image_replaces_served_bytes() {
        let app = app().await;
        let old_image = png(3, 3);
        let new_image = png(8, 2);
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("old.png", old_image.as_slice())))),
        )
        .await;

        let resp = send(
            &app.router,
            "POST",
            "/planograms/1",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("new.PNG", new_image.as_slice())))),
        )
        .await;
        let session = session_of(&resp);
        assert_eq!(
            app.state.sessions.take_flash(session).unwrap().message,
            "Planogram updated"
        );

        let resp = send(&app.router, "GET", "/planograms/1/image", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let served = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        assert_eq!(served.to_vec(), new_image);
        assert_ne!(served.to_vec(), old_image);
    }

    #[tokio::test]
    async fn test_update_with_unsupported_image_changes_nothing() {
        let app = app().await;
        let image = png(3, 3);
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("a.png", image.as_slice())))),
        )
        .await;

        let fields = [("name", "Shelf Z"), ("store", "Store1"), ("aisle", "Aisle3"), ("shelf", "Shelf2")];
        let resp = send(
            &app.router,
            "POST",
            "/planograms/1",
            None,
            Some(multipart_body(&fields, Some(("shelf.gif", b"GIF89a".as_slice())))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let session = session_of(&resp);

        let record = app.state.db.planograms().get(1).await.unwrap().unwrap();
        assert_eq!(record.image, image);
        assert_eq!(record.name, "Shelf A");

        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("shelf.gif is not an accepted image"));
    }

    #[tokio::test]
    async fn test_update_of_vanished_record_returns_to_list() {
        let app = app().await;
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("a.png", png(2, 2).as_slice())))),
        )
        .await;

        let resp = send(&app.router, "POST", "/planograms/1/select", None, None).await;
        let session = session_of(&resp);
        assert_eq!(app.state.sessions.nav(session).current_page(), Page::Detail);

        // Removed behind the session's back, e.g. by another tool on the same file
        app.state.db.planograms().delete(1).await.unwrap();

        let resp = send(
            &app.router,
            "POST",
            "/planograms/1",
            Some(session),
            Some(multipart_body(&shelf_a_fields(), None)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(app.state.sessions.nav(session).current_page(), Page::List);
        assert_eq!(app.state.db.planograms().count().await.unwrap(), 0);

        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Planogram not found: 1"));
        assert!(page.contains("No planograms yet."));
    }

    #[tokio::test]
    async fn test_delete_forgets_selection() {
        let app = app().await;
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("a.png", png(2, 2).as_slice())))),
        )
        .await;

        let resp = send(&app.router, "POST", "/planograms/1/select", None, None).await;
        let session = session_of(&resp);
        send(&app.router, "POST", "/planograms/1/delete", Some(session), None).await;

        assert!(app.state.db.planograms().get(1).await.unwrap().is_none());
        assert_eq!(app.state.sessions.nav(session).current_page(), Page::List);

        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Planogram deleted"));
        assert!(page.contains("No planograms yet."));
    }

    #[tokio::test]
    async fn test_detail_of_missing_record_falls_back_to_list() {
        let app = app().await;
        let resp = send(&app.router, "POST", "/planograms/42/select", None, None).await;
        let session = session_of(&resp);

        let resp = send(&app.router, "GET", "/", Some(session), None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(app.state.sessions.nav(session).current_page(), Page::List);

        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Planogram not found: 42"));
    }

    #[tokio::test]
    async fn test_image_route() {
        let app = app().await;
        let image = png(5, 4);
        let repo = app.state.db.planograms();
        let good = repo
            .create(&NewPlanogram {
                name: "Good".into(),
                image: image.clone(),
                store: "S".into(),
                aisle: "A".into(),
                shelf: "S".into(),
            })
            .await
            .unwrap();
        let bad = repo
            .create(&NewPlanogram {
                name: "Bad".into(),
                image: b"not an image".to_vec(),
                store: "S".into(),
                aisle: "A".into(),
                shelf: "S".into(),
            })
            .await
            .unwrap();

        let resp = send(&app.router, "GET", &format!("/planograms/{good}/image"), None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        assert_eq!(bytes.to_vec(), image);

        let resp = send(&app.router, "GET", &format!("/planograms/{bad}/image"), None, None).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = send(&app.router, "GET", "/planograms/99/image", None, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&app.router, "GET", "/planograms/abc/image", None, None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_api_and_health() {
        let app = app().await;
        send(
            &app.router,
            "POST",
            "/planograms",
            None,
            Some(multipart_body(&shelf_a_fields(), Some(("a.png", png(7, 2).as_slice())))),
        )
        .await;

        let resp = send(&app.router, "GET", "/api/planograms", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["imageUrl"], "/planograms/1/image");

        let resp = send(&app.router, "GET", "/api/planograms/1", None, None).await;
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["name"], "Shelf A");
        assert_eq!(json["recordUrl"], "localhost:8080/1");
        assert_eq!(json["image"]["width"], 7);

        let resp = send(&app.router, "GET", "/api/planograms/2", None, None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");

        let resp = send(&app.router, "GET", "/health", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["migrations"]["total"], 1);
        assert_eq!(json["migrations"]["applied"], 1);
    }

    #[tokio::test]
    async fn test_health_degrades_after_close() {
        let app = app().await;
        app.state.db.close().await;

        let resp = send(&app.router, "GET", "/health", None, None).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["database"], false);
        assert!(json["migrations"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_page_flashes_error() {
        let app = app().await;
        let resp = send(&app.router, "POST", "/nav/settings", None, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let session = session_of(&resp);

        assert_eq!(app.state.sessions.nav(session).current_page(), Page::Create);
        let page = body_text(send(&app.router, "GET", "/", Some(session), None).await).await;
        assert!(page.contains("Page not found: settings"));
    }
}
