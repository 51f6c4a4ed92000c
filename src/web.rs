use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::export;
use crate::timetable::{
    Assignment, AssignmentDraft, Day, GridRequest, TimeSlot, TimetableError, TimetableSession,
};

const SESSION_TOKEN_KEY: &str = "token";

// In-memory storage for per-browser timetable sessions, keyed by the random
// token carried in the session cookie
pub struct AppState {
    pub sessions: Mutex<HashMap<String, TimetableSession>>,
}

/// Closed set of notification kinds understood by the frontend toasts
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Serialize)]
pub struct Notice {
    success: bool,
    kind: AlertKind,
    message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Notice { success: true, kind: AlertKind::Success, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Notice { success: false, kind: AlertKind::Error, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Notice { success: true, kind: AlertKind::Warning, message: message.into() }
    }

    fn info(message: impl Into<String>) -> Self {
        Notice { success: true, kind: AlertKind::Info, message: message.into() }
    }
}

impl ResponseError for TimetableError {
    fn status_code(&self) -> StatusCode {
        match self {
            TimetableError::EmptyGrid => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Notice::error(self.to_string()))
    }
}

#[derive(Serialize)]
pub struct GridView {
    days: Vec<Day>,
    slots: Vec<TimeSlot>,
    cells: Vec<GridCell>,
}

#[derive(Serialize)]
pub struct GridCell {
    day: Day,
    start: String,
    assignment: Option<Assignment>,
    is_empty: bool,
}

/// One grid cell submission from the edit modal
#[derive(Deserialize)]
pub struct CellSubmission {
    day: Day,
    start: String,
    #[serde(flatten)]
    entry: AssignmentDraft,
}

/// Addresses an existing cell, e.g. for deletion
#[derive(Deserialize)]
pub struct CellRef {
    day: Day,
    start: String,
}

/// Returns the browser's session token, minting a fresh random one on first
/// contact
fn session_token(session: &Session) -> Result<String> {
    if let Some(token) = session.get::<String>(SESSION_TOKEN_KEY)? {
        return Ok(token);
    }
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    session.insert(SESSION_TOKEN_KEY, &token)?;
    Ok(token)
}

/// Runs `f` against this browser's timetable session, creating it on demand
fn with_session<R>(
    state: &web::Data<AppState>,
    session: &Session,
    f: impl FnOnce(&mut TimetableSession) -> R,
) -> Result<R> {
    let token = session_token(session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let timetable = sessions.entry(token).or_default();
    Ok(f(timetable))
}

fn grid_view(session: &TimetableSession) -> std::result::Result<GridView, TimetableError> {
    let grid = session.require_grid()?;
    let mut cells = Vec::with_capacity(grid.days.len() * grid.slots.len());
    for slot in &grid.slots {
        for &day in &grid.days {
            let assignment = session.assignment(day, &slot.start).cloned();
            cells.push(GridCell {
                day,
                start: slot.start.clone(),
                is_empty: assignment.is_none(),
                assignment,
            });
        }
    }
    Ok(GridView { days: grid.days.clone(), slots: grid.slots.clone(), cells })
}

// Grid generation endpoint
async fn generate_grid(
    req: web::Json<GridRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let view = with_session(&state, &session, |timetable| {
        timetable.generate(&req)?;
        grid_view(timetable)
    })??;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "kind": AlertKind::Success,
        "message": "Timetable generated successfully!",
        "grid": view,
    })))
}

// Current grid endpoint, used to re-render without regenerating
async fn get_grid(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let view = with_session(&state, &session, |timetable| grid_view(timetable))??;
    Ok(HttpResponse::Ok().json(view))
}

// Cell submission endpoint (add or edit)
async fn put_assignment(
    req: web::Json<CellSubmission>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let update = with_session(&state, &session, |timetable| {
        timetable.put_assignment(req.day, &req.start, &req.entry)
    })??;

    let message = if update.updated {
        "Subject updated successfully!"
    } else {
        "Subject added successfully!"
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "kind": AlertKind::Success,
        "message": message,
        "updated": update.updated,
        "cell": GridCell {
            day: update.key.day,
            start: update.key.start.clone(),
            is_empty: false,
            assignment: Some(update.assignment),
        },
    })))
}

// Cell deletion endpoint; deleting an empty cell is a harmless no-op
async fn delete_assignment(
    req: web::Json<CellRef>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let removed = with_session(&state, &session, |timetable| {
        timetable.remove_assignment(req.day, &req.start)
    })?;

    if removed {
        Ok(HttpResponse::Ok().json(Notice::success("Subject deleted successfully!")))
    } else {
        Ok(HttpResponse::Ok().json(Notice::warning("That slot has no subject to delete.")))
    }
}

// Full clear endpoint; the confirmation dialog lives in the frontend
async fn clear_timetable(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let removed = with_session(&state, &session, |timetable| timetable.clear())?;

    if removed == 0 {
        Ok(HttpResponse::Ok().json(Notice::info("Timetable is already empty!")))
    } else {
        Ok(HttpResponse::Ok().json(Notice::success("Timetable cleared successfully!")))
    }
}

// Statistics endpoint
async fn get_stats(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let stats = with_session(&state, &session, |timetable| timetable.statistics())?;
    Ok(HttpResponse::Ok().json(stats))
}

// Styled standalone document download
async fn export_document(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let document = with_session(&state, &session, |timetable| {
        let grid = timetable.require_grid()?;
        Ok::<_, TimetableError>(export::export_html(grid, timetable.store()))
    })??;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export::html::EXPORT_FILENAME),
        ))
        .body(document))
}

// CSV download
async fn export_spreadsheet(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let document = with_session(&state, &session, |timetable| -> Result<String> {
        let grid = timetable.require_grid()?;
        export::export_csv(grid, timetable.store())
            .map_err(actix_web::error::ErrorInternalServerError)
    })??;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export::spreadsheet::EXPORT_FILENAME),
        ))
        .body(document))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { sessions: Mutex::new(HashMap::new()) });

    // Cookie signing key; session state only lives in process memory, so a
    // fresh key per start simply invalidates stale cookies
    let mut key_bytes = [0u8; 64];
    rand::thread_rng().fill(&mut key_bytes[..]);
    let secret_key = Key::from(&key_bytes);

    log::info!("serving timetable maker on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_name("tt_session".to_string())
                    .cookie_secure(false)
                    .build(),
            )
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/api/generate", web::post().to(generate_grid))
            .route("/api/grid", web::get().to(get_grid))
            .route("/api/assignment", web::post().to(put_assignment))
            .route("/api/assignment/delete", web::post().to(delete_assignment))
            .route("/api/clear", web::post().to(clear_timetable))
            .route("/api/stats", web::get().to(get_stats))
            .route("/api/export", web::get().to(export_document))
            .route("/api/export/csv", web::get().to(export_spreadsheet))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
