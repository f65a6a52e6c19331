use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::PlannerConfig;
use crate::display::format_event;
use crate::error::RosterError;
use crate::schedule::{Assignment, DayType, EventId};
use crate::season::Season;

pub const ADMIN_HEADER: &str = "X-Admin-Password";

/// Shared season behind a lock; every request sees a consistent schedule
pub struct AppState {
    pub season: Mutex<Season>,
    pub config: PlannerConfig,
    pub admin_password: String,
}

impl AppState {
    pub fn new(season: Season, config: PlannerConfig, admin_password: String) -> Self {
        AppState {
            season: Mutex::new(season),
            config,
            admin_password,
        }
    }

    fn season(&self) -> Result<MutexGuard<'_, Season>> {
        self.season
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("season state poisoned"))
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    event: EventId,
    person: String,
    available: bool,
}

#[derive(Deserialize)]
pub struct WithdrawalRequest {
    event: EventId,
    person: String,
    withdrawn: bool,
}

#[derive(Deserialize)]
pub struct PreferenceRequest {
    person: String,
    opponent: Option<String>,
}

#[derive(Deserialize)]
pub struct AcceptRequest {
    event: EventId,
    person: String,
}

#[derive(Serialize)]
pub struct ScheduleRow {
    event: EventId,
    label: String,
    opponent: String,
    day_type: DayType,
    high_profile: bool,
    assignment: Assignment,
}

fn authorized(req: &HttpRequest, state: &AppState) -> bool {
    req.headers()
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |password| password == state.admin_password)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

fn bad_request(err: RosterError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": err.to_string()}))
}

fn schedule_rows(season: &Season) -> Option<Vec<ScheduleRow>> {
    let schedule = season.schedule()?;
    let rows = season
        .events()
        .iter()
        .zip(schedule.assignments.iter())
        .enumerate()
        .map(|(event_id, (event, assignment))| ScheduleRow {
            event: event_id,
            label: format_event(event),
            opponent: event.opponent.clone(),
            day_type: event.day_type,
            high_profile: event.high_profile,
            assignment: assignment.clone(),
        })
        .collect();
    Some(rows)
}

async fn admin_login(req: web::Json<LoginRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let season = state.season()?;
    match schedule_rows(&season) {
        Some(rows) => Ok(HttpResponse::Ok().json(rows)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

async fn get_summary(state: web::Data<AppState>) -> Result<HttpResponse> {
    let season = state.season()?;
    match season.summary() {
        Ok(Some(summary)) => Ok(HttpResponse::Ok().json(summary)),
        Ok(None) => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn get_proposals(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut season = state.season()?;
    match season.proposals() {
        Ok(feed) => Ok(HttpResponse::Ok().json(feed)),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn run_plan(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !authorized(&req, &state) {
        return Ok(unauthorized());
    }
    let mut season = state.season()?;
    if let Err(e) = season.plan() {
        return Ok(bad_request(e));
    }
    info!("schedule regenerated through the API");
    Ok(HttpResponse::Ok().json(schedule_rows(&season)))
}

async fn set_availability(
    req: HttpRequest,
    body: web::Json<AvailabilityRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !authorized(&req, &state) {
        return Ok(unauthorized());
    }
    let mut season = state.season()?;
    match season.set_available(body.event, &body.person, body.available) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn set_withdrawal(
    req: HttpRequest,
    body: web::Json<WithdrawalRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !authorized(&req, &state) {
        return Ok(unauthorized());
    }
    let mut season = state.season()?;
    match season.set_withdrawn(body.event, &body.person, body.withdrawn) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn set_preference(
    req: HttpRequest,
    body: web::Json<PreferenceRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !authorized(&req, &state) {
        return Ok(unauthorized());
    }
    if let Some(opponent) = &body.opponent {
        if !state.config.is_top_opponent(opponent) {
            return Ok(bad_request(RosterError::InvalidConfig(format!("{} is not a top opponent", opponent))));
        }
    }
    let mut season = state.season()?;
    match season.set_preference(&body.person, body.opponent.clone()) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn accept_proposal(
    req: HttpRequest,
    body: web::Json<AcceptRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !authorized(&req, &state) {
        return Ok(unauthorized());
    }
    let mut season = state.season()?;
    match season.accept(body.event, &body.person) {
        Ok(substitution) => Ok(HttpResponse::Ok().json(substitution)),
        Err(e) => Ok(bad_request(e)),
    }
}

/// Registers every API route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/summary", web::get().to(get_summary))
        .route("/api/proposals", web::get().to(get_proposals))
        .route("/api/proposals/accept", web::post().to(accept_proposal))
        .route("/api/plan", web::post().to(run_plan))
        .route("/api/availability", web::post().to(set_availability))
        .route("/api/withdrawal", web::post().to(set_withdrawal))
        .route("/api/preference", web::post().to(set_preference));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
