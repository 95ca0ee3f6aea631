//! Single binary JSON API over the bracket engine. Tournaments live in memory only.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::{
    add_entrant, clear_consolation_result, clear_result, create_tournament,
    record_consolation_result, record_result, remove_entrant, BracketError, Entrant, EntrantId,
    MatchId, SeedingConfig, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct EntrantBody {
    name: String,
    #[serde(default)]
    priority: bool,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    entrants: Vec<EntrantBody>,
    #[serde(default)]
    config: SeedingConfig,
}

fn default_name() -> String {
    "Tournament".to_string()
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: MatchId,
    entrant_id: EntrantId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and entrant id.
#[derive(Deserialize)]
struct TournamentEntrantPath {
    id: TournamentId,
    entrant_id: EntrantId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &BracketError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament, refresh its activity time, apply `f`, and answer with the updated tournament.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), BracketError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Create a tournament and seed its bracket (returns it with id; client stores id for later requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let entrants: Vec<Entrant> = body
        .entrants
        .into_iter()
        .filter(|e| !e.name.trim().is_empty())
        .map(|e| Entrant {
            priority: e.priority,
            ..Entrant::new(e.name.trim())
        })
        .collect();
    let tournament = create_tournament(body.name, entrants, body.config);
    let id = tournament.id;
    log::info!("Created tournament {} with {} entrants", id, tournament.entrants.len());
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Add an entrant; the bracket is reseeded and earlier results are discarded.
#[post("/api/tournaments/{id}/entrants")]
async fn api_add_entrant(state: AppState, path: Path<TournamentPath>, body: Json<EntrantBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| add_entrant(t, &body.name, body.priority).map(|_| ()))
}

/// Remove an entrant; the bracket is reseeded and earlier results are discarded.
#[delete("/api/tournaments/{id}/entrants/{entrant_id}")]
async fn api_remove_entrant(state: AppState, path: Path<TournamentEntrantPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| remove_entrant(t, path.entrant_id))
}

/// Set the winner of a main-bracket match.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| record_result(t, body.match_id, body.entrant_id))
}

/// Clear the winner of a main-bracket match.
#[delete("/api/tournaments/{id}/matches/{match_id}/winner")]
async fn api_clear_match_winner(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| clear_result(t, path.match_id))
}

/// Set the winner of a consolation-bracket match.
#[put("/api/tournaments/{id}/consolation/winner")]
async fn api_set_consolation_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        record_consolation_result(t, body.match_id, body.entrant_id)
    })
}

/// Clear the winner of a consolation-bracket match.
#[delete("/api/tournaments/{id}/consolation/matches/{match_id}/winner")]
async fn api_clear_consolation_winner(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| clear_consolation_result(t, path.match_id))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_entrant)
            .service(api_remove_entrant)
            .service(api_set_match_winner)
            .service(api_clear_match_winner)
            .service(api_set_consolation_winner)
            .service(api_clear_consolation_winner)
    })
    .bind(bind)?
    .run()
    .await
}
