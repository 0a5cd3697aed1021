//! Single binary web server: JSON REST API over the roundnet manager.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (e.g. data).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use roundnet_web::{
    balance_metrics, Algorithm, GameResult, JsonStore, Manager, PlayerId, PlayingDayId,
    RoundnetError, Team,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// Shared state: one manager over the file-backed store.
type AppState = Data<RwLock<Manager<JsonStore>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
    #[serde(default = "default_skill_level")]
    skill_level: u8,
}

fn default_skill_level() -> u8 {
    5
}

#[derive(Deserialize)]
struct CreatePlayingDayBody {
    date: NaiveDate,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct AssignRosterBody {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct GenerateTeamsBody {
    #[serde(default)]
    algorithm: Algorithm,
}

#[derive(Deserialize)]
struct RecordGameBody {
    team_a: [PlayerId; 2],
    team_b: [PlayerId; 2],
    result: GameResult,
    #[serde(default)]
    duration_minutes: Option<u32>,
    #[serde(default)]
    notes: Option<String>,
}

/// Path segment: playing day id (e.g. /api/playing-days/{id})
#[derive(Deserialize)]
struct DayPath {
    id: PlayingDayId,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: Uuid,
}

/// Path segments: two player ids (e.g. /api/partnerships/{a}/{b})
#[derive(Deserialize)]
struct PairPath {
    a: Uuid,
    b: Uuid,
}

/// Map a domain error to a response: unknown ids are 404, storage failures
/// 500, everything else is caller error.
fn error_response(e: &RoundnetError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        RoundnetError::PlayingDayNotFound(_) => HttpResponse::NotFound().json(body),
        RoundnetError::Storage(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "roundnet-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register a player with a name and 1-10 skill level.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player(body.name.trim(), body.skill_level) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

/// List all players.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.players() {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(&e),
    }
}

/// Delete a player (refused while games or playing days reference them).
#[delete("/api/players/{player_id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": path.player_id })),
        Err(e) => error_response(&e),
    }
}

/// Win rate and counters for one player (zeroes for unknown ids).
#[get("/api/players/{player_id}/stats")]
async fn api_player_stats(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.player_stats(path.player_id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Create a playing day (date, location, description).
#[post("/api/playing-days")]
async fn api_add_playing_day(state: AppState, body: Json<CreatePlayingDayBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_playing_day(body.date, body.location.clone(), body.description.clone()) {
        Ok(day) => HttpResponse::Ok().json(day),
        Err(e) => error_response(&e),
    }
}

/// List all playing days.
#[get("/api/playing-days")]
async fn api_list_playing_days(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.playing_days() {
        Ok(days) => HttpResponse::Ok().json(days),
        Err(e) => error_response(&e),
    }
}

/// One playing day with its derived phase and recorded games.
#[get("/api/playing-days/{id}")]
async fn api_get_playing_day(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let day = match g.playing_day(path.id) {
        Ok(day) => day,
        Err(e) => return error_response(&e),
    };
    match g.games_for_day(path.id) {
        Ok(games) => HttpResponse::Ok().json(serde_json::json!({
            "playing_day": day,
            "phase": day.phase(),
            "games": games,
        })),
        Err(e) => error_response(&e),
    }
}

/// Replace the day's roster. Discards any generated partition.
#[put("/api/playing-days/{id}/roster")]
async fn api_assign_roster(
    state: AppState,
    path: Path<DayPath>,
    body: Json<AssignRosterBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.assign_roster(path.id, &body.player_ids) {
        Ok(day) => HttpResponse::Ok().json(day),
        Err(e) => error_response(&e),
    }
}

/// Generate (or regenerate) teams for the day's roster. The response
/// includes balance metrics for the new partition.
#[post("/api/playing-days/{id}/teams")]
async fn api_generate_teams(
    state: AppState,
    path: Path<DayPath>,
    body: Option<Json<GenerateTeamsBody>>,
) -> HttpResponse {
    let algorithm = body.map(|b| b.algorithm).unwrap_or_default();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let day = match g.generate_teams(path.id, algorithm, &mut rand::thread_rng()) {
        Ok(day) => day,
        Err(e) => return error_response(&e),
    };
    let balance = match g.stats_snapshot() {
        Ok(stats) => balance_metrics(&day.generated_teams, &stats),
        Err(e) => return error_response(&e),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "playing_day": day,
        "balance": balance,
    }))
}

/// Record a game outcome against the day's roster.
#[post("/api/playing-days/{id}/games")]
async fn api_record_game(
    state: AppState,
    path: Path<DayPath>,
    body: Json<RecordGameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.record_game(
        path.id,
        Team(body.team_a),
        Team(body.team_b),
        body.result,
        body.duration_minutes,
        body.notes.clone(),
    ) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(&e),
    }
}

/// Games recorded on one playing day.
#[get("/api/playing-days/{id}/games")]
async fn api_list_day_games(state: AppState, path: Path<DayPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.games_for_day(path.id) {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => error_response(&e),
    }
}

/// All recorded games.
#[get("/api/games")]
async fn api_list_games(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.games() {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => error_response(&e),
    }
}

/// Games from the last 30 days, newest first.
#[get("/api/games/recent")]
async fn api_recent_games(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.recent_games(30) {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => error_response(&e),
    }
}

/// All partnership records, recomputed from the game log.
#[get("/api/partnerships")]
async fn api_list_partnerships(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.partnerships() {
        Ok(partnerships) => HttpResponse::Ok().json(partnerships),
        Err(e) => error_response(&e),
    }
}

/// Partnership record for one pair (argument order does not matter).
#[get("/api/partnerships/{a}/{b}")]
async fn api_partnership(state: AppState, path: Path<PairPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.partnership_stats(path.a, path.b) {
        Ok(partnership) => HttpResponse::Ok().json(partnership),
        Err(e) => error_response(&e),
    }
}

/// Dashboard summary: totals, average duration, recent activity.
#[get("/api/summary")]
async fn api_summary(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.summary() {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);

    let store = JsonStore::open(&data_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = Data::new(RwLock::new(Manager::new(store)));

    log::info!(
        "Starting server at http://{}:{} (data dir: {})",
        bind.0,
        bind.1,
        data_dir
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_add_player)
            .service(api_list_players)
            .service(api_delete_player)
            .service(api_player_stats)
            .service(api_add_playing_day)
            .service(api_list_playing_days)
            .service(api_get_playing_day)
            .service(api_assign_roster)
            .service(api_generate_teams)
            .service(api_record_game)
            .service(api_list_day_games)
            .service(api_list_games)
            .service(api_recent_games)
            .service(api_list_partnerships)
            .service(api_partnership)
            .service(api_summary)
    })
    .bind(bind)?
    .run()
    .await
}
