//! Single binary web server exposing the Swiss tournament API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//! SWISS_DATA_FILE (e.g. /var/lib/swiss.json) keeps a JSON snapshot across restarts.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use swiss_tournament::{MemoryStore, PlayerId, SwissTournament, TournamentError};

type AppState = Data<SwissTournament<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct RegisteredResponse {
    id: PlayerId,
}

#[derive(serde::Serialize)]
struct CountResponse {
    count: usize,
}

/// Query string: `?scope=<tournament id>`; absent means global / all scopes.
#[derive(Deserialize)]
struct ScopeQuery {
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    name: String,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Deserialize)]
struct EnrollPlayerBody {
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Deserialize)]
struct ReportMatchBody {
    winner: PlayerId,
    loser: PlayerId,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    is_tie: bool,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::UnknownPlayer { .. } => HttpResponse::NotFound().json(body),
        TournamentError::DuplicateRegistration { .. } | TournamentError::OddPlayerCount(_) => {
            HttpResponse::Conflict().json(body)
        }
        TournamentError::SelfMatch(_)
        | TournamentError::EmptyPlayerName
        | TournamentError::InvalidRoster { .. } => HttpResponse::BadRequest().json(body),
        TournamentError::ExportFailed(_) => HttpResponse::InternalServerError().json(body),
        TournamentError::StoreUnavailable(_) => {
            log::error!("{}", e);
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament",
    })
}

/// Register a new player (into a tournament if `scope` is given).
#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<RegisterPlayerBody>) -> HttpResponse {
    match state.register_player(&body.name, body.scope.as_deref()) {
        Ok(id) => HttpResponse::Ok().json(RegisteredResponse { id }),
        Err(e) => error_response(&e),
    }
}

/// Number of players in a tournament, or of all players.
#[get("/api/players/count")]
async fn api_count_players(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.count_players(query.scope.as_deref()) {
        Ok(count) => HttpResponse::Ok().json(CountResponse { count }),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players/{player_id}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    match state.player(path.player_id) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

/// Register an existing player into another tournament.
#[post("/api/players/{player_id}/enroll")]
async fn api_enroll_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<EnrollPlayerBody>,
) -> HttpResponse {
    match state.enroll_player(path.player_id, body.scope.as_deref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Remove players of a tournament (or everything when no scope is given).
#[delete("/api/players")]
async fn api_delete_players(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.delete_players(query.scope.as_deref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Register every player of a CSV roster (`name` column) in one go.
#[post("/api/roster")]
async fn api_import_roster(state: AppState, query: Query<ScopeQuery>, body: String) -> HttpResponse {
    match state.import_roster(body.as_bytes(), query.scope.as_deref()) {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(e) => error_response(&e),
    }
}

#[post("/api/matches")]
async fn api_report_match(state: AppState, body: Json<ReportMatchBody>) -> HttpResponse {
    match state.report_match(body.winner, body.loser, body.scope.as_deref(), body.is_tie) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(&e),
    }
}

#[get("/api/matches")]
async fn api_match_history(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.match_history(query.scope.as_deref()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Remove match results and zero the standings (players stay registered).
#[delete("/api/matches")]
async fn api_delete_matches(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.delete_matches(query.scope.as_deref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.player_standings(query.scope.as_deref()) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(&e),
    }
}

#[get("/api/standings.csv")]
async fn api_standings_csv(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    let mut csv = Vec::new();
    match state.export_standings(query.scope.as_deref(), &mut csv) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// Next-round pairings; 409 when the field is odd.
#[get("/api/pairings")]
async fn api_pairings(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.swiss_pairings(query.scope.as_deref()) {
        Ok(pairings) => HttpResponse::Ok().json(pairings),
        Err(e) => error_response(&e),
    }
}

/// `count` is registered before `{player_id}` so it is not parsed as an id.
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_register_player)
        .service(api_count_players)
        .service(api_get_player)
        .service(api_enroll_player)
        .service(api_delete_players)
        .service(api_import_roster)
        .service(api_report_match)
        .service(api_match_history)
        .service(api_delete_matches)
        .service(api_standings)
        .service(api_standings_csv)
        .service(api_pairings);
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

    let store = match std::env::var("SWISS_DATA_FILE") {
        Ok(path) => {
            log::info!("Using snapshot file {}", path);
            MemoryStore::open(path).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
        }
        Err(_) => MemoryStore::new(),
    };
    let state = Data::new(SwissTournament::new(store));

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await
}
