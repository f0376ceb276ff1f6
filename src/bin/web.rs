//! Single binary web server: index page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT. ROSTER_CSV loads a roster file at start-up (a bad file aborts).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::RwLock;
use tkd_competition_web::{
    read_roster, render_printable, Category, CategoryGender, Competition, CompetitionStatus, Gender,
    Player, Registry, RegistryError, Score, SeedingPolicy,
};

/// In-memory state: roster, competitions and brackets. Nothing is persisted.
type AppState = Data<RwLock<Registry>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    club: String,
    gender: Gender,
    birth_date: NaiveDate,
    weight: f64,
}

#[derive(Deserialize)]
struct CreateCompetitionBody {
    name: String,
    #[serde(default)]
    location: String,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: CompetitionStatus,
}

#[derive(Deserialize)]
struct AddCategoryBody {
    name: String,
    weight_min: f64,
    weight_max: f64,
    age_min: i32,
    age_max: i32,
    #[serde(default)]
    gender: CategoryGender,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: String,
    winner_id: String,
    #[serde(default)]
    score: Option<Score>,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: String,
}

/// Path segment: competition id (e.g. /api/competitions/{id})
#[derive(Deserialize)]
struct CompetitionPath {
    id: String,
}

/// Path segments: competition id and category id
#[derive(Deserialize)]
struct CategoryPath {
    id: String,
    category_id: String,
}

/// Path segments: competition id, category id and group index
#[derive(Deserialize)]
struct GroupPath {
    id: String,
    category_id: String,
    group: usize,
}

fn bad_request(e: &dyn std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn error_response(e: &RegistryError) -> HttpResponse {
    if e.is_not_found() {
        HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
    } else {
        bad_request(e)
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tkd-competition-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// List the roster.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.players())
}

/// Add a player to the roster. Every bracket is regenerated afterwards.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    let player = match body.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => Player::with_id(id, body.name.trim(), body.club.trim(), body.gender, body.birth_date, body.weight),
        None => Player::new(body.name.trim(), body.club.trim(), body.gender, body.birth_date, body.weight),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player(player.clone()) {
        Ok(()) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

/// Remove a player from the roster.
#[delete("/api/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_player(&path.player_id) {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => error_response(&e),
    }
}

/// Edit a player's record (the id in the path is kept). Every bracket is regenerated afterwards.
#[put("/api/players/{player_id}")]
async fn api_update_player(state: AppState, path: Path<PlayerPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    let player = Player::with_id(
        path.player_id.as_str(),
        body.name.trim(),
        body.club.trim(),
        body.gender,
        body.birth_date,
        body.weight,
    );
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_player(player.clone()) {
        Ok(()) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

/// Replace the roster with a CSV upload (`id,name,club,gender,birth_date,weight`).
#[post("/api/players/import")]
async fn api_import_roster(state: AppState, body: web::Bytes) -> HttpResponse {
    let players = match read_roster(body.as_ref()) {
        Ok(players) => players,
        Err(e) => return bad_request(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.replace_roster(players) {
        Ok(()) => HttpResponse::Ok().json(g.players()),
        Err(e) => error_response(&e),
    }
}

#[get("/api/competitions")]
async fn api_list_competitions(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.competitions())
}

/// Create a competition (starts in Registration).
#[post("/api/competitions")]
async fn api_create_competition(state: AppState, body: Json<CreateCompetitionBody>) -> HttpResponse {
    let competition = match Competition::new(body.name.as_str(), body.location.as_str()) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = g.add_competition(competition);
    match g.competition(&id) {
        Ok(c) => HttpResponse::Ok().json(c),
        Err(e) => error_response(&e),
    }
}

#[get("/api/competitions/{id}")]
async fn api_get_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.competition(&path.id) {
        Ok(c) => HttpResponse::Ok().json(c),
        Err(e) => error_response(&e),
    }
}

#[put("/api/competitions/{id}")]
async fn api_update_competition(
    state: AppState,
    path: Path<CompetitionPath>,
    body: Json<CreateCompetitionBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.update_competition(&path.id, &body.name, &body.location) {
        return error_response(&e);
    }
    match g.competition(&path.id) {
        Ok(c) => HttpResponse::Ok().json(c),
        Err(e) => error_response(&e),
    }
}

/// Delete a competition along with its categories and brackets.
#[delete("/api/competitions/{id}")]
async fn api_delete_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_competition(&path.id) {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => error_response(&e),
    }
}

/// Move the competition forward (registration -> active -> completed).
#[put("/api/competitions/{id}/status")]
async fn api_set_competition_status(
    state: AppState,
    path: Path<CompetitionPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.set_competition_status(&path.id, body.status) {
        return error_response(&e);
    }
    match g.competition(&path.id) {
        Ok(c) => HttpResponse::Ok().json(c),
        Err(e) => error_response(&e),
    }
}

#[post("/api/competitions/{id}/categories")]
async fn api_add_category(
    state: AppState,
    path: Path<CompetitionPath>,
    body: Json<AddCategoryBody>,
) -> HttpResponse {
    let category = match Category::new(
        body.name.as_str(),
        (body.weight_min, body.weight_max),
        (body.age_min, body.age_max),
        body.gender,
    ) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_category(&path.id, category) {
        Ok(category_id) => match g.category(&path.id, &category_id) {
            Ok(c) => HttpResponse::Ok().json(c),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// Redefine a category. Its brackets are derived again from the roster.
#[put("/api/competitions/{id}/categories/{category_id}")]
async fn api_update_category(
    state: AppState,
    path: Path<CategoryPath>,
    body: Json<AddCategoryBody>,
) -> HttpResponse {
    let category = match Category::with_id(
        path.category_id.as_str(),
        body.name.as_str(),
        (body.weight_min, body.weight_max),
        (body.age_min, body.age_max),
        body.gender,
    ) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_category(&path.id, category) {
        Ok(()) => match g.category(&path.id, &path.category_id) {
            Ok(c) => HttpResponse::Ok().json(c),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

#[delete("/api/competitions/{id}/categories/{category_id}")]
async fn api_remove_category(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_category(&path.id, &path.category_id) {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => error_response(&e),
    }
}

/// Roster players eligible for a category.
#[get("/api/competitions/{id}/categories/{category_id}/eligible")]
async fn api_eligible_players(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.eligible_players(&path.id, &path.category_id) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(&e),
    }
}

/// All groups of a category (derives brackets on first access).
#[get("/api/competitions/{id}/categories/{category_id}/brackets")]
async fn api_category_brackets(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.category_brackets(&path.id, &path.category_id) {
        Ok(brackets) => HttpResponse::Ok().json(brackets),
        Err(e) => error_response(&e),
    }
}

/// Bracket of one group (0-based index).
#[get("/api/competitions/{id}/categories/{category_id}/groups/{group}")]
async fn api_group_bracket(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.bracket(&path.id, &path.category_id, path.group) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

/// Set the winner of a match; the winner moves into the next round (competition must be active).
#[put("/api/competitions/{id}/categories/{category_id}/groups/{group}/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<GroupPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.record_result(
        &path.id,
        &path.category_id,
        path.group,
        &body.match_id,
        &body.winner_id,
        body.score,
    ) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

/// Printable bracket sheets of a category, one page per group.
#[get("/api/competitions/{id}/categories/{category_id}/print")]
async fn api_print_category(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let name = match g.category(&path.id, &path.category_id) {
        Ok(c) => c.name.clone(),
        Err(e) => return error_response(&e),
    };
    match g.brackets(&path.id, &path.category_id) {
        Ok(views) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_printable(&name, views)),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Shuffled draws when SEEDING=shuffled (optionally SEED=<u64>), roster order otherwise.
fn seeding_from_env() -> SeedingPolicy {
    match std::env::var("SEEDING").as_deref() {
        Ok("shuffled") => match std::env::var("SEED").ok().and_then(|s| s.parse().ok()) {
            Some(seed) => SeedingPolicy::Shuffled { seed },
            None => SeedingPolicy::random(),
        },
        _ => SeedingPolicy::InputOrder,
    }
}

async fn load_roster(registry: &mut Registry, path: &str) -> std::io::Result<()> {
    let data = tokio::fs::read(path).await?;
    let players = read_roster(data.as_slice()).map_err(invalid_data)?;
    registry.replace_roster(players).map_err(invalid_data)
}

fn invalid_data(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
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

    let seeding = seeding_from_env();
    log::info!("Seeding policy: {:?}", seeding);
    let mut registry = Registry::with_settings(seeding, None);

    // A roster that cannot be read or loaded stops start-up.
    if let Ok(path) = std::env::var("ROSTER_CSV") {
        if let Err(e) = load_roster(&mut registry, &path).await {
            log::error!("Could not load roster from {}: {}", path, e);
            return Err(e);
        }
    }

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    let state = Data::new(RwLock::new(registry));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_import_roster)
            .service(api_add_player)
            .service(api_update_player)
            .service(api_remove_player)
            .service(api_list_competitions)
            .service(api_create_competition)
            .service(api_get_competition)
            .service(api_update_competition)
            .service(api_delete_competition)
            .service(api_set_competition_status)
            .service(api_add_category)
            .service(api_update_category)
            .service(api_remove_category)
            .service(api_eligible_players)
            .service(api_category_brackets)
            .service(api_group_bracket)
            .service(api_set_match_winner)
            .service(api_print_category)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
