use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub gender: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub population: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Default)]
pub struct Db {
    pub people: BTreeMap<u32, Person>,
    pub planets: BTreeMap<u32, Planet>,
    pub starships: BTreeMap<u32, Starship>,
}

pub type SharedDb = Arc<RwLock<Db>>;

/// 404 with the body the public API uses.
pub struct NotFound;

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response()
    }
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(db: Db) -> Router {
    let db: SharedDb = Arc::new(RwLock::new(db));
    Router::new()
        .route("/people/", get(list_people).post(create_person))
        .route("/people/{id}/", get(get_person))
        .route("/planets/", get(list_planets))
        .route("/planets/{id}/", get(get_planet))
        .route("/starships", get(list_starships))
        .route("/starships/{id}/", get(get_starship))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// The fixture records served by `app()`.
pub fn seed() -> Db {
    let mut db = Db::default();
    for (id, name, height, mass, gender) in [
        (1, "Luke Skywalker", "172", "77", "male"),
        (2, "C-3PO", "167", "75", "n/a"),
        (3, "R2-D2", "96", "32", "n/a"),
        (5, "Leia Organa", "150", "49", "female"),
    ] {
        db.people.insert(
            id,
            Person {
                name: name.to_string(),
                height: height.to_string(),
                mass: mass.to_string(),
                gender: gender.to_string(),
            },
        );
    }
    for (id, name, climate, diameter, population) in [
        (1, "Tatooine", "arid", "10465", "200000"),
        (2, "Alderaan", "temperate", "12500", "2000000000"),
        (3, "Yavin IV", "temperate, tropical", "10200", "1000"),
    ] {
        db.planets.insert(
            id,
            Planet {
                name: name.to_string(),
                climate: climate.to_string(),
                diameter: diameter.to_string(),
                population: population.to_string(),
            },
        );
    }
    for (id, name, model, manufacturer) in [
        (2, "CR90 corvette", "CR90 corvette", "Corellian Engineering Corporation"),
        (3, "Star Destroyer", "Imperial I-class Star Destroyer", "Kuat Drive Yards"),
        (
            9,
            "Death Star",
            "DS-1 Orbital Battle Station",
            "Imperial Department of Military Research, Sienar Fleet Systems",
        ),
        (12, "X-wing", "T-65 X-wing", "Incom Corporation"),
    ] {
        db.starships.insert(
            id,
            Starship {
                name: name.to_string(),
                model: model.to_string(),
                manufacturer: manufacturer.to_string(),
            },
        );
    }
    db
}

fn page<T: Clone>(items: &BTreeMap<u32, T>) -> Page<T> {
    Page {
        count: items.len(),
        next: None,
        previous: None,
        results: items.values().cloned().collect(),
    }
}

async fn list_people(State(db): State<SharedDb>) -> Json<Page<Person>> {
    let db = db.read().await;
    Json(page(&db.people))
}

async fn get_person(
    State(db): State<SharedDb>,
    Path(id): Path<u32>,
) -> Result<Json<Person>, NotFound> {
    let db = db.read().await;
    db.people.get(&id).cloned().map(Json).ok_or(NotFound)
}

async fn create_person(
    State(db): State<SharedDb>,
    Json(input): Json<Person>,
) -> (StatusCode, Json<Person>) {
    let mut db = db.write().await;
    let id = db.people.keys().next_back().map_or(1, |last| last + 1);
    db.people.insert(id, input.clone());
    tracing::debug!(id, name = %input.name, "person created");
    (StatusCode::CREATED, Json(input))
}

async fn list_planets(State(db): State<SharedDb>) -> Json<Page<Planet>> {
    let db = db.read().await;
    Json(page(&db.planets))
}

async fn get_planet(
    State(db): State<SharedDb>,
    Path(id): Path<u32>,
) -> Result<Json<Planet>, NotFound> {
    let db = db.read().await;
    db.planets.get(&id).cloned().map(Json).ok_or(NotFound)
}

async fn list_starships(State(db): State<SharedDb>) -> Json<Page<Starship>> {
    let db = db.read().await;
    Json(page(&db.starships))
}

async fn get_starship(
    State(db): State<SharedDb>,
    Path(id): Path<u32>,
) -> Result<Json<Starship>, NotFound> {
    let db = db.read().await;
    db.starships.get(&id).cloned().map(Json).ok_or(NotFound)
}
