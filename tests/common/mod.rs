//! Local stand-in for the Star Wars API used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use swapi_console::cli::Config;
use swapi_console::data::SwapiClient;
use swapi_console::orchestrator::Orchestrator;
use swapi_console::state::SharedState;
use swapi_console::ui::BufferConsole;

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// Serves canned responses keyed by endpoint and records every request.
#[derive(Clone, Default)]
pub struct MockApi {
    routes: Arc<Mutex<HashMap<String, MockResponse>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(self, endpoint: &str, status: StatusCode, body: String, delay: Duration) -> Self {
        self.routes.lock().insert(
            endpoint.to_string(),
            MockResponse {
                status,
                body,
                delay,
            },
        );
        self
    }

    /// 200 with a JSON body
    pub fn json(self, endpoint: &str, body: Value) -> Self {
        self.insert(endpoint, StatusCode::OK, body.to_string(), Duration::ZERO)
    }

    /// Any status with a raw body
    pub fn raw(self, endpoint: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.insert(endpoint, status, body.to_string(), Duration::ZERO)
    }

    /// 200 with a JSON body, sent only after `delay`
    pub fn delayed(self, endpoint: &str, body: Value, delay: Duration) -> Self {
        self.insert(endpoint, StatusCode::OK, body.to_string(), delay)
    }

    /// Every endpoint a full cycle touches for ids `ids`
    pub fn with_full_api(mut self, ids: &[u32]) -> Self {
        for &id in ids {
            self = self
                .json(&format!("people/{}", id), person(id))
                .json(&format!("vehicles/{}", id), vehicle(id));
        }
        self.json("starships/?page=1", starships())
            .json("planets/?page=1", planets())
            .json("films/", films())
    }

    /// Endpoints requested so far, in order
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().clone()
    }

    pub fn hit_count(&self, endpoint: &str) -> usize {
        self.hits.lock().iter().filter(|hit| *hit == endpoint).count()
    }

    /// Starts serving on a free port and returns the base URL to configure
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(serve).with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/", addr)
    }
}

async fn serve(State(api): State<MockApi>, uri: Uri) -> Response {
    let full = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let endpoint = full.strip_prefix("/api/").unwrap_or(&full).to_string();

    api.hits.lock().push(endpoint.clone());
    let canned = api.routes.lock().get(&endpoint).cloned();

    match canned {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (
                canned.status,
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not found"}"#.to_string(),
        )
            .into_response(),
    }
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
        start_id: 1,
        ..Config::default()
    }
}

pub fn client_for(config: Config) -> SwapiClient {
    SwapiClient::new(SharedState::new(config)).expect("client should build")
}

pub fn orchestrator_for(config: Config) -> (Orchestrator, Arc<BufferConsole>) {
    let console = Arc::new(BufferConsole::new());
    let orchestrator = Orchestrator::new(client_for(config), console.clone());
    (orchestrator, console)
}

pub fn person(id: u32) -> Value {
    json!({
        "name": format!("Character {}", id),
        "height": "172",
        "mass": "77",
        "birth_year": "19BBY",
        "films": ["https://swapi.dev/api/films/1/"],
        "url": format!("https://swapi.dev/api/people/{}/", id)
    })
}

pub fn vehicle(id: u32) -> Value {
    json!({
        "name": format!("Vehicle {}", id),
        "model": "Digger Crawler",
        "manufacturer": "Corellia Mining Corporation",
        "cost_in_credits": "150000",
        "max_atmosphering_speed": "30"
    })
}

pub fn starships() -> Value {
    json!({
        "count": 36,
        "next": "https://swapi.dev/api/starships/?page=2",
        "results": [
            { "name": "CR90 corvette", "model": "CR90 corvette" },
            { "name": "Star Destroyer", "model": "Imperial I-class Star Destroyer" },
            { "name": "Sentinel-class landing craft", "model": "Sentinel-class landing craft" },
            { "name": "Death Star", "model": "DS-1 Orbital Battle Station" }
        ]
    })
}

pub fn planets() -> Value {
    json!({
        "count": 60,
        "results": [
            { "name": "Coruscant", "population": "1000000000000", "diameter": "12240" },
            { "name": "Tatooine", "population": "200000", "diameter": "10465" },
            { "name": "Hoth", "population": "unknown", "diameter": "7200" }
        ]
    })
}

pub fn films() -> Value {
    json!({
        "count": 3,
        "results": [
            { "title": "Return of the Jedi", "release_date": "1983-05-25", "director": "Richard Marquand" },
            { "title": "A New Hope", "release_date": "1977-05-25", "director": "George Lucas" },
            { "title": "The Empire Strikes Back", "release_date": "1980-05-21", "director": "Irvin Kershner" }
        ]
    })
}
