//! Text renderers for each resource kind
//!
//! Renderers are pure: they take a cached body and return the lines to print.
//! They never mutate the body; the orchestrator writes the lines to a console
//! and accounts for the payload size.

use chrono::NaiveDate;
use serde_json::Value;

use crate::data::{page, view, Film, Person, Planet, Starship, Vehicle};

/// Starships printed per cycle
pub const STARSHIP_LIMIT: usize = 3;

/// A planet must have strictly more inhabitants than this to be listed
pub const PLANET_MIN_POPULATION: u64 = 1_000_000_000;

/// A planet must be strictly wider than this (km) to be listed
pub const PLANET_MIN_DIAMETER: u64 = 10_000;

/// Parses an API count such as `"2000000000"`. Values like `"unknown"` are `None`.
fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Renders a single character
pub fn render_character(body: &Value) -> Vec<String> {
    let person: Person = view(body);
    vec![
        format!("Character: {}", person.name),
        format!("  Height: {}", person.height),
        format!("  Mass: {}", person.mass),
        format!("  Birth year: {}", person.birth_year),
        format!("  Appears in {} film(s)", person.films.len()),
    ]
}

/// Renders the first few starships of a collection page in server order
pub fn render_starships(body: &Value) -> Vec<String> {
    let page = page::<Starship>(body);
    let mut lines = vec![format!(
        "Starships ({} total, showing up to {}):",
        page.count.unwrap_or(page.results.len() as u64),
        STARSHIP_LIMIT
    )];

    for ship in page.results.iter().take(STARSHIP_LIMIT) {
        lines.push(format!("  {} ({})", ship.name, ship.model));
        lines.push(format!("    Manufacturer: {}", ship.manufacturer));
        lines.push(format!("    Hyperdrive rating: {}", ship.hyperdrive_rating));
    }

    lines
}

/// Whether a planet is both populous and large
///
/// Both thresholds must be exceeded. JSON numbers and numeric strings both
/// count; a value such as `"unknown"` never matches.
pub fn is_notable_planet(planet: &Planet) -> bool {
    let populous = parse_count(&planet.population).is_some_and(|p| p > PLANET_MIN_POPULATION);
    let large = parse_count(&planet.diameter).is_some_and(|d| d > PLANET_MIN_DIAMETER);
    populous && large
}

/// Planets from a collection page that pass `is_notable_planet`, in server order
pub fn notable_planets(body: &Value) -> Vec<Planet> {
    page::<Planet>(body)
        .results
        .into_iter()
        .filter(is_notable_planet)
        .collect()
}

/// Renders the populous, large planets of a collection page
pub fn render_planets(body: &Value) -> Vec<String> {
    let planets = notable_planets(body);
    let mut lines = vec![format!(
        "Planets with population > {} and diameter > {} km: {}",
        PLANET_MIN_POPULATION,
        PLANET_MIN_DIAMETER,
        planets.len()
    )];

    for planet in &planets {
        lines.push(format!(
            "  {}: population {}, diameter {} km, climate {}",
            planet.name, planet.population, planet.diameter, planet.climate
        ));
    }

    lines
}

/// Films sorted by release date with their 1-based rank
///
/// Films whose date does not parse as `YYYY-MM-DD` go last, keeping the
/// order the server returned them in.
pub fn ranked_films(body: &Value) -> Vec<(usize, Film)> {
    let mut films = page::<Film>(body).results;
    films.sort_by_key(|film| {
        let date = NaiveDate::parse_from_str(film.release_date.trim(), "%Y-%m-%d").ok();
        (date.is_none(), date)
    });

    films
        .into_iter()
        .enumerate()
        .map(|(i, film)| (i + 1, film))
        .collect()
}

/// Renders every film in release order
pub fn render_films(body: &Value) -> Vec<String> {
    let films = ranked_films(body);
    let mut lines = vec![format!("Films in release order ({}):", films.len())];

    for (rank, film) in &films {
        lines.push(format!("  {}. {} ({})", rank, film.title, film.release_date));
        lines.push(format!("     Director: {}", film.director));
    }

    lines
}

/// Renders a single vehicle
pub fn render_vehicle(body: &Value) -> Vec<String> {
    let vehicle: Vehicle = view(body);
    vec![
        format!("Vehicle: {}", vehicle.name),
        format!("  Model: {}", vehicle.model),
        format!("  Manufacturer: {}", vehicle.manufacturer),
        format!("  Cost: {} credits", vehicle.cost_in_credits),
        format!("  Max speed: {}", vehicle.max_atmosphering_speed),
    ]
}
