//! Endpoint strings fetched by each cycle.
//!
//! Endpoints are relative to the configured base URL and double as cache
//! keys, so they must be built the same way every time.

/// First page of the starship collection
pub const STARSHIPS_FIRST_PAGE: &str = "starships/?page=1";

/// First page of the planet collection
pub const PLANETS_FIRST_PAGE: &str = "planets/?page=1";

/// Every film (a single page)
pub const FILMS: &str = "films/";

/// A single character
pub fn person(id: u32) -> String {
    format!("people/{}", id)
}

/// A single vehicle
pub fn vehicle(id: u32) -> String {
    format!("vehicles/{}", id)
}
