//! Star Wars API resources
//!
//! This module contains the HTTP client, the endpoint builders, and the typed
//! views the renderers read out of cached JSON bodies. Every field is kept as
//! a string; numbers are stringified and `null` reads as empty, so one
//! mistyped field never blanks the rest of a record. Numeric interpretation
//! happens where it is needed (the planet filter, for example).

pub mod client;
pub mod endpoints;

pub use client::{FetchError, SwapiClient};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Renders a JSON scalar as the string the API would normally send.
/// Integral floats such as `2e9` print without a fraction.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(int) = n.as_u64() {
        return int.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&f) => {
            (f as u64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Reads a string, number, bool or `null` field into a `String`
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| scalar_text(&value))
}

/// Reads a list of strings; anything that is not an array is empty
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().map(scalar_text).collect())
        .unwrap_or_default())
}

/// Reads an id given as a number or a numeric string
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_u64().and_then(|id| u32::try_from(id).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One page of a collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A character from `people/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub height: String,
    #[serde(deserialize_with = "lenient_string")]
    pub mass: String,
    #[serde(deserialize_with = "lenient_string")]
    pub birth_year: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    /// Film URLs the character appears in
    #[serde(deserialize_with = "lenient_strings")]
    pub films: Vec<String>,
}

/// An entry of `starships/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub manufacturer: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hyperdrive_rating: String,
    #[serde(deserialize_with = "lenient_string")]
    pub crew: String,
}

/// An entry of `planets/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub population: String,
    #[serde(deserialize_with = "lenient_string")]
    pub diameter: String,
    #[serde(deserialize_with = "lenient_string")]
    pub climate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub terrain: String,
}

/// An entry of `films/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_id")]
    pub episode_id: Option<u32>,
    #[serde(deserialize_with = "lenient_string")]
    pub director: String,
    #[serde(deserialize_with = "lenient_string")]
    pub release_date: String,
}

/// A vehicle from `vehicles/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub manufacturer: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cost_in_credits: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_atmosphering_speed: String,
}

/// Reads a typed view out of a cached body.
///
/// A body that is not an object yields a default view instead of an error.
/// Fields the API left out are empty and mistyped fields are read leniently.
pub fn view<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// Reads a collection page out of a cached body. Results keep the server's
/// order; an entry of the wrong shape becomes a default view.
pub fn page<T: DeserializeOwned + Default>(value: &Value) -> Page<T> {
    let results = value
        .get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(view::<T>).collect())
        .unwrap_or_default();

    Page {
        count: value.get("count").and_then(Value::as_u64),
        next: value.get("next").and_then(Value::as_str).map(str::to_string),
        results,
    }
}
