//! Fetch cycle orchestration
//!
//! One cycle fetches five endpoints strictly in order, hands each body to its
//! renderer and advances the rotating id. The first failing step ends the
//! cycle; nothing is retried. Cycles never overlap: a trigger that arrives
//! while one is running is skipped.

use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::data::endpoints;
use crate::data::{FetchError, SwapiClient};
use crate::state::{SharedState, StatusSnapshot};
use crate::ui::{self, Console};

/// Turns a cached body into printable lines
type Renderer = fn(&Value) -> Vec<String>;

/// One step of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Character,
    Starships,
    Planets,
    Films,
    Vehicle,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Character => "character",
            Step::Starships => "starships",
            Step::Planets => "planets",
            Step::Films => "films",
            Step::Vehicle => "vehicle",
        };
        f.write_str(name)
    }
}

/// Errors that end a cycle early
#[derive(Debug, Error)]
pub enum CycleError {
    /// A fetch failed; the remaining steps were not run
    #[error("Cycle aborted at {step} step: {source}")]
    Aborted {
        step: Step,
        #[source]
        source: FetchError,
    },

    /// Another cycle was still running, so this one never started
    #[error("A cycle is already in progress")]
    Busy,
}

/// What a completed cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Endpoints fetched, in order (cache hits included)
    pub endpoints: Vec<String>,
    /// Whether the vehicle step was skipped because the id ran past its bound
    pub vehicle_skipped: bool,
    /// Rotating id the next cycle will use
    pub next_id: u32,
    /// Status summary logged at the end of the cycle, in verbose mode only
    pub summary: Option<StatusSnapshot>,
}

/// Clears the in-progress flag when a cycle ends, even if its task is dropped
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Sequences the fetch/render steps of each cycle
pub struct Orchestrator {
    client: SwapiClient,
    console: Arc<dyn Console>,
    in_progress: AtomicBool,
}

impl Orchestrator {
    pub fn new(client: SwapiClient, console: Arc<dyn Console>) -> Self {
        Self {
            client,
            console,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &Arc<SharedState> {
        self.client.state()
    }

    /// Counters, cache size, rotating id and configuration
    pub fn status(&self) -> StatusSnapshot {
        self.state().status()
    }

    /// Whether a cycle is currently running
    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<CycleGuard<'_>> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard(&self.in_progress))
    }

    /// Starts a cycle in the background and returns immediately
    ///
    /// The caller never sees the outcome; failures only show up in the logs
    /// and the error counters.
    pub fn trigger(self: &Arc<Self>) {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            // Outcome is already logged and counted by run_cycle.
            let _ = orchestrator.run_cycle().await;
        });
    }

    /// Runs one full cycle
    ///
    /// # Returns
    /// * `Ok(CycleReport)` - Every step that was due completed
    /// * `Err(CycleError::Aborted)` - A fetch failed and the rest of the cycle was skipped
    /// * `Err(CycleError::Busy)` - Another cycle was running; nothing was done
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let Some(_guard) = self.begin() else {
            warn!("cycle already in progress, skipping trigger");
            return Err(CycleError::Busy);
        };

        let state = self.state();
        state.metrics.record_fetch_attempt();
        info!(rotating_id = state.rotating_id(), "cycle started");

        match self.run_steps().await {
            Ok(mut report) => {
                info!(
                    fetched = report.endpoints.len(),
                    vehicle_skipped = report.vehicle_skipped,
                    next_id = report.next_id,
                    "cycle completed"
                );
                if state.config.verbose {
                    report.summary = Some(self.log_status());
                }
                Ok(report)
            }
            Err(err) => {
                state.metrics.record_aborted_cycle();
                error!(error = %err, "cycle aborted");
                Err(err)
            }
        }
    }

    async fn run_steps(&self) -> Result<CycleReport, CycleError> {
        let state = self.state();
        let id = state.rotating_id();
        let mut fetched = Vec::with_capacity(5);

        let person = endpoints::person(id);
        self.step(Step::Character, &person, ui::render_character).await?;
        fetched.push(person);

        let collections: [(Step, &str, Renderer); 3] = [
            (Step::Starships, endpoints::STARSHIPS_FIRST_PAGE, ui::render_starships),
            (Step::Planets, endpoints::PLANETS_FIRST_PAGE, ui::render_planets),
            (Step::Films, endpoints::FILMS, ui::render_films),
        ];
        for (step, endpoint, render) in collections {
            self.step(step, endpoint, render).await?;
            fetched.push(endpoint.to_string());
        }

        let vehicle_skipped = !state.id_in_range(id);
        if vehicle_skipped {
            debug!(
                id,
                max_id = state.config.max_id,
                "rotating id past bound, skipping vehicle"
            );
        } else {
            let vehicle = endpoints::vehicle(id);
            self.step(Step::Vehicle, &vehicle, ui::render_vehicle).await?;
            fetched.push(vehicle);
            state.set_rotating_id(id.saturating_add(1));
        }

        Ok(CycleReport {
            endpoints: fetched,
            vehicle_skipped,
            next_id: state.rotating_id(),
            summary: None,
        })
    }

    /// Fetches one endpoint, prints it and counts the rendered payload size
    async fn step(&self, step: Step, endpoint: &str, render: Renderer) -> Result<(), CycleError> {
        let body = self
            .client
            .fetch(endpoint)
            .await
            .map_err(|source| CycleError::Aborted { step, source })?;

        self.console.print(&render(body.as_ref()));

        let size = serde_json::to_vec(body.as_ref())
            .map(|bytes| bytes.len() as u64)
            .unwrap_or(0);
        self.state().metrics.record_rendered(size);

        Ok(())
    }

    /// Logs the current status and returns what was logged
    fn log_status(&self) -> StatusSnapshot {
        let status = self.status();
        info!(
            fetch_attempts = status.counters.fetch_attempts,
            errors = status.counters.errors,
            aborted_cycles = status.counters.aborted_cycles,
            rendered_bytes = status.counters.rendered_bytes,
            cache_size = status.cache_size,
            rotating_id = status.rotating_id,
            timeout_ms = status.config.timeout_ms,
            "status"
        );
        status
    }
}
