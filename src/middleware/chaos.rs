use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;

/// Pluggable source of simulated backend imperfection: a uniform latency
/// window and a Bernoulli failure trial. A fixed seed makes both streams
/// deterministic for tests; zero probability and a zero window disable it.
/// Cosmetic data randomness lives elsewhere and never goes through here.
#[derive(Clone)]
pub struct ChaosPolicy {
    fault_probability: f64,
    latency_min_ms: u64,
    latency_max_ms: u64,
    rng: Arc<Mutex<StdRng>>,
}

impl ChaosPolicy {
    pub fn new(
        fault_probability: f64,
        latency_min_ms: u64,
        latency_max_ms: u64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            fault_probability: fault_probability.clamp(0.0, 1.0),
            latency_min_ms: latency_min_ms.min(latency_max_ms),
            latency_max_ms,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0.0, 0, 0, Some(0))
    }

    pub fn latency(&self) -> Duration {
        if self.latency_max_ms == 0 {
            return Duration::ZERO;
        }
        let mut rng = self.rng.lock().expect("chaos rng mutex poisoned");
        Duration::from_millis(rng.gen_range(self.latency_min_ms..=self.latency_max_ms))
    }

    pub fn should_fail(&self) -> bool {
        if self.fault_probability <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().expect("chaos rng mutex poisoned");
        rng.gen_bool(self.fault_probability)
    }
}

/// Suspends every call for a draw from the latency window before the
/// handler (and before the fault check) runs. Non-blocking; concurrent
/// calls interleave while suspended.
pub async fn latency_middleware(
    State(policy): State<ChaosPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let delay = policy.latency();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    next.run(req).await
}

/// Mutating calls draw a failure trial and short-circuit to a 500 without
/// touching the store when it fires. Reads are never failed.
pub async fn fault_middleware(
    State(policy): State<ChaosPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mutating = matches!(
        *req.method(),
        Method::POST | Method::PATCH | Method::PUT | Method::DELETE
    );
    if mutating && policy.should_fail() {
        return Error::Injected.into_response();
    }
    next.run(req).await
}
