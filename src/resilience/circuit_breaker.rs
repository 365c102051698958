//! Circuit breaker.
//!
//! # Per-Attempt Protocol
//! ```text
//! try_acquire()                       (critical section #1)
//!     → Open and timeout elapsed since last failure → Half-Open
//!     → Closed and interval elapsed since last reset → reset counts
//!     → Closed and trip policy true → Open
//!     → Open → Rejected::Open
//!     → Half-Open and probe slots exhausted → Rejected::TooManyProbes
//!     → Permit
//! operation runs                      (no lock held)
//! Permit::record(outcome)             (critical section #2)
//!     → Closed: update counts only
//!     → Half-Open failure → Open (cooldown restarts)
//!     → Half-Open success → Closed (counts cleared)
//! ```
//!
//! # Design Decisions
//! - No background timer; recovery is evaluated lazily at call time
//! - One mutex per breaker; the guarded operation never runs under it
//! - Tripping is evaluated before admission, never right after a failure
//! - Every state change bumps a generation; permits from an older
//!   generation have their outcome ignored
//! - Observers run after the lock is released

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::{validate_breaker, BreakerConfig, ConfigError, TripConfig, ValidationError};
use crate::observability::metrics;
use crate::resilience::clock::{Clock, SystemClock};
use crate::resilience::counts::Counts;
use crate::resilience::detector::{ErrorDetector, FailureDetector, Outcome};
use crate::resilience::error::{BreakerError, Rejected};
use crate::resilience::policy::{ConsecutiveFailures, FailureRate, TripPolicy};
use crate::resilience::state::State;

/// Observer invoked on every state change with `(name, from, to)`.
pub type StateObserver = Box<dyn Fn(&str, State, State) + Send + Sync>;

/// Mutable breaker state, guarded by a single mutex.
#[derive(Debug)]
struct Inner {
    state: State,
    counts: Counts,
    last_failure: Option<Instant>,
    last_reset: Instant,
    generation: u64,
    probes_in_flight: u32,
}

/// Point-in-time view of a breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub name: String,
    pub state: State,
    pub counts: Counts,
}

/// A circuit breaker guarding one logical resource.
pub struct Breaker {
    name: String,
    interval: Duration,
    timeout: Duration,
    max_concurrent_probes: u32,
    trip_policy: Box<dyn TripPolicy>,
    on_state_change: Option<StateObserver>,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl Breaker {
    /// Start building a breaker with default settings.
    pub fn builder() -> BreakerBuilder {
        BreakerBuilder::default()
    }

    /// Build a breaker from a configuration section.
    pub fn from_config(config: &BreakerConfig) -> Result<Self, ConfigError> {
        BreakerBuilder::from_config(config)?.build()
    }

    /// Get the breaker name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state, after applying any due time-based recovery.
    pub fn state(&self) -> State {
        self.snapshot().state
    }

    /// Current counts, after applying any due time-based recovery.
    pub fn counts(&self) -> Counts {
        self.snapshot().counts
    }

    /// State and counts read under one lock.
    pub fn snapshot(&self) -> Snapshot {
        let mut changes = Vec::new();
        let (state, counts) = {
            let mut inner = self.lock();
            self.recover(&mut inner, &mut changes);
            (inner.state, inner.counts)
        };
        self.notify(changes);
        Snapshot {
            name: self.name.clone(),
            state,
            counts,
        }
    }

    /// Decide whether an attempt may proceed.
    ///
    /// The returned permit must be resolved with [`Permit::record`] (or
    /// `success`/`failure`) once the outcome is known. Dropping it unresolved
    /// only frees its probe slot.
    pub fn try_acquire(&self) -> Result<Permit<'_>, Rejected> {
        let mut changes = Vec::new();
        let result = {
            let mut inner = self.lock();
            self.admit(&mut inner, &mut changes)
        };
        self.notify(changes);

        match result {
            Ok((generation, probe)) => Ok(Permit {
                breaker: self,
                generation,
                probe,
                resolved: false,
            }),
            Err(rejected) => {
                tracing::debug!(name = %self.name, reason = %rejected, "Attempt rejected");
                metrics::record_rejection(&self.name, rejected);
                Err(rejected)
            }
        }
    }

    /// Run `operation` if admitted, recording `Err` as a failure.
    pub fn guard<T, E, F>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let permit = self.try_acquire()?;
        let result = operation();
        permit.record(ErrorDetector.classify(&result));
        result.map_err(BreakerError::Inner)
    }

    /// Run `operation` if admitted, classifying its output with `detector`.
    pub fn guard_with<T, F, D>(&self, operation: F, detector: &D) -> Result<T, Rejected>
    where
        F: FnOnce() -> T,
        D: FailureDetector<T> + ?Sized,
    {
        let permit = self.try_acquire()?;
        let output = operation();
        permit.record(detector.classify(&output));
        Ok(output)
    }

    /// Async counterpart of [`guard`](Self::guard). The lock is never held
    /// across the await.
    pub async fn guard_async<T, E, F, Fut>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let permit = self.try_acquire()?;
        let result = operation().await;
        permit.record(ErrorDetector.classify(&result));
        result.map_err(BreakerError::Inner)
    }

    /// Report a success observed outside of a permit.
    pub fn record_success(&self) {
        self.record(Outcome::Success);
    }

    /// Report a failure observed outside of a permit.
    pub fn record_failure(&self) {
        self.record(Outcome::Failure);
    }

    fn record(&self, outcome: Outcome) {
        let mut changes = Vec::new();
        {
            let mut inner = self.lock();
            let now = self.clock.now();
            self.apply(&mut inner, outcome, now, &mut changes);
        }
        metrics::record_outcome(&self.name, outcome);
        self.notify(changes);
    }

    /// Force the breaker open. The cooldown starts now.
    pub fn open(&self) {
        let mut changes = Vec::new();
        {
            let mut inner = self.lock();
            let now = self.clock.now();
            inner.last_failure = Some(now);
            self.transition(&mut inner, State::Open, now, &mut changes);
        }
        tracing::info!(name = %self.name, "Circuit breaker manually opened");
        self.notify(changes);
    }

    /// Force the breaker closed and clear its counts.
    pub fn close(&self) {
        let mut changes = Vec::new();
        {
            let mut inner = self.lock();
            let now = self.clock.now();
            self.transition(&mut inner, State::Closed, now, &mut changes);
            Self::reset(&mut inner, now);
        }
        tracing::info!(name = %self.name, "Circuit breaker manually closed");
        self.notify(changes);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time-based recovery: Open → Half-Open, Closed periodic reset.
    fn recover(&self, inner: &mut Inner, changes: &mut Vec<(State, State)>) {
        let now = self.clock.now();
        match inner.state {
            State::Open => {
                let cooled = inner
                    .last_failure
                    .map_or(true, |at| now.saturating_duration_since(at) >= self.timeout);
                if cooled {
                    self.transition(inner, State::HalfOpen, now, changes);
                }
            }
            State::Closed => {
                if now.saturating_duration_since(inner.last_reset) >= self.interval {
                    tracing::debug!(name = %self.name, counts = ?inner.counts, "Reset interval elapsed");
                    Self::reset(inner, now);
                }
            }
            State::HalfOpen => {}
        }
    }

    /// Critical section #1. Returns the permit generation and whether it
    /// holds a probe slot.
    fn admit(
        &self,
        inner: &mut Inner,
        changes: &mut Vec<(State, State)>,
    ) -> Result<(u64, bool), Rejected> {
        self.recover(inner, changes);

        if inner.state == State::Closed && self.trip_policy.should_trip(&inner.counts) {
            let now = self.clock.now();
            inner.last_failure.get_or_insert(now);
            self.transition(inner, State::Open, now, changes);
        }

        match inner.state {
            State::Closed => Ok((inner.generation, false)),
            State::Open => Err(Rejected::Open),
            State::HalfOpen => {
                if inner.probes_in_flight >= self.max_concurrent_probes {
                    Err(Rejected::TooManyProbes)
                } else {
                    inner.probes_in_flight += 1;
                    Ok((inner.generation, true))
                }
            }
        }
    }

    /// Critical section #2 for permit holders.
    fn finish(&self, generation: u64, probe: bool, outcome: Option<Outcome>) {
        let mut changes = Vec::new();
        let applied = {
            let mut inner = self.lock();
            if inner.generation != generation {
                false
            } else {
                if probe {
                    inner.probes_in_flight = inner.probes_in_flight.saturating_sub(1);
                }
                match outcome {
                    Some(outcome) => {
                        let now = self.clock.now();
                        self.apply(&mut inner, outcome, now, &mut changes);
                        true
                    }
                    None => false,
                }
            }
        };

        match (outcome, applied) {
            (Some(outcome), true) => metrics::record_outcome(&self.name, outcome),
            (Some(outcome), false) => tracing::debug!(
                name = %self.name,
                outcome = outcome.as_str(),
                "Ignoring outcome from a previous breaker generation"
            ),
            (None, _) => {}
        }
        self.notify(changes);
    }

    fn apply(
        &self,
        inner: &mut Inner,
        outcome: Outcome,
        now: Instant,
        changes: &mut Vec<(State, State)>,
    ) {
        match outcome {
            Outcome::Success => {
                inner.counts.on_success();
                if inner.state == State::HalfOpen {
                    self.transition(inner, State::Closed, now, changes);
                }
            }
            Outcome::Failure => {
                inner.counts.on_failure();
                inner.last_failure = Some(now);
                if inner.state == State::HalfOpen {
                    self.transition(inner, State::Open, now, changes);
                }
            }
        }
    }

    fn transition(
        &self,
        inner: &mut Inner,
        to: State,
        now: Instant,
        changes: &mut Vec<(State, State)>,
    ) {
        let from = inner.state;
        if from == to {
            return;
        }

        inner.state = to;
        inner.generation = inner.generation.wrapping_add(1);
        inner.probes_in_flight = 0;
        if to == State::Closed {
            Self::reset(inner, now);
        }

        match to {
            State::Open => tracing::warn!(
                name = %self.name,
                from = %from,
                to = %to,
                counts = ?inner.counts,
                "Circuit breaker opened"
            ),
            _ => tracing::info!(
                name = %self.name,
                from = %from,
                to = %to,
                "Circuit breaker state changed"
            ),
        }
        changes.push((from, to));
    }

    fn reset(inner: &mut Inner, now: Instant) {
        inner.counts.clear();
        inner.last_failure = None;
        inner.last_reset = now;
    }

    fn notify(&self, changes: Vec<(State, State)>) {
        for (from, to) in changes {
            metrics::record_transition(&self.name, from, to);
            if let Some(observer) = &self.on_state_change {
                observer(&self.name, from, to);
            }
        }
    }
}

impl fmt::Debug for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breaker")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .field("max_concurrent_probes", &self.max_concurrent_probes)
            .field("inner", &*self.lock())
            .finish_non_exhaustive()
    }
}

/// Admission token for one attempt.
///
/// Holds a probe slot when issued in Half-Open; the slot is released when the
/// outcome is recorded or the permit is dropped.
#[must_use = "record the outcome of the admitted attempt"]
pub struct Permit<'a> {
    breaker: &'a Breaker,
    generation: u64,
    probe: bool,
    resolved: bool,
}

impl Permit<'_> {
    /// Whether this attempt is a Half-Open recovery probe.
    pub fn is_probe(&self) -> bool {
        self.probe
    }

    pub fn record(mut self, outcome: Outcome) {
        self.resolved = true;
        self.breaker
            .finish(self.generation, self.probe, Some(outcome));
    }

    pub fn success(self) {
        self.record(Outcome::Success);
    }

    pub fn failure(self) {
        self.record(Outcome::Failure);
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.breaker.finish(self.generation, self.probe, None);
        }
    }
}

impl fmt::Debug for Permit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit")
            .field("breaker", &self.breaker.name)
            .field("generation", &self.generation)
            .field("probe", &self.probe)
            .finish()
    }
}

/// Builder for [`Breaker`]. Unset fields take their defaults.
pub struct BreakerBuilder {
    name: String,
    interval: Duration,
    timeout: Duration,
    max_concurrent_probes: u32,
    trip_policy: Box<dyn TripPolicy>,
    on_state_change: Option<StateObserver>,
    clock: Arc<dyn Clock>,
}

impl Default for BreakerBuilder {
    fn default() -> Self {
        let defaults = BreakerConfig::default();
        Self {
            interval: defaults.interval(),
            timeout: defaults.timeout(),
            name: defaults.name,
            max_concurrent_probes: defaults.max_concurrent_probes,
            trip_policy: Box::new(ConsecutiveFailures::default()),
            on_state_change: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl BreakerBuilder {
    /// Seed a builder from a validated configuration section.
    pub fn from_config(config: &BreakerConfig) -> Result<Self, ConfigError> {
        validate_breaker(config).map_err(ConfigError::Validation)?;

        let trip_policy: Box<dyn TripPolicy> = match config.trip {
            TripConfig::ConsecutiveFailures { threshold } => {
                Box::new(ConsecutiveFailures::new(threshold))
            }
            TripConfig::FailureRate {
                threshold,
                minimum_samples,
            } => Box::new(FailureRate::new(threshold, minimum_samples)),
        };

        Ok(Self {
            name: config.name.clone(),
            interval: config.interval(),
            timeout: config.timeout(),
            max_concurrent_probes: config.max_concurrent_probes,
            trip_policy,
            ..Self::default()
        })
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Closed-state reset period.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Open-state cooldown before probing.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_concurrent_probes(mut self, max: u32) -> Self {
        self.max_concurrent_probes = max;
        self
    }

    pub fn trip_policy(mut self, policy: impl TripPolicy + 'static) -> Self {
        self.trip_policy = Box::new(policy);
        self
    }

    pub fn on_state_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&str, State, State) + Send + Sync + 'static,
    {
        self.on_state_change = Some(Box::new(observer));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Breaker, ConfigError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("breaker.name", "must not be empty"));
        }
        if self.interval.is_zero() {
            errors.push(ValidationError::new("breaker.interval", "must be greater than 0"));
        }
        if self.timeout.is_zero() {
            errors.push(ValidationError::new("breaker.timeout", "must be greater than 0"));
        }
        if self.max_concurrent_probes == 0 {
            errors.push(ValidationError::new(
                "breaker.max_concurrent_probes",
                "must be at least 1",
            ));
        }
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let now = self.clock.now();
        metrics::record_state(&self.name, State::Closed);
        Ok(Breaker {
            name: self.name,
            interval: self.interval,
            timeout: self.timeout,
            max_concurrent_probes: self.max_concurrent_probes,
            trip_policy: self.trip_policy,
            on_state_change: self.on_state_change,
            clock: self.clock,
            inner: Mutex::new(Inner {
                state: State::Closed,
                counts: Counts::default(),
                last_failure: None,
                last_reset: now,
                generation: 0,
                probes_in_flight: 0,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::clock::ManualClock;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn breaker(clock: &ManualClock) -> Breaker {
        Breaker::builder()
            .name("test")
            .clock(clock.clone())
            .build()
            .unwrap()
    }

    fn fail(b: &Breaker) -> Result<(), BreakerError<&'static str>> {
        b.guard(|| Err::<(), _>("boom"))
    }

    fn succeed(b: &Breaker) -> Result<(), BreakerError<&'static str>> {
        b.guard(|| Ok::<(), &str>(()))
    }

    #[test]
    fn test_defaults() {
        let b = Breaker::builder().build().unwrap();
        assert_eq!(b.name(), "CircuitBreaker");
        assert_eq!(b.state(), State::Closed);
        assert_eq!(b.counts(), Counts::default());
        assert_eq!(b.interval, Duration::from_secs(60));
        assert_eq!(b.timeout, Duration::from_secs(60));
        assert_eq!(b.max_concurrent_probes, 1);
    }

    #[test]
    fn test_trip_is_evaluated_on_next_attempt() {
        let clock = ManualClock::new();
        let b = breaker(&clock);

        for _ in 0..5 {
            assert!(matches!(fail(&b), Err(BreakerError::Inner("boom"))));
        }
        // Still closed: the fifth failure does not trip by itself.
        assert_eq!(b.state(), State::Closed);
        assert_eq!(b.counts().consecutive_failures, 5);

        let ran = AtomicU32::new(0);
        let result = b.guard(|| {
            ran.fetch_add(1, Ordering::SeqCst);
            Ok::<(), &str>(())
        });
        assert!(matches!(result, Err(BreakerError::Rejected(Rejected::Open))));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(b.state(), State::Open);
        assert_eq!(b.counts().total_failures, 5);
    }

    #[test]
    fn test_open_until_timeout() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        for _ in 0..5 {
            let _ = fail(&b);
        }
        assert!(fail(&b).unwrap_err().is_rejected());

        clock.advance(Duration::from_secs(59));
        assert!(succeed(&b).unwrap_err().is_rejected());

        clock.advance(Duration::from_secs(1));
        let permit = b.try_acquire().unwrap();
        assert!(permit.is_probe());
        assert_eq!(b.state(), State::HalfOpen);
        permit.success();
        assert_eq!(b.state(), State::Closed);
        assert_eq!(b.counts(), Counts::default());
    }

    #[test]
    fn test_failed_probe_restarts_cooldown() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        b.open();

        clock.advance(Duration::from_secs(60));
        assert!(fail(&b).unwrap_err().into_inner().is_some());
        assert_eq!(b.state(), State::Open);

        clock.advance(Duration::from_secs(59));
        assert!(succeed(&b).unwrap_err().is_rejected());
        clock.advance(Duration::from_secs(1));
        assert!(succeed(&b).is_ok());
        assert_eq!(b.state(), State::Closed);
    }

    #[test]
    fn test_interval_reset_while_closed() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        let _ = fail(&b);
        let _ = fail(&b);
        let _ = succeed(&b);
        assert_eq!(b.counts().requests(), 3);

        clock.advance(Duration::from_secs(60));
        assert_eq!(b.state(), State::Closed);
        assert_eq!(b.counts(), Counts::default());
    }

    #[test]
    fn test_interval_reset_precedes_trip() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        for _ in 0..5 {
            let _ = fail(&b);
        }
        clock.advance(Duration::from_secs(60));
        // History is stale, so the trip policy sees zeroed counts.
        assert!(succeed(&b).is_ok());
        assert_eq!(b.state(), State::Closed);
    }

    #[test]
    fn test_probe_limit() {
        let clock = ManualClock::new();
        let b = Breaker::builder()
            .clock(clock.clone())
            .max_concurrent_probes(2)
            .build()
            .unwrap();
        b.open();
        clock.advance(Duration::from_secs(60));

        let first = b.try_acquire().unwrap();
        let second = b.try_acquire().unwrap();
        assert_eq!(b.try_acquire().unwrap_err(), Rejected::TooManyProbes);

        drop(second);
        let third = b.try_acquire().unwrap();
        third.failure();
        assert_eq!(b.state(), State::Open);

        // The first probe belongs to the previous generation.
        first.success();
        assert_eq!(b.state(), State::Open);
    }

    #[test]
    fn test_manual_record_in_half_open() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        b.open();
        clock.advance(Duration::from_secs(60));
        assert_eq!(b.state(), State::HalfOpen);

        b.record_failure();
        assert_eq!(b.state(), State::Open);
        clock.advance(Duration::from_secs(60));
        assert_eq!(b.state(), State::HalfOpen);
        b.record_success();
        assert_eq!(b.state(), State::Closed);
    }

    #[test]
    fn test_manual_open_and_close() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        let _ = succeed(&b);

        b.open();
        assert!(succeed(&b).unwrap_err().is_rejected());

        b.close();
        assert_eq!(b.counts(), Counts::default());
        assert!(succeed(&b).is_ok());
    }

    #[test]
    fn test_close_resets_counts_when_already_closed() {
        let b = Breaker::builder().build().unwrap();
        let _ = b.guard(|| Err::<(), _>(()));
        b.close();
        assert_eq!(b.counts(), Counts::default());
    }

    #[test]
    fn test_observer_sees_transitions() {
        let clock = ManualClock::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let b = Breaker::builder()
            .name("observed")
            .clock(clock.clone())
            .trip_policy(ConsecutiveFailures::new(1))
            .on_state_change(move |name, from, to| {
                sink.lock().unwrap().push((name.to_string(), from, to));
            })
            .build()
            .unwrap();

        let _ = b.guard(|| Err::<(), _>(()));
        let _ = b.guard(|| Ok::<(), ()>(()));
        clock.advance(Duration::from_secs(60));
        let _ = b.guard(|| Ok::<(), ()>(()));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("observed".to_string(), State::Closed, State::Open),
                ("observed".to_string(), State::Open, State::HalfOpen),
                ("observed".to_string(), State::HalfOpen, State::Closed),
            ]
        );
    }

    #[test]
    fn test_observer_may_reenter() {
        let b = Arc::new_cyclic(|weak: &std::sync::Weak<Breaker>| {
            let weak = weak.clone();
            Breaker::builder()
                .trip_policy(ConsecutiveFailures::new(1))
                .on_state_change(move |_, _, _| {
                    if let Some(b) = weak.upgrade() {
                        let _ = b.counts();
                    }
                })
                .build()
                .unwrap()
        });
        b.record_failure();
        assert_eq!(b.try_acquire().unwrap_err(), Rejected::Open);
        assert_eq!(b.state(), State::Open);
    }

    #[test]
    fn test_guard_with_detector() {
        let b = Breaker::builder()
            .trip_policy(ConsecutiveFailures::new(2))
            .build()
            .unwrap();
        let negative = |v: &i32| {
            if *v < 0 {
                Outcome::Failure
            } else {
                Outcome::Success
            }
        };

        assert_eq!(b.guard_with(|| -1i32, &negative), Ok(-1));
        assert_eq!(b.guard_with(|| -2i32, &negative), Ok(-2));
        assert_eq!(b.guard_with(|| 3i32, &negative), Err(Rejected::Open));
    }

    #[test]
    fn test_build_rejects_bad_settings() {
        let err = Breaker::builder()
            .name("")
            .timeout(Duration::ZERO)
            .max_concurrent_probes(0)
            .build()
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_config_failure_rate() {
        let config = BreakerConfig {
            name: "rate".into(),
            trip: TripConfig::FailureRate {
                threshold: 0.5,
                minimum_samples: 4,
            },
            ..BreakerConfig::default()
        };
        let b = Breaker::from_config(&config).unwrap();
        b.record_success();
        b.record_failure();
        b.record_success();
        assert!(b.try_acquire().is_ok());
        // Exactly at the threshold does not trip.
        b.record_failure();
        assert!(b.try_acquire().is_ok());
        b.record_failure();
        assert_eq!(b.try_acquire().unwrap_err(), Rejected::Open);
    }

    #[test]
    fn test_trip_without_fresh_failure_starts_cooldown() {
        let clock = ManualClock::new();
        let b = Breaker::builder()
            .clock(clock.clone())
            .trip_policy(|counts: &Counts| counts.total_successes >= 3)
            .build()
            .unwrap();

        b.record_failure();
        clock.advance(Duration::from_secs(120));
        b.close();
        for _ in 0..3 {
            assert!(succeed(&b).is_ok());
        }
        assert_eq!(b.try_acquire().unwrap_err(), Rejected::Open);
        assert_eq!(b.try_acquire().unwrap_err(), Rejected::Open);
        assert_eq!(b.state(), State::Open);

        clock.advance(Duration::from_secs(60));
        assert!(b.try_acquire().unwrap().is_probe());
    }

    #[test]
    fn test_snapshot_applies_recovery() {
        let clock = ManualClock::new();
        let b = breaker(&clock);
        let _ = fail(&b);
        clock.advance(Duration::from_secs(60));

        let snapshot = b.snapshot();
        assert_eq!(snapshot.state, State::Closed);
        assert_eq!(snapshot.counts, Counts::default());
        assert_eq!(b.counts(), Counts::default());
    }

    #[tokio::test]
    async fn test_guard_async() {
        let b = Breaker::builder()
            .trip_policy(ConsecutiveFailures::new(1))
            .build()
            .unwrap();
        let result = b.guard_async(|| async { Err::<(), _>("timeout") }).await;
        assert!(matches!(result, Err(BreakerError::Inner("timeout"))));

        let result = b.guard_async(|| async { Ok::<_, &str>(1) }).await;
        assert!(matches!(result, Err(BreakerError::Rejected(Rejected::Open))));
    }
}
