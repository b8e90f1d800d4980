//! Staged generation runs that yield results as each stage resolves.
//!
//! A run owns a gateway, an ordered list of stages and a context that stages
//! read from and write into. Iterating the run executes one stage per event
//! produced; stages that have nothing to show are skipped without an event.
//! The first stage failure becomes a single [`PipelineEvent::Error`] and ends
//! the run.

pub mod dream_itinerary;
pub mod trip_planner;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{AppError, PipelineEvent};
use crate::ports::{AiGateway, AiGatewayFactory};

pub use dream_itinerary::{DreamContext, dream_run};
pub use trip_planner::{TripPlannerContext, trip_planner_run};

/// What a stage produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Emit(PipelineEvent),
    /// Nothing worth showing; the run continues.
    Skip,
}

pub type StageFn<C> = fn(&dyn AiGateway, &mut C) -> Result<StageOutcome, AppError>;

/// One named step of a run.
pub struct Stage<C> {
    pub name: &'static str,
    pub run: StageFn<C>,
}

impl<C> Stage<C> {
    pub const fn new(name: &'static str, run: StageFn<C>) -> Self {
        Self { name, run }
    }
}

/// Decode a structured gateway answer into the typed result of `stage`.
pub(crate) fn decode<T: DeserializeOwned>(stage: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::decode(stage, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    /// Stage `k` (zero-based) is the next to execute.
    Running(usize),
    Failed,
    Completed,
}

pub struct PipelineRun<C> {
    label: &'static str,
    gateway: Option<Box<dyn AiGateway>>,
    startup_error: Option<AppError>,
    stages: Vec<Stage<C>>,
    context: C,
    state: RunState,
}

impl<C> fmt::Debug for PipelineRun<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRun")
            .field("label", &self.label)
            .field("stages", &self.stages.iter().map(|stage| stage.name).collect::<Vec<_>>())
            .field("state", &self.state)
            .finish()
    }
}

impl<C> PipelineRun<C> {
    /// Create a run. No stage executes until the first call to `next`.
    ///
    /// A factory failure is reported as the run's only event.
    pub fn new(
        label: &'static str,
        factory: &dyn AiGatewayFactory,
        stages: Vec<Stage<C>>,
        context: C,
    ) -> Self {
        let (gateway, startup_error) = match factory.create() {
            Ok(gateway) => (Some(gateway), None),
            Err(err) => (None, Some(err)),
        };
        Self { label, gateway, startup_error, stages, context, state: RunState::Idle }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    fn fail(&mut self, stage: &str, err: AppError) -> Option<PipelineEvent> {
        log::warn!("{}: {} failed: {}", self.label, stage, err);
        self.state = RunState::Failed;
        Some(PipelineEvent::Error(err.to_string()))
    }
}

impl<C> Iterator for PipelineRun<C> {
    type Item = PipelineEvent;

    fn next(&mut self) -> Option<PipelineEvent> {
        let mut index = match self.state {
            RunState::Idle => 0,
            RunState::Running(index) => index,
            RunState::Failed | RunState::Completed => return None,
        };

        if let Some(err) = self.startup_error.take() {
            return self.fail("setup", err);
        }

        while let Some(stage) = self.stages.get(index) {
            let (name, run) = (stage.name, stage.run);
            let Some(gateway) = self.gateway.as_deref() else {
                self.state = RunState::Failed;
                return None;
            };

            self.state = RunState::Running(index);
            log::info!("{}: stage {} ({}) started", self.label, index + 1, name);

            match run(gateway, &mut self.context) {
                Ok(StageOutcome::Emit(event)) => {
                    log::info!("{}: {} produced {}", self.label, name, event.kind());
                    self.state = RunState::Running(index + 1);
                    return Some(event);
                }
                Ok(StageOutcome::Skip) => {
                    log::info!("{}: {} had nothing to show, skipping", self.label, name);
                    index += 1;
                }
                Err(err) => return self.fail(name, err),
            }
        }

        log::info!("{}: completed", self.label);
        self.state = RunState::Completed;
        None
    }
}
