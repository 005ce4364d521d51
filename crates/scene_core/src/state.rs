//! Step index owned by the viewer's top-level application state.
//!
//! The step only changes through [`ViewerState::dispatch`]; rendering reads
//! it and never writes it.

use serde::Serialize;

use crate::error::{Result, SceneError};

/// The run harness records 20 steps after the initial frame.
pub const DEFAULT_LAST_STEP: u32 = 20;

/// Inclusive range of recorded steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRange {
    first: u32,
    last: u32,
}

impl StepRange {
    pub fn new(first: u32, last: u32) -> Result<Self> {
        if first > last {
            return Err(SceneError::InvalidStepRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn clamp(&self, step: u32) -> u32 {
        step.clamp(self.first, self.last)
    }

    pub fn contains(&self, step: u32) -> bool {
        (self.first..=self.last).contains(&step)
    }
}

impl Default for StepRange {
    fn default() -> Self {
        Self {
            first: 0,
            last: DEFAULT_LAST_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Set(u32),
    Next,
    Previous,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerState {
    step: u32,
    range: StepRange,
}

impl ViewerState {
    pub fn new(range: StepRange) -> Self {
        Self {
            step: range.first,
            range,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn range(&self) -> StepRange {
        self.range
    }

    /// Apply a step transition. Results stay inside the range; there is no
    /// wrap-around at either end.
    #[must_use]
    pub fn dispatch(self, action: StepAction) -> Self {
        let step = match action {
            StepAction::Set(step) => self.range.clamp(step),
            StepAction::Next => self.range.clamp(self.step.saturating_add(1)),
            StepAction::Previous => self.range.clamp(self.step.saturating_sub(1)),
            StepAction::First => self.range.first,
            StepAction::Last => self.range.last,
        };
        if step != self.step {
            tracing::debug!("step {} -> {} ({:?})", self.step, step, action);
        }
        Self { step, ..self }
    }

    /// Replace the range, keeping the current step when it still fits.
    #[must_use]
    pub fn with_range(self, range: StepRange) -> Self {
        Self {
            step: range.clamp(self.step),
            range,
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(StepRange::default())
    }
}
