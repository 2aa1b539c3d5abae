//! Frame-time to simulation-step conversion.

use corsair_core::constants::FIXED_DT;

/// Steps to run for one frame, all of length `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    pub steps: u32,
    pub dt: f64,
}

/// Fixed-timestep accumulator. In variable mode every frame is one step
/// of the frame's own length.
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    fixed: bool,
    max_steps: u32,
    accumulator: f64,
}

impl Stepper {
    pub fn new(fixed: bool, max_steps: u32) -> Self {
        Self {
            fixed,
            max_steps,
            accumulator: 0.0,
        }
    }

    pub fn plan(&mut self, frame_secs: f64) -> StepPlan {
        if !self.fixed {
            return StepPlan {
                steps: 1,
                dt: frame_secs,
            };
        }

        self.accumulator += frame_secs.max(0.0);
        let mut steps = 0;
        while self.accumulator >= FIXED_DT && steps < self.max_steps {
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
        StepPlan { steps, dt: FIXED_DT }
    }

    /// Unconsumed frame time carried into the next frame.
    pub fn remainder(&self) -> f64 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
