// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tunable parameters of the contact solver.

use serde::{Deserialize, Serialize};

const CORRECTION_PERCENT_RANGE: (f32, f32) = (0.01, 1.0);
const POSITION_SLOP_RANGE: (f32, f32) = (0.001, 0.1);
const EPSILON_RANGE: (f32, f32) = (1e-5, 1e-3);
const IMPULSE_ITERATIONS_RANGE: (u32, u32) = (1, 10);

/// Solver tuning knobs. Out-of-range values are clamped on set (with a
/// warning) so the solver can never be configured into a divergent state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    correction_percent: f32,
    position_slop: f32,
    epsilon: f32,
    impulse_iterations: u32,
}

impl Default for SolverConfig {
    /// Conservative defaults: 5% correction, 1 cm slop, 1e-4 denominator
    /// guard, a single impulse iteration.
    fn default() -> Self {
        Self {
            correction_percent: 0.05,
            position_slop: 0.01,
            epsilon: 1e-4,
            impulse_iterations: 1,
        }
    }
}

impl SolverConfig {
    /// Fraction of the penetration beyond the slop corrected per tick.
    #[inline]
    pub fn correction_percent(&self) -> f32 {
        self.correction_percent
    }

    /// Sets the correction fraction, clamped into `0.01..=1.0`.
    pub fn set_correction_percent(&mut self, value: f32) {
        self.correction_percent = clamp_f32("correction_percent", value, CORRECTION_PERCENT_RANGE);
    }

    /// Overlap depth tolerated without positional correction, in meters.
    #[inline]
    pub fn position_slop(&self) -> f32 {
        self.position_slop
    }

    /// Sets the position slop, clamped into `0.001..=0.1`.
    pub fn set_position_slop(&mut self, value: f32) {
        self.position_slop = clamp_f32("position_slop", value, POSITION_SLOP_RANGE);
    }

    /// Numerical zero threshold for the impulse denominator.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Sets the denominator guard, clamped into `1e-5..=1e-3`.
    pub fn set_epsilon(&mut self, value: f32) {
        self.epsilon = clamp_f32("epsilon", value, EPSILON_RANGE);
    }

    /// Sequential-impulse passes per tick.
    #[inline]
    pub fn impulse_iterations(&self) -> u32 {
        self.impulse_iterations
    }

    /// Sets the iteration count, clamped into `1..=10`.
    pub fn set_impulse_iterations(&mut self, value: u32) {
        let (min, max) = IMPULSE_ITERATIONS_RANGE;
        if value < min || value > max {
            log::warn!("impulse_iterations {value} outside {min}..={max}; clamping");
        }
        self.impulse_iterations = value.clamp(min, max);
    }
}

fn clamp_f32(name: &str, value: f32, (min, max): (f32, f32)) -> f32 {
    if value < min || value > max {
        log::warn!("{name} {value} outside {min}..={max}; clamping");
    }
    value.clamp(min, max)
}
