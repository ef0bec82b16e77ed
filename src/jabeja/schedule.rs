//! Annealing state machine.
//!
//! One transition per round, applied after every node has been visited:
//! cool down, then (if enabled) count frozen rounds and reheat.
//!
//! | schedule | cooldown                                             | frozen at |
//! |----------|------------------------------------------------------|-----------|
//! | standard | `T = max(1, T - delta)`                              | `T == 1`  |
//! | enhanced | every `every` rounds, `T *= alpha`; below `min` → 0  | `T == 0`  |

use log::debug;

use super::config::CoolingSchedule;

/// The active temperature, tagged with the acceptance rule it drives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Temperature {
    /// Linear schedule with deterministic acceptance.
    Standard(f64),
    /// Geometric schedule with probabilistic acceptance.
    Enhanced(f64),
}

impl Temperature {
    pub fn value(self) -> f64 {
        match self {
            Temperature::Standard(t) | Temperature::Enhanced(t) => t,
        }
    }

    /// Whether the temperature sits at its floor.
    pub fn is_frozen(self) -> bool {
        match self {
            Temperature::Standard(t) => t == 1.0,
            Temperature::Enhanced(t) => t == 0.0,
        }
    }
}

/// Mutable state of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunState {
    /// Current round, 0-based.
    pub round: usize,
    pub temperature: Temperature,
    /// Consecutive frozen rounds since the last reheat.
    pub restart_counter: usize,
    /// Swaps performed since the run started. Never reset.
    pub swap_count: u64,
    /// Reheats performed since the run started.
    pub restarts: usize,
}

/// Drives temperature transitions for a [`CoolingSchedule`].
#[derive(Debug, Clone)]
pub struct AnnealingSchedule {
    cooling: CoolingSchedule,
    restart_interval: Option<usize>,
}

impl AnnealingSchedule {
    /// `restart_interval` of `None` disables reheating.
    pub fn new(cooling: CoolingSchedule, restart_interval: Option<usize>) -> Self {
        Self {
            cooling,
            restart_interval,
        }
    }

    /// Temperature at round 0 and after every reheat.
    pub fn initial_temperature(&self) -> Temperature {
        match self.cooling {
            CoolingSchedule::Standard { initial, .. } => Temperature::Standard(initial),
            CoolingSchedule::Enhanced { initial, .. } => Temperature::Enhanced(initial),
        }
    }

    /// State at the start of a run.
    pub fn initial_state(&self) -> RunState {
        RunState {
            round: 0,
            temperature: self.initial_temperature(),
            restart_counter: 0,
            swap_count: 0,
            restarts: 0,
        }
    }

    /// Applies the end-of-round transition for `state.round`.
    pub fn end_round(&self, state: &mut RunState) {
        self.cool_down(state);
        if let Some(interval) = self.restart_interval {
            self.restart_check(state, interval);
        }
    }

    fn cool_down(&self, state: &mut RunState) {
        state.temperature = match (self.cooling, state.temperature) {
            (CoolingSchedule::Standard { delta, .. }, Temperature::Standard(t)) => {
                let next = if t > 1.0 { t - delta } else { t };
                Temperature::Standard(next.max(1.0))
            }
            (
                CoolingSchedule::Enhanced {
                    min, alpha, every, ..
                },
                Temperature::Enhanced(t),
            ) => {
                if t >= min && state.round % every == every - 1 {
                    let next = t * alpha;
                    Temperature::Enhanced(if next < min { 0.0 } else { next })
                } else {
                    Temperature::Enhanced(t)
                }
            }
            // The state is always created from this schedule.
            (_, other) => other,
        };
    }

    fn restart_check(&self, state: &mut RunState, interval: usize) {
        if state.temperature.is_frozen() {
            state.restart_counter += 1;
        }
        if state.restart_counter == interval {
            state.temperature = self.initial_temperature();
            state.restart_counter = 0;
            state.restarts += 1;
            debug!(
                "round {}: reheated to {}",
                state.round,
                state.temperature.value()
            );
        }
    }
}
