//! Clock driver.
//!
//! `ClockDriver` owns a model and counts the edges it applies. Tests and
//! harnesses use it to step with explicit inputs, idle for a number of
//! cycles, or wait for an output condition with a cycle limit.

use super::traits::Clocked;

/// Drives a [`Clocked`] model one edge at a time.
#[derive(Debug)]
pub struct ClockDriver<M> {
    model: M,
    cycle: u64,
}

impl<M: Clocked> ClockDriver<M> {
    /// Wraps `model` with the cycle count at zero.
    pub const fn new(model: M) -> Self {
        Self { model, cycle: 0 }
    }

    /// Returns the number of edges applied since creation or the last reset.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Returns the model for seeding or inspection.
    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Unwraps the model.
    pub fn into_inner(self) -> M {
        self.model
    }

    /// Returns the outputs of the most recent edge.
    pub fn outputs(&self) -> &M::Outputs {
        self.model.outputs()
    }

    /// Applies one edge.
    ///
    /// # Returns
    ///
    /// The outputs after the edge.
    pub fn step(&mut self, inputs: &M::Inputs) -> &M::Outputs {
        self.model.eval(inputs);
        self.cycle += 1;
        self.model.outputs()
    }

    /// Applies `cycles` edges with the same inputs.
    pub fn hold(&mut self, inputs: &M::Inputs, cycles: u64) {
        for _ in 0..cycles {
            self.model.eval(inputs);
            self.cycle += 1;
        }
    }

    /// Applies edges with `inputs` until `done` accepts the outputs.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Inputs held for every edge.
    /// * `max_cycles` - Upper bound on edges applied.
    /// * `done` - Predicate checked after each edge.
    ///
    /// # Returns
    ///
    /// The number of edges applied when `done` first held, or `None` if it
    /// never did within `max_cycles`.
    pub fn run_until<F>(&mut self, inputs: &M::Inputs, max_cycles: u64, mut done: F) -> Option<u64>
    where
        F: FnMut(&M::Outputs) -> bool,
    {
        for n in 1..=max_cycles {
            self.model.eval(inputs);
            self.cycle += 1;
            if done(self.model.outputs()) {
                return Some(n);
            }
        }
        None
    }

    /// Resets the model and the cycle count.
    pub fn reset(&mut self) {
        self.model.reset();
        self.cycle = 0;
    }
}

impl<M> ClockDriver<M>
where
    M: Clocked,
    M::Inputs: Default,
{
    /// Applies `cycles` edges with default (quiescent) inputs.
    pub fn idle(&mut self, cycles: u64) {
        self.hold(&M::Inputs::default(), cycles);
    }
}
