//! Clocked Model Interface.
//!
//! Both views of the SDRAM model are synchronous: they sample their inputs on
//! a rising edge and present new outputs until the next one. The harness that
//! owns the clock only needs this trait.

/// A model evaluated once per rising clock edge.
pub trait Clocked {
    /// Signals sampled on each edge.
    type Inputs;
    /// Signals presented after each edge.
    type Outputs;

    /// Evaluates one rising edge with `inputs` held stable for the cycle.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Input signals for this edge.
    fn eval(&mut self, inputs: &Self::Inputs);

    /// Returns the outputs produced by the most recent edge.
    fn outputs(&self) -> &Self::Outputs;

    /// Returns the model to its power-on state. Memory contents survive.
    fn reset(&mut self);
}
