//! Controller layer: bootstrap completion events and the render-gating state machine.

pub mod events;
pub mod gate;
