//! Core types for describing a rebin

mod operation;
mod plan;
mod remainder;

pub use operation::Operation;
pub use plan::BlockPlan;
pub use remainder::Remainder;
