//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and converter-specific implementations.

pub mod sampler;

pub use sampler::{AnalogSampler, SampleError};
