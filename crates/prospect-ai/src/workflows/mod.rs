pub mod audit;
pub mod gating;
pub mod pipeline;
pub mod resolution;
pub mod scoring;
