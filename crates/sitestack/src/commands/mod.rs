pub mod config;
pub mod outputs;
pub mod plan;
pub mod preview;
pub mod synth;
pub mod validate;
