pub mod binding;
pub mod registry;
pub mod simulator;
