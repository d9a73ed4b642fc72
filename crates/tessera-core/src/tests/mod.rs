// Crate-level test support and cross-module scenarios
pub mod integration;
