pub mod config;
pub mod logging;

// Checksum engine
pub mod checksum;
pub mod classify;
pub mod create;
pub mod engine;
pub mod outcome;
pub mod progress;
pub mod report;
pub mod sidecar;
pub mod state;
pub mod traversal;
pub mod verify;
