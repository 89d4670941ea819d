//! Core domain types and logic.

pub mod bar;
pub mod signal;
pub mod trade;
pub mod indicator;
pub mod strategy;
pub mod aggregate;
pub mod engine;
pub mod metrics;
pub mod config;
pub mod error;
