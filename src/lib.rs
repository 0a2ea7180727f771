//! covgate - coverage quality gates for CI
//!
//! Normalizes a sparse coverage gate config, evaluates aggregated coverage
//! results against it, and reports pass/fail verdicts.

pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod reporters;
