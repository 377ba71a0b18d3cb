//! Attendance-driven payroll engine.
//!
//! This crate turns daily attendance punches into worked hours, derives
//! weekly and monthly cutoff periods, computes the Philippine statutory
//! deductions (SSS, PhilHealth, Pag-IBIG and withholding tax), and combines
//! them into gross and net pay. A thin axum adapter exposes the pipeline
//! over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
