//! Roster - customer records for the pharmacy back office
//!
//! Filters a customer collection by free text, status and tab, derives the
//! per-status counts and spend figures shown on the customer page, and
//! exports the selection. The collection is always passed in explicitly.

pub mod commands;
pub mod config;
pub mod customer;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod source;
pub mod stats;

pub use config::RosterConfig;
pub use customer::{Customer, CustomerStatus, EmergencyContact, RiskLevel};
pub use error::{Result, RosterError};
pub use filter::{filter, find_customer, CustomerQuery, StatusFilter};
pub use source::{CustomerSource, FileSource, SeedSource};
pub use stats::{aggregate_financials, aggregate_status_counts, overview, Financials, Overview, StatusCounts};
