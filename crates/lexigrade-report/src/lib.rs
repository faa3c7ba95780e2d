//! lexigrade-report — Rendering and export of analysis reports.
//!
//! Terminal tables, flat CSV, and a markdown digest; all consume the
//! report produced by lexigrade-core and contain no decision logic.

pub mod csv;
pub mod markdown;
pub mod table;
