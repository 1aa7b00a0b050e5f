//! View-derivation and file-format logic, kept free of I/O so every rule
//! here is unit-testable without a running document store.

pub mod export;
pub mod import;
pub mod status_report;
