//! `manuscript-length` - estimate the physical length of an ancient scroll.
//!
//! Given how many characters a book holds and how its text is laid out in
//! columns, the calculator derives how many columns the book fills and how
//! many centimeters of parchment that takes. A terminal UI and a command-line
//! binary share this library.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod batch;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod diagram;
pub mod error;
pub mod form;
pub mod input;
pub mod logging;
pub mod types;
pub mod ui;
