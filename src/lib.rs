//! Interactive terminal browser and editor for Wikipedia tables.
//!
//! Fetches every table on one or more wiki pages through the
//! wikitable2json service and lets the user page through them, delete
//! rows and columns, and reset a table back to what was fetched.

pub mod app;
pub mod grid;
pub mod input;
pub mod render;
pub mod table;
pub mod wiki;
