//! Subway network server.
//!
//! Keeps each line's segments a single consistent path under insertion and
//! removal, and answers "what is the shortest route from A to B, and what
//! does it cost?" across every line.

pub mod config;
pub mod domain;
pub mod route;
pub mod store;
pub mod subway;
pub mod topology;
pub mod web;
