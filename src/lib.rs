//! HTTP backend for a trivia quiz application: questions and categories in
//! SQLite, served as JSON.

pub mod configuration;
pub mod db;
pub mod server;
pub mod telemetry;
