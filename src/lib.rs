pub mod config;
pub mod db;
pub mod routes;
pub mod service;
pub mod types;
pub mod utils;
