pub mod db;
pub mod limiter;
pub mod utils;
pub mod web;
