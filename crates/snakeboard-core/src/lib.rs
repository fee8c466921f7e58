// Library root: re-exports all modules so integration tests and the board
// front-end can reach the crate's public API.

pub mod config;
pub mod db;
pub mod draft;
pub mod store;
