// Terminal front-end for the draft board: command parsing, text rendering,
// and the session that ties them to the engine.

pub mod app;
pub mod command;
pub mod render;
pub mod storage;
