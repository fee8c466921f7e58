pub mod board;
pub mod order;
pub mod pick;
pub mod state;
pub mod team;
