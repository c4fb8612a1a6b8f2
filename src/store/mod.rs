//! Process-local record stores. Contents reset on every restart.

pub mod orders;
pub mod todos;

pub use orders::OrderBook;
pub use todos::TodoList;
