pub mod hello;
pub mod items;
pub mod orders;
pub mod todos;
pub mod uploads;
