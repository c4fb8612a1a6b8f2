pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod store;
pub mod utils;

pub use error::LabError;
pub use server::LabApp;
