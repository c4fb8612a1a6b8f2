pub mod extract;
pub mod lab;
pub mod router;
pub mod routes;

pub use lab::LabApp;
