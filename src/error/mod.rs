mod lab;

pub use lab::{DetailBody, LabError};
