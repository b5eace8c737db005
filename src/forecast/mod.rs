pub mod cwa;
pub mod transform;
pub mod types;
