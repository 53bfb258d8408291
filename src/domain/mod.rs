pub mod compliance;
pub mod detection;
pub mod errors;
pub mod palette;
pub mod upload;
