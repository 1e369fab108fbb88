pub mod sandbox;
pub mod traits;
