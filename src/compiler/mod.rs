pub mod gcc;
pub mod traits;
