pub mod external;
pub mod traits;
