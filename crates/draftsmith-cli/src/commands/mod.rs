//! Command implementations.

pub mod generate;
pub mod normalize;
pub mod profile;

pub use self::generate::execute_generate;
pub use self::normalize::execute_normalize;
pub use self::profile::execute_profile;
