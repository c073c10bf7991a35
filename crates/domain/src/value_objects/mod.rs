//! Domain Value Objects - immutable concepts without identity

pub mod doc_level;
pub mod rating;

pub use doc_level::DocLevel;
pub use rating::Rating;
