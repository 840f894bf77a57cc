pub mod cv_query;
pub mod cv_repository;
pub mod user_query;

pub use cv_query::{CVQuery, CVQueryError};
pub use cv_repository::{CVRepository, CVRepositoryError};
pub use user_query::{UserQuery, UserQueryError};
