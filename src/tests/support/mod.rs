pub mod cv_fixtures;
pub mod stubs;
