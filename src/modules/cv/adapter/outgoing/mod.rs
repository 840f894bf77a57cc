pub(crate) mod sea_orm_entity;

mod cv_repo_postgres;
pub use cv_repo_postgres::CVRepoPostgres;

mod cv_query_postgres;
pub use cv_query_postgres::CVQueryPostgres;

mod user_query_postgres;
pub use user_query_postgres::UserQueryPostgres;
