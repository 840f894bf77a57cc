use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ok"
    }
}

/// READINESS PROBE
/// - Round trip to the database with `SELECT 1`
pub async fn check_database(db: &DatabaseConnection) -> ReadinessReport {
    match db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1",
        ))
        .await
    {
        Ok(_) => ReadinessReport {
            status: "ok",
            database: "ok",
        },
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            ReadinessReport {
                status: "unhealthy",
                database: "unhealthy",
            }
        }
    }
}
