use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Turns a `(season, username)` unique index violation into a
    /// `ConstraintViolation` naming the season; other errors pass through.
    pub fn for_season(self, season: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(format!(
                "duplicate username in season '{}'",
                season
            ))
        } else {
            self
        }
    }
}
