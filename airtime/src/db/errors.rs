use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Reservation window where the start does not precede the end
    #[error("reservation window {start_at}..{end_at} is malformed: start must precede end")]
    InvalidTimeRange { start_at: i64, end_at: i64 },

    /// Reservation window with no overlap with the bookable term
    #[error("reservation window {start_at}..{end_at} falls outside the bookable term {term_start}..{term_end}")]
    OutOfTerm {
        start_at: i64,
        end_at: i64,
        term_start: i64,
        term_end: i64,
    },

    /// A covered slot has no remaining capacity. Carries the attempted window
    /// and the term bound so the rejection can explain itself to the caller.
    #[error("no remaining capacity within term {term_start}..{term_end} for reservation window {start_at}..{end_at}")]
    CapacityExhausted {
        start_at: i64,
        end_at: i64,
        term_start: i64,
        term_end: i64,
    },

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key constraint violation")]
    ForeignKeyViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Check constraint violation
    #[error("Check constraint violation")]
    CheckViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Lock-wait timeout, deadlock, or serialization failure. The transaction
    /// has been rolled back; the caller decides whether to retry.
    #[error("Lock contention: {message}")]
    LockContention { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using proper sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                // Postgres surfaces contention as lock_not_available (55P03),
                // deadlock_detected (40P01) or serialization_failure (40001).
                if let Some(code) = db_err.code() {
                    if matches!(code.as_ref(), "55P03" | "40P01" | "40001") {
                        return DbError::LockContention {
                            message: db_err.message().to_string(),
                        };
                    }
                }

                if db_err.is_unique_violation() {
                    DbError::UniqueViolation {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        table: db_err.table().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        table: db_err.table().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::CheckViolation {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        table: db_err.table().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }
                } else {
                    // All other database errors are non-recoverable - convert to anyhow
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

impl DbError {
    /// Whether the failure is transient contention the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::LockContention { .. })
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
