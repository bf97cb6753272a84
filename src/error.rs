use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An exercise named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// True when the error is SQLite rejecting a row that would break a
/// UNIQUE constraint. Callers use this to turn a name collision into
/// `AppError::DuplicateName` instead of a generic database error.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub type Result<T> = std::result::Result<T, AppError>;
