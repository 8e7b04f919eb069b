#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The backing file's location could not be determined from the
    /// supplied options.
    ///
    /// Raised at construction only: nothing downstream ever picks a
    /// location on its own.
    #[error("config location could not be resolved: {message}")]
    Unresolvable { message: String },

    /// A multi-key assignment did not serialize to a JSON object.
    ///
    /// Raised before any file I/O, so the store is untouched.
    #[error("expected assignments to serialize to a JSON object, got {found}")]
    InvalidAssignments { found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
