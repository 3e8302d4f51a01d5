//! The two, rigorously separated error kinds from `spec.md` §7.

/// A malformed argv, a missing required pattern, an unknown flag, an
/// ambiguous prefix, or surplus tokens: anything the end user can fix
/// by changing their command line. Carries the printable usage text
/// so a caller can print exactly what the original `DocoptExit`
/// prints, without re-deriving it.
#[derive(Debug, thiserror::Error)]
#[error("{message}\n{usage}")]
pub struct UserError {
    pub message: String,
    pub usage: String,
}

impl UserError {
    pub fn new(message: impl Into<String>, usage: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            usage: usage.into(),
        }
    }
}

/// The usage text references an option the option-description table
/// never declared, brackets are unbalanced, or argcount disagrees
/// between usage and descriptors: a bug in the *developer's* doc
/// string. Never meant to reach an end user in normal operation.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DeveloperError(pub String);

impl DeveloperError {
    pub fn new(message: impl Into<String>) -> Self {
        DeveloperError(message.into())
    }
}

/// The top-level error returned by [`crate::parse`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Developer(#[from] DeveloperError),
}
