//! Typed error taxonomy shared by every drift-kit crate.

use std::fmt;

/// Broad classification of a failure, used to pick a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    FileSystem,
    Provider,
    Network,
    PermissionDenied,
    NotFound,
    Timeout,
    Internal,
}

/// Core error type for all drift-kit operations.
///
/// Carries a `kind` for exit-code mapping, an optional `provider` tag, a
/// human `message`, an optional chained `cause`, and an ordered list of
/// operator-facing `solutions`.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub provider: Option<String>,
    pub message: String,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub solutions: Vec<String>,
    pub help: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{provider}] {}", self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl Error {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            provider: None,
            message: message.into(),
            cause: None,
            solutions: Vec::new(),
            help: None,
        }
    }

    pub fn with_provider<S: Into<String>>(mut self, provider: S) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_cause<E: std::error::Error + Send + Sync + 'static>(mut self, cause: E) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_solutions<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        solutions: I,
    ) -> Self {
        self.solutions = solutions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn provider_error<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Provider, message)
    }

    pub fn permission_denied<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The process exit code this error maps to, per the exit-code table:
    /// 0 success/no-drift, 1 success-with-drift or user error, 2 validation,
    /// 3 permission, 4 timeout, 5 internal. Collectors never return 0 or 1
    /// themselves -- those are assigned by the command layer after a
    /// successful run.
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::Validation => 2,
            ErrorKind::PermissionDenied => 3,
            ErrorKind::Timeout => 4,
            ErrorKind::Internal => 5,
            ErrorKind::FileSystem
            | ErrorKind::Provider
            | ErrorKind::Network
            | ErrorKind::NotFound => 1,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        let kind = match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::FileSystem,
        };
        Self::new(kind, e.to_string()).with_cause(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Validation, format!("invalid JSON: {e}")).with_cause(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
