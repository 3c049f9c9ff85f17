//! Classification shared by every realm-core error.
//!
//! Each operation family keeps its own error enum next to the code that
//! raises it (`AttributeError`, `InvocationError`, `HitError`, `LearnError`).
//! The runtime only looks at the [`GameError`] view to pick a log level and
//! to decide whether a failure stays a status value or aborts startup.

/// How bad a failure is and who has to act on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The world moved on (target died, target left); the same request may
    /// succeed later.
    Recoverable,
    /// The request itself is wrong for the actor's current state.
    Validation,
    /// Bookkeeping mismatch inside the server.
    Internal,
    /// Broken content tables; only raised while building the catalog.
    Fatal,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Server-side defect rather than a client or timing issue.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum of this crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and metrics.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
