use thiserror::Error;

/// Failure talking to a [`PermissionStore`](crate::store::PermissionStore).
///
/// None of these are fatal to a session: load failures fall back to the
/// default table and save failures are logged and dropped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("permission store unreachable: {0}")]
    Unreachable(String),

    #[error("permission store answered with status {status}")]
    Status { status: u16 },

    #[error("malformed permission store response: {0}")]
    Malformed(String),

    #[error("permission store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("permission store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Malformed data is handled as "zero records" by the load protocol.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Short label used for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::Status { .. } => "status",
            Self::Malformed(_) => "malformed",
            Self::Io(_) => "io",
            Self::Backend(_) => "backend",
        }
    }
}

/// A permission table no session may hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid identifiers for job title '{job_title}' and navigation item '{navigation_item}'")]
    InvalidIdentifier {
        job_title: String,
        navigation_item: String,
    },

    #[error("duplicate permission for job title '{job_title}' and navigation item '{navigation_item}'")]
    DuplicatePair {
        job_title: String,
        navigation_item: String,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
