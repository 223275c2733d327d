use thiserror::Error;

/// Reasons a request is rejected before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("{0} is missing required fields")]
    MissingRequiredFields(&'static str),

    #[error("Someone already has that {0}. Could you try another?")]
    DuplicateEntry(&'static str),

    #[error("It is not possible to remove the owner from the team.")]
    RemoveOwnerFromTeam,

    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Reasons a requester is denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForbiddenReason {
    #[error("Only the owner has permission to perform this operation.")]
    OnlyOwnerHasPermission,

    #[error("You do not belong to this team!")]
    UserNotInTeam,

    // Also returned for services the requester does not own.
    #[error("Service not found.")]
    ServiceNotFound,

    #[error("Authentication failed.")]
    AuthenticationFailed,
}

/// Coarse classification of a [`DomainError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Forbidden,
    NotFound,
    Storage,
    Publication,
}

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {reason}")]
    Validation { reason: ValidationReason },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: ForbiddenReason },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Publication error: {message}")]
    Publication { message: String },
}

impl DomainError {
    pub fn validation(reason: ValidationReason) -> Self {
        Self::Validation { reason }
    }

    pub fn forbidden(reason: ForbiddenReason) -> Self {
        Self::Forbidden { reason }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn publication(message: impl Into<String>) -> Self {
        Self::Publication {
            message: message.into(),
        }
    }

    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::validation(ValidationReason::InvalidField {
            field,
            message: message.into(),
        })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Publication { .. } => ErrorKind::Publication,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
