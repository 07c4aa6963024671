use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Concurrency,
    Timeout,
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::NotFound => write!(f, "Requested record was not found"),
            KernelError::Conflict => write!(f, "Record state conflicts with the operation"),
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// Failure codes surfaced by sign-in.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AuthError {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    UserDisabled,
    Internal,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "auth/user-not-found",
            AuthError::WrongPassword => "auth/wrong-password",
            AuthError::InvalidEmail => "auth/invalid-email",
            AuthError::UserDisabled => "auth/user-disabled",
            AuthError::Internal => "auth/internal-error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "No user found with this email.",
            AuthError::WrongPassword => "Incorrect password.",
            AuthError::InvalidEmail => "Invalid email address.",
            AuthError::UserDisabled => "This account has been disabled.",
            AuthError::Internal => "Failed to login. Please try again.",
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Context for AuthError {}
