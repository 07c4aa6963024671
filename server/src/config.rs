use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::{Report, ResultExt};
use time::Duration;
use vodca::References;

use kernel::KernelError;

pub static BIND_ADDRESS: &str = "BIND_ADDRESS";
pub static BASE_PATH: &str = "BASE_PATH";
pub static STATIC_DIR: &str = "STATIC_DIR";
pub static SESSION_TTL_MINUTES: &str = "SESSION_TTL_MINUTES";
pub static ADMIN_EMAIL: &str = "ADMIN_EMAIL";
pub static ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 720;

#[derive(Debug, Clone, References)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

#[derive(Debug, Clone, References)]
pub struct ServerConfig {
    bind_address: SocketAddr,
    base_path: String,
    static_dir: Option<PathBuf>,
    session_ttl: Duration,
    admin: Option<AdminCredentials>,
}

fn optional(key: &str) -> Option<String> {
    dotenvy::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `""` for the root, otherwise a single leading slash and no trailing one.
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

impl ServerConfig {
    pub fn new(
        bind_address: SocketAddr,
        base_path: &str,
        static_dir: Option<PathBuf>,
        session_ttl: Duration,
        admin: Option<AdminCredentials>,
    ) -> Self {
        Self {
            bind_address,
            base_path: normalize_base_path(base_path),
            static_dir,
            session_ttl,
            admin,
        }
    }

    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let bind_address = optional(BIND_ADDRESS)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{BIND_ADDRESS} is not a socket address"))?;

        let minutes = match optional(SESSION_TTL_MINUTES) {
            Some(value) => value
                .parse::<i64>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| format!("{SESSION_TTL_MINUTES} is not a number"))?,
            None => DEFAULT_SESSION_TTL_MINUTES,
        };
        if minutes <= 0 {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("{SESSION_TTL_MINUTES} must be positive")));
        }

        let admin = match (optional(ADMIN_EMAIL), optional(ADMIN_PASSWORD)) {
            (Some(email), Some(password)) => Some(AdminCredentials { email, password }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "{ADMIN_EMAIL} and {ADMIN_PASSWORD} must be set together, skipping admin bootstrap"
                );
                None
            }
        };

        Ok(Self::new(
            bind_address,
            &optional(BASE_PATH).unwrap_or_default(),
            optional(STATIC_DIR).map(PathBuf::from),
            Duration::minutes(minutes),
            admin,
        ))
    }

    /// Absolute path of `path` below the base path.
    pub fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }
}
