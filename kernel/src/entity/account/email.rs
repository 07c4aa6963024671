use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Accepts `local@domain.tld`, trimmed and lowercased.
    pub fn parse(email: impl AsRef<str>) -> error_stack::Result<Self, AuthError> {
        let email = email.as_ref().trim().to_lowercase();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && !email.contains(char::is_whitespace)
                    && domain
                        .split_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    && !domain.ends_with('.')
            }
            None => false,
        };
        if valid {
            Ok(Self(email))
        } else {
            Err(Report::new(AuthError::InvalidEmail).attach_printable(email))
        }
    }
}

#[cfg(test)]
mod test {
    use super::Email;
    use crate::AuthError;

    #[test]
    fn parse_normalizes() {
        let email = Email::parse("  Admin@Example.org ").unwrap();
        assert_eq!(email.as_ref(), "admin@example.org");
    }

    #[test]
    fn parse_rejects_malformed() {
        for input in ["", "admin", "@example.org", "admin@", "admin@example", "a@b@c.org", "ad min@x.org", "admin@example."] {
            let error = Email::parse(input).unwrap_err();
            assert_eq!(error.current_context(), &AuthError::InvalidEmail, "{input}");
        }
    }
}
