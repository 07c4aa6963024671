use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use error_stack::{Report, ResultExt};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    AccountQuery, DependOnAccountQuery, DependOnSessionQuery, SessionQuery,
};
use kernel::interface::update::{
    AccountModifier, DependOnAccountModifier, DependOnSessionModifier, SessionModifier,
};
use kernel::prelude::entity::{
    Account, AccountId, CreatedAt, Email, ExpiresAt, PasswordHash, Session, SessionToken,
};
use kernel::{AuthError, KernelError};

use crate::transfer::{
    CurrentSessionDto, RegisterAccountDto, SessionContext, SignInDto, SignOutDto,
};

/// Argon2id with a random salt, PHC-encoded.
fn hash_password(password: &str) -> error_stack::Result<PasswordHash, KernelError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Password hashing failed: {e}"))
        })?;
    Ok(PasswordHash::new(hash.to_string()))
}

fn verify_password(password: &str, hash: &PasswordHash) -> error_stack::Result<bool, AuthError> {
    let parsed = PhcString::new(hash.as_ref()).map_err(|e| {
        Report::new(AuthError::Internal)
            .attach_printable(format!("Invalid password hash format: {e}"))
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Report::new(AuthError::Internal)
            .attach_printable(format!("Password verification failed: {e}"))),
    }
}

#[async_trait::async_trait]
pub trait AuthService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAccountQuery
    + DependOnAccountModifier
    + DependOnSessionQuery
    + DependOnSessionModifier
{
    /// Checks the credentials and opens a session lasting `ttl`.
    async fn sign_in(
        &self,
        dto: &SignInDto,
        ttl: Duration,
    ) -> error_stack::Result<SessionContext, AuthError> {
        let email = Email::parse(&dto.email)?;

        let mut connection = self
            .database_connection()
            .transact()
            .await
            .change_context(AuthError::Internal)?;

        let account = self
            .account_query()
            .find_by_email(&mut connection, &email)
            .await
            .change_context(AuthError::Internal)?
            .ok_or_else(|| {
                Report::new(AuthError::UserNotFound).attach_printable(email.as_ref().clone())
            })?;
        if *account.disabled() {
            return Err(Report::new(AuthError::UserDisabled));
        }
        if !verify_password(&dto.password, account.password_hash())? {
            tracing::warn!(account_id = %account.id().as_ref(), "Sign-in with wrong password");
            return Err(Report::new(AuthError::WrongPassword));
        }

        let session = Session::new(
            SessionToken::generate(),
            account.id().clone(),
            email,
            ExpiresAt::new(OffsetDateTime::now_utc() + ttl),
        );
        self.session_modifier()
            .create(&mut connection, &session)
            .await
            .change_context(AuthError::Internal)?;
        connection
            .commit()
            .await
            .change_context(AuthError::Internal)?;

        tracing::info!(account_id = %account.id().as_ref(), "Signed in");
        Ok(session.into())
    }

    /// Deletes the session. Unknown tokens are ignored.
    async fn sign_out(&self, dto: &SignOutDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let token = SessionToken::new(dto.token);
        self.session_modifier()
            .delete(&mut connection, &token)
            .await?;
        connection.commit().await?;

        tracing::info!("Signed out");
        Ok(())
    }

    /// Resolves a live session. Expired sessions are removed when seen.
    async fn current_session(
        &self,
        dto: &CurrentSessionDto,
    ) -> error_stack::Result<Option<SessionContext>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let token = SessionToken::new(dto.token);
        let Some(session) = self
            .session_query()
            .find_by_token(&mut connection, &token)
            .await?
        else {
            return Ok(None);
        };

        if session.is_expired(OffsetDateTime::now_utc()) {
            self.session_modifier()
                .delete(&mut connection, &token)
                .await?;
            connection.commit().await?;
            tracing::debug!("Expired session removed");
            return Ok(None);
        }

        Ok(Some(session.into()))
    }

    /// Creates an administrator account. Returns `false` if the email is already taken.
    async fn register_account(
        &self,
        dto: &RegisterAccountDto,
    ) -> error_stack::Result<bool, KernelError> {
        let email = Email::parse(&dto.email).change_context(KernelError::Validation)?;
        if dto.password.is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Password must not be empty"));
        }

        let mut connection = self.database_connection().transact().await?;
        if self
            .account_query()
            .find_by_email(&mut connection, &email)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let uuid = Uuid::new_v4();
        let account = Account::new(
            AccountId::new(uuid),
            email,
            hash_password(&dto.password)?,
            false,
            CreatedAt::now(),
        );
        self.account_modifier()
            .create(&mut connection, &account)
            .await?;
        connection.commit().await?;

        tracing::info!(account_id = %uuid, "Account registered");
        Ok(true)
    }
}

impl<T> AuthService for T where
    T: DependOnDatabaseConnection
        + DependOnAccountQuery
        + DependOnAccountModifier
        + DependOnSessionQuery
        + DependOnSessionModifier
{
}

#[cfg(test)]
mod test {
    use time::Duration;

    use driver::database::InMemoryDatabase;
    use kernel::AuthError;

    use crate::service::AuthService;
    use crate::transfer::{CurrentSessionDto, RegisterAccountDto, SignInDto, SignOutDto};

    async fn with_admin() -> InMemoryDatabase {
        let db = InMemoryDatabase::new();
        let created = db
            .register_account(&RegisterAccountDto {
                email: "Admin@Example.org".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();
        assert!(created);
        db
    }

    fn sign_in(email: &str, password: &str) -> SignInDto {
        SignInDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_then_out() {
        let db = with_admin().await;

        let session = db
            .sign_in(&sign_in("admin@example.org", "correct horse"), Duration::hours(12))
            .await
            .unwrap();
        assert_eq!(session.email, "admin@example.org");

        let current = db
            .current_session(&CurrentSessionDto {
                token: session.token,
            })
            .await
            .unwrap();
        assert_eq!(current, Some(session.clone()));

        db.sign_out(&SignOutDto {
            token: session.token,
        })
        .await
        .unwrap();
        let current = db
            .current_session(&CurrentSessionDto {
                token: session.token,
            })
            .await
            .unwrap();
        assert!(current.is_none());
    }

    #[tokio::test]
    async fn sign_in_failures_carry_their_code() {
        let db = with_admin().await;
        let cases = [
            ("not-an-email", "correct horse", AuthError::InvalidEmail),
            ("nobody@example.org", "correct horse", AuthError::UserNotFound),
            ("admin@example.org", "wrong", AuthError::WrongPassword),
        ];
        for (email, password, expected) in cases {
            let error = db
                .sign_in(&sign_in(email, password), Duration::hours(1))
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &expected, "{email}");
        }
        assert_eq!(
            AuthError::WrongPassword.message(),
            "Incorrect password."
        );
    }

    #[tokio::test]
    async fn expired_session_is_dropped() {
        let db = with_admin().await;
        let session = db
            .sign_in(&sign_in("admin@example.org", "correct horse"), Duration::seconds(-1))
            .await
            .unwrap();

        let current = db
            .current_session(&CurrentSessionDto {
                token: session.token,
            })
            .await
            .unwrap();
        assert!(current.is_none());
    }

    #[tokio::test]
    async fn registering_twice_keeps_the_first_account() {
        let db = with_admin().await;
        let created = db
            .register_account(&RegisterAccountDto {
                email: "admin@example.org".to_string(),
                password: "another".to_string(),
            })
            .await
            .unwrap();
        assert!(!created);

        db.sign_in(&sign_in("admin@example.org", "correct horse"), Duration::hours(1))
            .await
            .unwrap();
    }
}
