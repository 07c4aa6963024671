use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use application::service::AuthService;
use application::transfer::{CurrentSessionDto, SessionContext};

use crate::config::ServerConfig;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};

pub static SESSION_COOKIE: &str = "asc_session";

/// Session token carried by the request, if it is a well-formed one.
pub fn session_token(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(config: &ServerConfig, session: &SessionContext) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.token.to_string()))
        .path(cookie_path(config))
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(*config.session_ttl())
        .build()
}

pub fn expired_cookie(config: &ServerConfig) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path(cookie_path(config)).build()
}

/// The base path itself, so the cookie also reaches the bare `/asc` redirect route.
fn cookie_path(config: &ServerConfig) -> String {
    match config.base_path().as_str() {
        "" => "/".to_string(),
        base => base.to_string(),
    }
}

/// Signed-in administrator. Requests without a live session are redirected to the login page.
pub struct AdminSession(pub SessionContext);

#[async_trait]
impl<D: Backend> FromRequestParts<AppModule<D>> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule<D>,
    ) -> Result<Self, Self::Rejection> {
        let to_login = || Redirect::to(&module.config().path("/login")).into_response();

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = session_token(&jar) else {
            tracing::debug!(path = %parts.uri.path(), "No session, redirecting to login");
            return Err(to_login());
        };

        match module
            .database()
            .current_session(&CurrentSessionDto { token })
            .await
        {
            Ok(Some(session)) => Ok(AdminSession(session)),
            Ok(None) => {
                tracing::debug!(path = %parts.uri.path(), "Unknown or expired session");
                Err(to_login())
            }
            Err(report) => Err(ErrorStatus::from(report).into_response()),
        }
    }
}
