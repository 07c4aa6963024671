use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;

use application::service::AuthService;
use kernel::AuthError;

use crate::controller::Intake;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{AuthTransformer, SignInForm, SignOutRequest};
use crate::response::LoginPage;
use crate::session::{expired_cookie, session_cookie, session_token};

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl<D: Backend> AuthRouter for Router<AppModule<D>> {
    fn route_auth(self) -> Self {
        self.route(
            "/",
            get(|State(module): State<AppModule<D>>| async move {
                Redirect::to(&module.config().path("/dashboard"))
            }),
        )
        .route(
            "/login",
            get(|State(module): State<AppModule<D>>| async move {
                LoginPage::new(module.config().path("/login"))
            })
            .post(
                |State(module): State<AppModule<D>>,
                 jar: CookieJar,
                 Form(form): Form<SignInForm>| async move {
                    let dto = Intake::<SignInForm>::emit(&AuthTransformer, form);
                    let ttl = *module.config().session_ttl();
                    match module.database().sign_in(&dto, ttl).await {
                        Ok(session) => {
                            let cookie = session_cookie(module.config(), &session);
                            (
                                jar.add(cookie),
                                Redirect::to(&module.config().path("/dashboard")),
                            )
                                .into_response()
                        }
                        Err(report) => {
                            let failure = *report.current_context();
                            if failure == AuthError::Internal {
                                tracing::error!("{report:?}");
                            } else {
                                tracing::warn!(code = failure.code(), "Sign-in rejected");
                            }
                            LoginPage::failed(module.config().path("/login"), failure)
                                .into_response()
                        }
                    }
                },
            ),
        )
        .route(
            "/logout",
            post(
                |State(module): State<AppModule<D>>, jar: CookieJar| async move {
                    if let Some(token) = session_token(&jar) {
                        let dto =
                            Intake::<SignOutRequest>::emit(&AuthTransformer, SignOutRequest::new(token));
                        module
                            .database()
                            .sign_out(&dto)
                            .await
                            .map_err(ErrorStatus::from)?;
                    }
                    Ok::<_, ErrorStatus>((
                        jar.remove(expired_cookie(module.config())),
                        Redirect::to(&module.config().path("/login")),
                    ))
                },
            ),
        )
    }
}
