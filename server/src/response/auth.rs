use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use kernel::AuthError;

/// Minimal sign-in form. A failed attempt is rendered again with its message.
pub struct LoginPage {
    action: String,
    failure: Option<AuthError>,
}

impl LoginPage {
    pub fn new(action: String) -> Self {
        Self {
            action,
            failure: None,
        }
    }

    pub fn failed(action: String, failure: AuthError) -> Self {
        Self {
            action,
            failure: Some(failure),
        }
    }
}

impl IntoResponse for LoginPage {
    fn into_response(self) -> Response {
        let (status, message) = match self.failure {
            Some(failure) => (
                StatusCode::UNAUTHORIZED,
                format!(
                    r#"<p class="error" data-code="{}">{}</p>"#,
                    failure.code(),
                    failure.message()
                ),
            ),
            None => (StatusCode::OK, String::new()),
        };
        let page = format!(
            r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<h1>Sign in</h1>
{message}
<form method="post" action="{action}">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign in</button>
</form>
</body>
</html>
"#,
            action = self.action,
        );
        (status, Html(page)).into_response()
    }
}
