mod auth;
mod beneficiary;
mod equipment;
mod rent;
mod report;
mod returned;

pub use self::{auth::*, beneficiary::*, equipment::*, rent::*, report::*, returned::*};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, Backend};

/// Every console route, mounted below the configured base path.
pub fn router<D: Backend>(module: AppModule<D>) -> Router {
    let config = module.config().clone();

    let mut routes = Router::new()
        .route_auth()
        .route_beneficiary()
        .route_equipment()
        .route_rent()
        .route_return()
        .route_report();
    if let Some(dir) = config.static_dir() {
        routes = routes.nest_service("/assets", ServeDir::new(dir));
    }
    let routes = routes.with_state(module);

    let app = if config.base_path().is_empty() {
        routes
    } else {
        Router::new().nest(config.base_path(), routes)
    };

    app.layer(TraceLayer::new_for_http()).layer(CorsLayer::new())
}

#[cfg(test)]
mod test {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::Value;
    use time::Duration;
    use tower::ServiceExt;

    use application::service::{AuthService, GetBeneficiaryService};
    use application::transfer::{GetAllBeneficiaryDto, RegisterAccountDto};
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::PUBLIC_REGISTRATION;

    use crate::config::ServerConfig;
    use crate::handler::AppModule;

    use super::router;

    const EMAIL: &str = "admin@example.org";
    const PASSWORD: &str = "correct horse";

    async fn app(base_path: &str) -> (InMemoryDatabase, Router) {
        let db = InMemoryDatabase::new();
        db.register_account(&RegisterAccountDto {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().unwrap(),
            base_path,
            None,
            Duration::minutes(30),
            None,
        );
        let router = router(AppModule::new(db.clone(), config));
        (db, router)
    }

    fn form(method: Method, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn json(response: Response) -> Value {
        serde_json::from_str(&text(response).await).unwrap()
    }

    /// Signs in through the login form and returns the `name=value` cookie pair.
    async fn sign_in(router: &Router, prefix: &str) -> String {
        let response = router
            .clone()
            .oneshot(form(
                Method::POST,
                &format!("{prefix}/login"),
                None,
                "email=admin%40example.org&password=correct+horse",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("{prefix}/dashboard"));
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    const BENEFICIARY: &str = "name=Amina&fatherName=Yusuf&gender=Female&dateOfBirth=1990-04-12\
        &address=12+Market+Road&contact=0300-1234567";

    #[tokio::test]
    async fn gated_routes_redirect_to_login() {
        let (_, router) = app("").await;
        let response = router.oneshot(get("/beneficiaries", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        let (_, router) = app("/asc").await;
        let response = router
            .oneshot(get("/asc/dashboard", Some("asc_session=not-a-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/asc/login");
    }

    #[tokio::test]
    async fn public_registration_needs_no_session() {
        let (db, router) = app("").await;
        let response = router
            .oneshot(form(Method::POST, "/register-beneficiary", None, BENEFICIARY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let all = db
            .get_all_beneficiaries(&GetAllBeneficiaryDto { query: None })
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].created_by, PUBLIC_REGISTRATION);
    }

    #[tokio::test]
    async fn sign_in_opens_the_dashboard() {
        let (_, router) = app("/asc").await;
        let cookie = sign_in(&router, "/asc").await;

        let response = router
            .clone()
            .oneshot(get("/asc/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["email"], EMAIL);
        assert_eq!(body["statistics"]["totalBeneficiaries"], 0);

        let response = router
            .clone()
            .oneshot(form(Method::POST, "/asc/logout", Some(&cookie), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/asc/login");

        let response = router
            .oneshot(get("/asc/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn wrong_password_shows_the_form_again() {
        let (_, router) = app("").await;
        let response = router
            .oneshot(form(
                Method::POST,
                "/login",
                None,
                "email=admin%40example.org&password=nope",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(text(response).await.contains("Incorrect password."));
    }

    #[tokio::test]
    async fn rent_then_rent_again_conflicts() {
        let (_, router) = app("").await;
        let cookie = sign_in(&router, "").await;

        let response = router
            .clone()
            .oneshot(form(Method::POST, "/beneficiaries", Some(&cookie), BENEFICIARY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let beneficiary = json(response).await["id"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(form(
                Method::POST,
                "/equipment",
                Some(&cookie),
                "name=Wheelchair&serialNumber=WC-001&manufacturingDate=2022-01-01\
                    &expiryDate=2030-01-01&source=Donated&condition=Ok",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let equipment = json(response).await["id"].as_str().unwrap().to_string();

        let rent = format!(
            "beneficiaryId={beneficiary}&equipmentId={equipment}&conditionOnGiven=Ok&rentDate=2024-03-01"
        );
        let response = router
            .clone()
            .oneshot(form(Method::POST, "/rents", Some(&cookie), &rent))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .clone()
            .oneshot(form(Method::POST, "/rents", Some(&cookie), &rent))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = router
            .oneshot(get("/equipment/available", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(json(response).await, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn equipment_can_be_registered_as_rented() {
        let (_, router) = app("").await;
        let cookie = sign_in(&router, "").await;

        let response = router
            .clone()
            .oneshot(form(
                Method::POST,
                "/equipment",
                Some(&cookie),
                "name=Walker&serialNumber=WK-9&manufacturingDate=2022-01-01\
                    &expiryDate=2030-01-01&status=Rented&source=Purchased&condition=Ok",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let equipment = json(response).await["id"].as_str().unwrap().to_string();

        let response = router
            .oneshot(get("/reports/consistency", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let findings = json(response).await;
        assert_eq!(findings[0]["kind"], "rentedWithoutRent");
        assert_eq!(findings[0]["equipmentId"], equipment.as_str());
    }

    #[tokio::test]
    async fn malformed_dates_are_unprocessable() {
        let (_, router) = app("").await;
        let response = router
            .oneshot(form(
                Method::POST,
                "/register-beneficiary",
                None,
                "name=Amina&fatherName=Yusuf&gender=Female&dateOfBirth=12/04/1990\
                    &address=12+Market+Road&contact=0300-1234567",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn empty_export_returns_a_notice() {
        let (_, router) = app("").await;
        let cookie = sign_in(&router, "").await;

        let response = router
            .clone()
            .oneshot(get("/reports/beneficiaries/export", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["notice"], "No data to export");

        let response = router
            .oneshot(get("/reports/invoices/export", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
