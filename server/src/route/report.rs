use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use error_stack::Report;
use kernel::KernelError;

use application::service::{ExportService, ReportService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{ExportRequest, ReportTransformer};
use crate::response::ReportPresenter;
use crate::session::AdminSession;

pub trait ReportRouter {
    fn route_report(self) -> Self;
}

impl<D: Backend> ReportRouter for Router<AppModule<D>> {
    fn route_report(self) -> Self {
        self.route(
            "/dashboard",
            get(
                |State(module): State<AppModule<D>>, AdminSession(session): AdminSession| async move {
                    Controller::new((), ReportPresenter)
                        .bypass(|| async move {
                            let report = module.database().get_report().await?;
                            Ok::<_, Report<KernelError>>((session, report))
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reports",
            get(|State(module): State<AppModule<D>>, _: AdminSession| async move {
                Controller::new((), ReportPresenter)
                    .bypass(|| async move { module.database().get_report().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/reports/consistency",
            get(|State(module): State<AppModule<D>>, _: AdminSession| async move {
                Controller::new((), ReportPresenter)
                    .bypass(|| async move { module.database().check_consistency().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/reports/:target/export",
            get(
                |State(module): State<AppModule<D>>,
                 _: AdminSession,
                 Path(target): Path<String>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .try_intake(ExportRequest::new(target))?
                        .handle(|dto| async move { module.database().export(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
