use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Form, Router};
use uuid::Uuid;

use application::service::{
    CreateBeneficiaryService, DeleteBeneficiaryService, GetBeneficiaryService,
    UpdateBeneficiaryService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{
    BeneficiaryForm, BeneficiaryTransformer, DeleteByIdRequest, GetByIdRequest, SearchRequest,
};
use crate::response::BeneficiaryPresenter;
use crate::session::AdminSession;

pub trait BeneficiaryRouter {
    fn route_beneficiary(self) -> Self;
}

impl<D: Backend> BeneficiaryRouter for Router<AppModule<D>> {
    fn route_beneficiary(self) -> Self {
        self.route(
            "/register-beneficiary",
            post(
                |State(module): State<AppModule<D>>, Form(form): Form<BeneficiaryForm>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .try_intake(form)?
                        .handle(|dto| async move {
                            module.database().register_beneficiary(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/beneficiaries",
            get(
                |State(module): State<AppModule<D>>,
                 _: AdminSession,
                 Query(req): Query<SearchRequest>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.database().get_all_beneficiaries(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Form(form): Form<BeneficiaryForm>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .try_intake((session, form))?
                        .handle(|dto| async move {
                            module.database().create_beneficiary(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/beneficiaries/:id",
            get(
                |State(module): State<AppModule<D>>, _: AdminSession, Path(id): Path<Uuid>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .intake(GetByIdRequest::new(id))
                        .handle(|dto| async move { module.database().get_beneficiary(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Path(id): Path<Uuid>,
                 Form(form): Form<BeneficiaryForm>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .try_intake((session, id, form))?
                        .handle(|dto| async move {
                            module.database().update_beneficiary(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, _: AdminSession, Path(id): Path<Uuid>| async move {
                    Controller::new(BeneficiaryTransformer, BeneficiaryPresenter)
                        .intake(DeleteByIdRequest::new(id))
                        .handle(|dto| async move {
                            module.database().delete_beneficiary(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
