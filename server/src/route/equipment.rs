use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Form, Router};
use uuid::Uuid;

use application::service::{
    CreateEquipmentService, DeleteEquipmentService, GetEquipmentService, GetReturnService,
    UpdateEquipmentService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{
    DeleteByIdRequest, EquipmentForm, EquipmentHistoryRequest, EquipmentTransformer,
    GetByIdRequest, SearchRequest,
};
use crate::response::EquipmentPresenter;
use crate::session::AdminSession;

pub trait EquipmentRouter {
    fn route_equipment(self) -> Self;
}

impl<D: Backend> EquipmentRouter for Router<AppModule<D>> {
    fn route_equipment(self) -> Self {
        self.route(
            "/equipment",
            get(
                |State(module): State<AppModule<D>>,
                 _: AdminSession,
                 Query(req): Query<SearchRequest>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().get_all_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Form(form): Form<EquipmentForm>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .try_intake((session, form))?
                        .handle(|dto| async move { module.database().create_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/equipment/available",
            get(|State(module): State<AppModule<D>>, _: AdminSession| async move {
                Controller::new((), EquipmentPresenter)
                    .bypass(|| async move { module.database().get_available_equipment().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/equipment/:id",
            get(
                |State(module): State<AppModule<D>>, _: AdminSession, Path(id): Path<Uuid>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .intake(GetByIdRequest::new(id))
                        .handle(|dto| async move { module.database().get_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Path(id): Path<Uuid>,
                 Form(form): Form<EquipmentForm>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .try_intake((session, id, form))?
                        .handle(|dto| async move { module.database().update_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, _: AdminSession, Path(id): Path<Uuid>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .intake(DeleteByIdRequest::new(id))
                        .handle(|dto| async move { module.database().delete_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/equipment/:id/returns",
            get(
                |State(module): State<AppModule<D>>, _: AdminSession, Path(id): Path<Uuid>| async move {
                    Controller::new(EquipmentTransformer, EquipmentPresenter)
                        .intake(EquipmentHistoryRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_equipment_history(&dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
