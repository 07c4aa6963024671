use axum::extract::State;
use axum::routing::get;
use axum::{Form, Router};

use application::service::{GetRentService, RentEquipmentService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{RentForm, RentTransformer};
use crate::response::RentPresenter;
use crate::session::AdminSession;

pub trait RentRouter {
    fn route_rent(self) -> Self;
}

impl<D: Backend> RentRouter for Router<AppModule<D>> {
    fn route_rent(self) -> Self {
        self.route(
            "/rents",
            get(|State(module): State<AppModule<D>>, _: AdminSession| async move {
                Controller::new((), RentPresenter)
                    .bypass(|| async move { module.database().get_rents().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Form(form): Form<RentForm>| async move {
                    Controller::new(RentTransformer, RentPresenter)
                        .try_intake((session, form))?
                        .handle(|dto| async move { module.database().rent_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
