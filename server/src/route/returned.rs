use axum::extract::State;
use axum::routing::get;
use axum::{Form, Router};

use application::service::{GetReturnService, ReturnEquipmentService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::request::{ReturnForm, ReturnTransformer};
use crate::response::ReturnPresenter;
use crate::session::AdminSession;

pub trait ReturnRouter {
    fn route_return(self) -> Self;
}

impl<D: Backend> ReturnRouter for Router<AppModule<D>> {
    fn route_return(self) -> Self {
        self.route(
            "/returns",
            get(|State(module): State<AppModule<D>>, _: AdminSession| async move {
                Controller::new((), ReturnPresenter)
                    .bypass(|| async move { module.database().get_returns().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 AdminSession(session): AdminSession,
                 Form(form): Form<ReturnForm>| async move {
                    Controller::new(ReturnTransformer, ReturnPresenter)
                        .try_intake((session, form))?
                        .handle(|dto| async move { module.database().return_equipment(&dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
