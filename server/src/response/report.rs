use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{
    CsvExportDto, InconsistencyDto, ReportDto, SessionContext, StatisticsDto,
};

use crate::controller::Exhaust;
use crate::response::{RentResponse, ReturnResponse};

pub static NO_DATA_TO_EXPORT: &str = "No data to export";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    total_beneficiaries: usize,
    total_equipment: usize,
    active_rents: usize,
    total_returns: usize,
    available_equipment: usize,
    rented_equipment: usize,
}

impl From<StatisticsDto> for StatisticsResponse {
    fn from(value: StatisticsDto) -> Self {
        Self {
            total_beneficiaries: value.total_beneficiaries,
            total_equipment: value.total_equipment,
            active_rents: value.active_rents,
            total_returns: value.total_returns,
            available_equipment: value.available_equipment,
            rented_equipment: value.rented_equipment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    statistics: StatisticsResponse,
    rents: Vec<RentResponse>,
    returns: Vec<ReturnResponse>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    email: String,
    statistics: StatisticsResponse,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InconsistencyResponse {
    RentedWithoutRent { equipment_id: Uuid },
    RentWithoutEquipment { rent_id: Uuid, equipment_id: Uuid },
    RentOnAvailableEquipment { rent_id: Uuid, equipment_id: Uuid },
    MultipleRents { equipment_id: Uuid, rent_ids: Vec<Uuid> },
}

impl From<InconsistencyDto> for InconsistencyResponse {
    fn from(value: InconsistencyDto) -> Self {
        match value {
            InconsistencyDto::RentedWithoutRent { equipment_id } => {
                Self::RentedWithoutRent { equipment_id }
            }
            InconsistencyDto::RentWithoutEquipment {
                rent_id,
                equipment_id,
            } => Self::RentWithoutEquipment {
                rent_id,
                equipment_id,
            },
            InconsistencyDto::RentOnAvailableEquipment {
                rent_id,
                equipment_id,
            } => Self::RentOnAvailableEquipment {
                rent_id,
                equipment_id,
            },
            InconsistencyDto::MultipleRents {
                equipment_id,
                rent_ids,
            } => Self::MultipleRents {
                equipment_id,
                rent_ids,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    notice: &'static str,
}

/// A rendered csv file served as a download.
pub struct CsvResponse(CsvExportDto);

impl IntoResponse for CsvResponse {
    fn into_response(self) -> Response {
        let CsvExportDto { filename, content } = self.0;
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            content,
        )
            .into_response()
    }
}

pub struct ReportPresenter;

impl Exhaust<ReportDto> for ReportPresenter {
    type To = axum::Json<ReportResponse>;
    fn emit(&self, input: ReportDto) -> Self::To {
        axum::Json(ReportResponse {
            statistics: input.statistics.into(),
            rents: input.rents.into_iter().map(RentResponse::from).collect(),
            returns: input.returns.into_iter().map(ReturnResponse::from).collect(),
        })
    }
}

impl Exhaust<(SessionContext, ReportDto)> for ReportPresenter {
    type To = axum::Json<DashboardResponse>;
    fn emit(&self, (session, report): (SessionContext, ReportDto)) -> Self::To {
        axum::Json(DashboardResponse {
            email: session.email,
            statistics: report.statistics.into(),
        })
    }
}

impl Exhaust<Vec<InconsistencyDto>> for ReportPresenter {
    type To = axum::Json<Vec<InconsistencyResponse>>;
    fn emit(&self, input: Vec<InconsistencyDto>) -> Self::To {
        axum::Json(input.into_iter().map(InconsistencyResponse::from).collect())
    }
}

impl Exhaust<Option<CsvExportDto>> for ReportPresenter {
    type To = Response;
    fn emit(&self, input: Option<CsvExportDto>) -> Self::To {
        match input {
            Some(file) => CsvResponse(file).into_response(),
            None => axum::Json(NoticeResponse {
                notice: NO_DATA_TO_EXPORT,
            })
            .into_response(),
        }
    }
}
