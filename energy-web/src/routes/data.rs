use crate::response::ApiResponse;
use crate::routes::blocking;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::{Query, QueryRejection};
use common::domain::{parse_date, EnergyType, RelativeDate};
use common::service::PriceService;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DataQuery {
    date: Option<String>,
}

pub async fn electricity_data_route(
    Extension(service): Extension<Arc<PriceService>>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> ApiResponse {
    match query {
        Ok(Query(query)) => data_route(service, EnergyType::Electricity, query.date).await,
        Err(rejection) => ApiResponse::error(StatusCode::BAD_REQUEST, rejection),
    }
}

pub async fn gas_data_route(
    Extension(service): Extension<Arc<PriceService>>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> ApiResponse {
    match query {
        Ok(Query(query)) => data_route(service, EnergyType::Gas, query.date).await,
        Err(rejection) => ApiResponse::error(StatusCode::BAD_REQUEST, rejection),
    }
}

async fn data_route(
    service: Arc<PriceService>,
    energy_type: EnergyType,
    date: Option<String>,
) -> ApiResponse {
    let date = match date.as_deref().map(parse_date) {
        Some(Ok(date)) => date,
        Some(Err(err)) => return err.into(),
        None => RelativeDate::Today.to_naive_date(),
    };

    match blocking(move || service.get_or_fetch(energy_type, date)).await {
        Ok(lookup) => match lookup.into_entry() {
            Some(entry) => ApiResponse::data(entry),
            None => ApiResponse::not_found(),
        },
        Err(response) => response,
    }
}
