use crate::response::ApiResponse;
use crate::routes::blocking;
use axum::Extension;
use common::domain::RelativeDate;
use common::service::{JobOutcome, PriceService};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const STORED: &str = "Json object stored successfully";

/// Refreshes today's and tomorrow's electricity prices.
pub async fn electricity_cronjob_route(
    Extension(service): Extension<Arc<PriceService>>,
) -> ApiResponse {
    let dates = [RelativeDate::Today, RelativeDate::Tomorrow].map(|date| date.to_naive_date());

    match blocking(move || service.run_electricity_job(&dates)).await {
        Ok(JobOutcome::Stored(dates)) => {
            info!(?dates, "Electricity data stored");
            ApiResponse::data(json!({ "result": STORED }))
        }
        Ok(JobOutcome::NoData(_)) => ApiResponse::not_found(),
        Err(response) => response,
    }
}

/// Refreshes the upcoming gas prices. An empty upstream is not an error.
pub async fn gas_cronjob_route(Extension(service): Extension<Arc<PriceService>>) -> ApiResponse {
    let today = RelativeDate::Today.to_naive_date();

    match blocking(move || service.run_gas_job(today)).await {
        Ok(JobOutcome::Stored(_)) => {
            info!(%today, "Gas data stored");
            ApiResponse::data(json!({ "result": STORED }))
        }
        Ok(JobOutcome::NoData(_)) => {
            ApiResponse::data(json!({ "result": "No gas data available" }))
        }
        Err(response) => response,
    }
}
