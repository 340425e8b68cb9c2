use crate::districts::District;
use crate::errors::AppError;
use crate::models::{DistrictInfo, SeriesQuery, SeriesResponse};
use crate::series::derive_for;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::error;

pub const DEFAULT_DISTRICT: District = District::Lichtenberg;
pub const DEFAULT_DAYS: usize = 14;
pub const MAX_DAYS: usize = 40;

pub async fn index() -> Html<String> {
    Html(render_index(DEFAULT_DISTRICT, DEFAULT_DAYS, MAX_DAYS))
}

pub async fn get_districts(
    State(state): State<AppState>,
) -> Result<Json<Vec<DistrictInfo>>, AppError> {
    let districts = District::ALL
        .into_iter()
        .map(|district| -> Result<DistrictInfo, AppError> {
            Ok(DistrictInfo {
                name: district,
                population: state.populations.get(district)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(districts))
}

pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SeriesResponse>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_DAYS);
    if days > MAX_DAYS {
        return Err(AppError::bad_request(format!("days must be between 0 and {MAX_DAYS}")));
    }

    let district = match query.district.as_deref() {
        Some(name) => name.parse::<District>()?,
        None => DEFAULT_DISTRICT,
    };

    let table = state
        .loader
        .load()
        .await
        .inspect_err(|err| error!("failed to load case table from {}: {err}", state.loader.url()))?;
    let series = derive_for(&table, district, &state.populations)?;

    Ok(Json(SeriesResponse::new(&series, days)))
}
