// crates/geography-server/src/rest.rs

//! REST handlers. Query strings deserialize straight into the core filter
//! types, so `from-iata`, `from-heading` and friends keep their kebab-case
//! names on the wire.

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use geography_core::api::{AirportView, CountryView, FrequencyView, RegionView, RunwayView};
use geography_core::{AirportFilter, FrequencyFilter, RunwayFilter};
use serde::Deserialize;

/// `?from=&until=` bounds of a code range.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RangeParams {
    pub from: String,
    pub until: String,
}

pub async fn countries(
    State(state): State<AppState>,
    Query(range): Query<RangeParams>,
) -> ApiResult<Json<Vec<CountryView>>> {
    let countries = state.catalog.countries(&range.from, &range.until)?;
    Ok(Json(countries.into_iter().map(CountryView::from).collect()))
}

pub async fn country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> ApiResult<Json<CountryView>> {
    Ok(Json(state.catalog.country(&country_code)?.into()))
}

pub async fn regions(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
    Query(range): Query<RangeParams>,
) -> ApiResult<Json<Vec<RegionView>>> {
    let regions = state
        .catalog
        .regions(&country_code, &range.from, &range.until)?;
    Ok(Json(regions.into_iter().map(RegionView::from).collect()))
}

pub async fn airports(
    State(state): State<AppState>,
    Query(filter): Query<AirportFilter>,
) -> ApiResult<Json<Vec<AirportView>>> {
    let airports = state.catalog.airports(&filter)?;
    Ok(Json(airports.into_iter().map(AirportView::from).collect()))
}

/// ICAO code, or IATA code for three-letter input.
pub async fn airport(
    State(state): State<AppState>,
    Path(airport_code): Path<String>,
) -> ApiResult<Json<AirportView>> {
    Ok(Json(state.catalog.airport_by_code(&airport_code)?.into()))
}

pub async fn runways(
    State(state): State<AppState>,
    Path(airport_code): Path<String>,
    Query(filter): Query<RunwayFilter>,
) -> ApiResult<Json<Vec<RunwayView>>> {
    let runways = state.catalog.runways(&airport_code, &filter)?;
    Ok(Json(runways.into_iter().map(RunwayView::from).collect()))
}

pub async fn frequencies(
    State(state): State<AppState>,
    Path(airport_code): Path<String>,
    Query(filter): Query<FrequencyFilter>,
) -> ApiResult<Json<Vec<FrequencyView>>> {
    let frequencies = state.catalog.frequencies(&airport_code, &filter)?;
    Ok(Json(frequencies.into_iter().map(FrequencyView::from).collect()))
}
