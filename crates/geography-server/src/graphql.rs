// crates/geography-server/src/graphql.rs

//! GraphQL schema over the shared catalog.
//!
//! Nodes own a copy of the record they describe and resolve their joins
//! (`Airport.country`, `Region.airports`, ...) against the catalog stored in
//! the schema data, so nothing here holds a borrow across requests.

use crate::AppState;
use async_graphql::http::GraphiQLSource;
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema,
};
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use geography_core::model::{self, Airport, Country, Frequency, Region, Runway, RunwaySide};
use geography_core::{AirportFilter, Catalog, FrequencyFilter, GeoError, RunwayFilter};
use std::sync::Arc;

pub type GeographySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn schema(catalog: Arc<Catalog>) -> GeographySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(catalog)
        .finish()
}

pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/geography/graphql").finish())
}

type GqlResult<T> = async_graphql::Result<T>;

fn catalog<'a>(ctx: &Context<'a>) -> GqlResult<&'a Catalog> {
    Ok(ctx.data::<Arc<Catalog>>()?.as_ref())
}

/// Carries the error class in `extensions.code`.
fn gql_error(err: GeoError) -> async_graphql::Error {
    let code = match &err {
        GeoError::Validation(_) => "BAD_INPUT",
        GeoError::NotFound(_) => "NOT_FOUND",
        GeoError::TooManyResults { .. } => "TOO_MANY_RESULTS",
        _ => "INTERNAL",
    };
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

/// Joins treat "nothing matched" as an empty list.
fn or_empty<T>(result: geography_core::Result<Vec<T>>) -> GqlResult<Vec<T>> {
    match result {
        Err(GeoError::NotFound(_)) => Ok(Vec::new()),
        other => other.map_err(gql_error),
    }
}

fn airport_nodes(catalog: &Catalog, filter: &AirportFilter) -> GqlResult<Vec<AirportNode>> {
    let airports = or_empty(catalog.airports(filter))?;
    Ok(airports.into_iter().cloned().map(AirportNode).collect())
}

// -----------------------------------------------------------------------------
// NODES
// -----------------------------------------------------------------------------

pub struct CountryNode(Country);

#[Object(name = "Country")]
impl CountryNode {
    async fn code(&self) -> &str {
        &self.0.code
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn continent(&self) -> &str {
        &self.0.continent
    }

    async fn wikipedia(&self) -> Option<&str> {
        self.0.wikipedia.as_deref()
    }

    async fn regions(&self) -> Vec<RegionNode> {
        self.0
            .regions
            .iter()
            .map(|r| RegionNode::new(&self.0.code, r))
            .collect()
    }

    async fn airports(&self, ctx: &Context<'_>) -> GqlResult<Vec<AirportNode>> {
        let filter = AirportFilter {
            country: self.0.code.clone(),
            ..Default::default()
        };
        airport_nodes(catalog(ctx)?, &filter)
    }
}

pub struct RegionNode {
    country_code: String,
    region: Region,
}

impl RegionNode {
    fn new(country_code: &str, region: &Region) -> Self {
        RegionNode {
            country_code: country_code.to_owned(),
            region: region.clone(),
        }
    }
}

impl From<model::RegionView<'_>> for RegionNode {
    fn from(view: model::RegionView<'_>) -> Self {
        RegionNode::new(&view.country.code, view.region)
    }
}

#[Object(name = "Region")]
impl RegionNode {
    async fn code(&self) -> &str {
        &self.region.code
    }

    async fn name(&self) -> &str {
        &self.region.name
    }

    async fn wikipedia(&self) -> Option<&str> {
        self.region.wikipedia.as_deref()
    }

    async fn country_code(&self) -> &str {
        &self.country_code
    }

    async fn country(&self, ctx: &Context<'_>) -> GqlResult<CountryNode> {
        let country = catalog(ctx)?.country(&self.country_code).map_err(gql_error)?;
        Ok(CountryNode(country.clone()))
    }

    async fn airports(&self, ctx: &Context<'_>) -> GqlResult<Vec<AirportNode>> {
        let filter = AirportFilter {
            region: self.region.code.clone(),
            ..Default::default()
        };
        airport_nodes(catalog(ctx)?, &filter)
    }
}

pub struct AirportNode(Airport);

#[Object(name = "Airport")]
impl AirportNode {
    async fn icao_code(&self) -> &str {
        &self.0.code
    }

    async fn iata_code(&self) -> Option<&str> {
        self.0.iata.as_deref()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    #[graphql(name = "type")]
    async fn kind(&self) -> &str {
        &self.0.kind
    }

    async fn latitude(&self) -> f64 {
        self.0.latitude
    }

    async fn longitude(&self) -> f64 {
        self.0.longitude
    }

    async fn elevation(&self) -> Option<i32> {
        self.0.elevation
    }

    async fn municipality(&self) -> Option<&str> {
        self.0.municipality.as_deref()
    }

    async fn website(&self) -> Option<&str> {
        self.0.website.as_deref()
    }

    async fn wikipedia(&self) -> Option<&str> {
        self.0.wikipedia.as_deref()
    }

    async fn country_code(&self) -> &str {
        &self.0.country_code
    }

    async fn region_code(&self) -> &str {
        &self.0.region_code
    }

    async fn country(&self, ctx: &Context<'_>) -> GqlResult<CountryNode> {
        let country = catalog(ctx)?
            .country(&self.0.country_code)
            .map_err(gql_error)?;
        Ok(CountryNode(country.clone()))
    }

    async fn region(&self, ctx: &Context<'_>) -> GqlResult<RegionNode> {
        let view = catalog(ctx)?
            .region(&self.0.region_code)
            .map_err(gql_error)?;
        Ok(view.into())
    }

    #[allow(clippy::too_many_arguments)]
    async fn runways(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
        #[graphql(default)] from_heading: String,
        #[graphql(default)] until_heading: String,
        #[graphql(default)] from_length: String,
        #[graphql(default)] until_length: String,
        #[graphql(default)] closed: String,
    ) -> GqlResult<Vec<RunwayNode>> {
        let filter = RunwayFilter {
            from,
            until,
            from_heading,
            until_heading,
            from_length,
            until_length,
            closed,
        };
        let views = catalog(ctx)?
            .runways(&self.0.code, &filter)
            .map_err(gql_error)?;
        Ok(views.into_iter().map(RunwayNode::from).collect())
    }

    async fn frequencies(&self) -> Vec<FrequencyNode> {
        self.0
            .frequencies
            .iter()
            .map(|f| FrequencyNode::new(&self.0.code, f))
            .collect()
    }
}

/// One runway end.
pub struct RunwayNode {
    airport_code: String,
    alternate_code: Option<String>,
    runway: Runway,
    side: RunwaySide,
}

impl From<model::RunwayView<'_>> for RunwayNode {
    fn from(view: model::RunwayView<'_>) -> Self {
        RunwayNode {
            airport_code: view.airport.code.clone(),
            alternate_code: view.alternate_code().map(str::to_owned),
            runway: view.runway.clone(),
            side: view.side.clone(),
        }
    }
}

#[Object(name = "Runway")]
impl RunwayNode {
    async fn code(&self) -> &str {
        &self.side.code
    }

    async fn alternate_code(&self) -> Option<&str> {
        self.alternate_code.as_deref()
    }

    async fn length(&self) -> i32 {
        self.runway.length
    }

    async fn width(&self) -> i32 {
        self.runway.width
    }

    async fn surface(&self) -> &str {
        &self.runway.surface
    }

    async fn lighted(&self) -> bool {
        self.runway.lighted
    }

    async fn closed(&self) -> bool {
        self.runway.closed
    }

    async fn latitude(&self) -> Option<f64> {
        self.side.latitude
    }

    async fn longitude(&self) -> Option<f64> {
        self.side.longitude
    }

    async fn elevation(&self) -> Option<i32> {
        self.side.elevation
    }

    async fn heading(&self) -> Option<i32> {
        self.side.heading
    }

    async fn threshold(&self) -> Option<i32> {
        self.side.threshold
    }

    async fn airport(&self, ctx: &Context<'_>) -> GqlResult<AirportNode> {
        let airport = catalog(ctx)?.airport(&self.airport_code).map_err(gql_error)?;
        Ok(AirportNode(airport.clone()))
    }
}

pub struct FrequencyNode {
    airport_code: String,
    frequency: Frequency,
}

impl FrequencyNode {
    fn new(airport_code: &str, frequency: &Frequency) -> Self {
        FrequencyNode {
            airport_code: airport_code.to_owned(),
            frequency: frequency.clone(),
        }
    }
}

impl From<model::FrequencyView<'_>> for FrequencyNode {
    fn from(view: model::FrequencyView<'_>) -> Self {
        FrequencyNode::new(&view.airport.code, view.frequency)
    }
}

#[Object(name = "Frequency")]
impl FrequencyNode {
    #[graphql(name = "type")]
    async fn kind(&self) -> &str {
        &self.frequency.kind
    }

    async fn description(&self) -> Option<&str> {
        self.frequency.description.as_deref()
    }

    async fn mhz(&self) -> f64 {
        self.frequency.mhz
    }

    async fn airport(&self, ctx: &Context<'_>) -> GqlResult<AirportNode> {
        let airport = catalog(ctx)?.airport(&self.airport_code).map_err(gql_error)?;
        Ok(AirportNode(airport.clone()))
    }
}

// -----------------------------------------------------------------------------
// QUERY ROOT
// -----------------------------------------------------------------------------

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn country(&self, ctx: &Context<'_>, code: String) -> GqlResult<CountryNode> {
        let country = catalog(ctx)?.country(&code).map_err(gql_error)?;
        Ok(CountryNode(country.clone()))
    }

    async fn countries(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
    ) -> GqlResult<Vec<CountryNode>> {
        let countries = catalog(ctx)?.countries(&from, &until).map_err(gql_error)?;
        Ok(countries.into_iter().cloned().map(CountryNode).collect())
    }

    async fn region(&self, ctx: &Context<'_>, code: String) -> GqlResult<RegionNode> {
        let view = catalog(ctx)?.region(&code).map_err(gql_error)?;
        Ok(view.into())
    }

    async fn regions(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] country: String,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
    ) -> GqlResult<Vec<RegionNode>> {
        let views = catalog(ctx)?
            .regions(&country, &from, &until)
            .map_err(gql_error)?;
        Ok(views.into_iter().map(RegionNode::from).collect())
    }

    /// ICAO code, or IATA code for three-letter input.
    async fn airport(&self, ctx: &Context<'_>, code: String) -> GqlResult<AirportNode> {
        let airport = catalog(ctx)?.airport_by_code(&code).map_err(gql_error)?;
        Ok(AirportNode(airport.clone()))
    }

    async fn airports(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] country: String,
        #[graphql(default)] region: String,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
        #[graphql(default)] from_iata: String,
        #[graphql(default)] until_iata: String,
    ) -> GqlResult<Vec<AirportNode>> {
        let filter = AirportFilter {
            country,
            region,
            from,
            until,
            from_iata,
            until_iata,
        };
        let airports = catalog(ctx)?.airports(&filter).map_err(gql_error)?;
        Ok(airports.into_iter().cloned().map(AirportNode).collect())
    }

    async fn runway(
        &self,
        ctx: &Context<'_>,
        airport: String,
        code: String,
    ) -> GqlResult<RunwayNode> {
        let view = catalog(ctx)?.runway(&airport, &code).map_err(gql_error)?;
        Ok(view.into())
    }

    #[allow(clippy::too_many_arguments)]
    async fn runways(
        &self,
        ctx: &Context<'_>,
        airport: String,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
        #[graphql(default)] from_heading: String,
        #[graphql(default)] until_heading: String,
        #[graphql(default)] from_length: String,
        #[graphql(default)] until_length: String,
        #[graphql(default)] closed: String,
    ) -> GqlResult<Vec<RunwayNode>> {
        let filter = RunwayFilter {
            from,
            until,
            from_heading,
            until_heading,
            from_length,
            until_length,
            closed,
        };
        let views = catalog(ctx)?.runways(&airport, &filter).map_err(gql_error)?;
        Ok(views.into_iter().map(RunwayNode::from).collect())
    }

    async fn frequency(
        &self,
        ctx: &Context<'_>,
        airport: String,
        #[graphql(name = "type")] kind: String,
    ) -> GqlResult<FrequencyNode> {
        let view = catalog(ctx)?.frequency(&airport, &kind).map_err(gql_error)?;
        Ok(view.into())
    }

    async fn frequencies(
        &self,
        ctx: &Context<'_>,
        airport: String,
        #[graphql(default)] from: String,
        #[graphql(default)] until: String,
    ) -> GqlResult<Vec<FrequencyNode>> {
        let filter = FrequencyFilter { from, until };
        let views = catalog(ctx)?
            .frequencies(&airport, &filter)
            .map_err(gql_error)?;
        Ok(views.into_iter().map(FrequencyNode::from).collect())
    }
}
