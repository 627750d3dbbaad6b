use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tokenview_query::{PageParams, Paginated};
use tokenview_types::ValidationError;
use url::form_urlencoded;

use crate::dto::{BalanceDto, HolderDto, TokenDetailsDto, TokenDto};
use crate::error::{self, ServerResult};
use crate::state::AppState;

/// Query parameters shared by the list endpoints. `ticker` may repeat.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub tickers: Vec<String>,
    pub page: PageParams,
}

impl ListQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let mut tickers = Vec::new();
        let mut limit = None;
        let mut offset = None;
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "ticker" => tickers.push(value.into_owned()),
                "limit" => limit = Some(value.into_owned()),
                "offset" => offset = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(Self {
            tickers,
            page: PageParams::parse(limit.as_deref(), offset.as_deref())?,
        })
    }
}

pub async fn list_tokens(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ServerResult<Json<Paginated<TokenDto>>> {
    let query = ListQuery::parse(query.as_deref())?;
    let page = state.queries.tokens(&query.tickers, query.page).await?;
    Ok(Json(page.map(TokenDto::from)))
}

pub async fn token_details(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ServerResult<Json<TokenDetailsDto>> {
    let details = state.queries.token_details(&ticker).await?;
    Ok(Json(details.into()))
}

pub async fn token_holders(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    RawQuery(query): RawQuery,
) -> ServerResult<Json<Paginated<HolderDto>>> {
    let query = ListQuery::parse(query.as_deref())?;
    let page = state.queries.holders(&ticker, query.page).await?;
    Ok(Json(page.map(HolderDto::from)))
}

pub async fn address_balances(
    State(state): State<AppState>,
    Path(address): Path<String>,
    RawQuery(query): RawQuery,
) -> ServerResult<Json<Paginated<BalanceDto>>> {
    let query = ListQuery::parse(query.as_deref())?;
    let page = state
        .queries
        .balances(&address, &query.tickers, query.page)
        .await?;
    Ok(Json(page.map(BalanceDto::from)))
}

/// Liveness plus the current event position.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.queries.event_position().await {
        Ok(position) => Json(json!({
            "status": "ok",
            "event_position": position.seq(),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not read event position");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
                .into_response()
        }
    }
}

pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "tokenview",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> Response {
    error::not_found()
}
