use crate::error::{AppError, Result};
use crate::model::{validate_url, ResolveResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::connect_info::ConnectInfo;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, Extensions, HeaderMap, StatusCode};
use axum::Json;
use snip_core::{ClickEvent, ShortCode};
use snip_shortener::{ClientInfo, FORWARDED_FOR_HEADER};
use std::net::SocketAddr;
use tracing::debug;

pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    validate_url(&request.original_url).map_err(AppError::BadRequest)?;

    let code = state.shortener.shorten(&request.original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: code.into(),
        }),
    ))
}

pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<ResolveResponse>> {
    let code = ShortCode::new(short_code)?;
    let original_url = state.shortener.resolve(&code).await?;

    Ok(Json(ResolveResponse { original_url }))
}

pub async fn click_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    headers: HeaderMap,
    extensions: Extensions,
) -> Result<StatusCode> {
    let code = ShortCode::new(short_code)?;

    // absent when the router is driven without a socket, e.g. in tests
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = ClientInfo::from_parts(
        headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok()),
        peer,
        headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()),
    );
    debug!(code = %code, ip = %client.ip, user_agent = %client.user_agent, "click");

    state
        .analytics
        .record_click(&code, &client.ip, &client.user_agent)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<Vec<ClickEvent>>> {
    let code = ShortCode::new(short_code)?;
    let events = state.analytics.analytics(&code).await?;

    Ok(Json(events))
}
