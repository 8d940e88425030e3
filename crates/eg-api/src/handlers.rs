//! # eg-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use eg_core::dates::{parse_moment, DayPart};
use eg_core::error::AppError;
use eg_core::filter::EventFilter;
use eg_core::models::{AttendanceStatus, CurrentUser, EventPatch, NewEvent};
use eg_core::traits::{AuthProvider, EventRepo};
use serde::Deserialize;

use crate::error::ApiError;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn EventRepo>,
    pub auth: Box<dyn AuthProvider>,
}

type ApiResult = Result<HttpResponse, ApiError>;

/// Listing criteria as they arrive in the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub city: Option<String>,
    pub category: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub search_query: Option<String>,
}

impl EventQuery {
    pub fn into_filter(self) -> Result<EventFilter, AppError> {
        Ok(EventFilter {
            from_date: parse_bound(self.from_date.as_deref(), DayPart::Start)?,
            to_date: parse_bound(self.to_date.as_deref(), DayPart::End)?,
            city: self.city,
            category: self.category,
            search_query: self.search_query,
        })
    }
}

/// A plain date in a listing bound covers the whole day: 00:00 for a lower
/// bound, the last millisecond for an upper one.
fn parse_bound(raw: Option<&str>, part: DayPart) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_moment(raw, part)
            .map(Some)
            .ok_or_else(|| AppError::ValidationError(format!("invalid date '{}'", raw))),
    }
}

#[derive(Debug, Deserialize)]
pub struct AttendanceBody {
    /// `null` or missing clears the stated preference
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller. A missing or stale token means an anonymous caller.
async fn current_user(data: &AppState, req: &HttpRequest) -> Option<CurrentUser> {
    match bearer_token(req) {
        Some(token) => data.auth.resolve(token).await,
        None => None,
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_events(
    data: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<EventQuery>,
) -> ApiResult {
    let filter = query.into_inner().into_filter()?;
    let user = current_user(&data, &req).await;
    let events = data.repo.list_events(&filter, user.as_ref()).await?;
    Ok(HttpResponse::Ok().json(events))
}

pub async fn get_event(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    let event = data.repo.get_event(&path.into_inner(), user.as_ref()).await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn create_event(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NewEvent>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    let event = data.repo.create_event(body.into_inner(), user.as_ref()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/events/{}", event.id)))
        .json(event))
}

pub async fn update_event(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<EventPatch>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    let event = data
        .repo
        .update_event(&path.into_inner(), body.into_inner(), user.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn delete_event(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    data.repo.delete_event(&path.into_inner(), user.as_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub async fn toggle_like(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    let event = data.repo.toggle_like(&path.into_inner(), user.as_ref()).await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn set_attendance(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<AttendanceBody>,
) -> ApiResult {
    let user = current_user(&data, &req).await;
    let event = data
        .repo
        .set_attendance(&path.into_inner(), body.status, user.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn list_categories(data: web::Data<AppState>) -> ApiResult {
    let categories = data.repo.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

pub async fn my_interactions(data: web::Data<AppState>, req: HttpRequest) -> ApiResult {
    let user = current_user(&data, &req).await.ok_or(AppError::Unauthenticated)?;
    let records = data.repo.list_interactions(&user).await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn login(data: web::Data<AppState>, body: web::Json<LoginBody>) -> ApiResult {
    let session = data.auth.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(session))
}

pub async fn register(data: web::Data<AppState>, body: web::Json<RegisterBody>) -> ApiResult {
    let session = data.auth.register(&body.name, &body.email, &body.password).await?;
    Ok(HttpResponse::Created().json(session))
}

pub async fn logout(data: web::Data<AppState>, req: HttpRequest) -> ApiResult {
    let token = bearer_token(&req).ok_or(AppError::Unauthenticated)?;
    data.auth.logout(token).await;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn me(data: web::Data<AppState>, req: HttpRequest) -> ApiResult {
    let user = current_user(&data, &req).await.ok_or(AppError::Unauthenticated)?;
    Ok(HttpResponse::Ok().json(user))
}
