use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::calendar::{DayCell, first_of_month, month_grid};
use crate::planner::{self, PlannerError, find_post};
use crate::post::{ContentPost, PostDraft, PostPatch, TypeFilter};

#[derive(Clone)]
pub struct AppState {
    posts: Arc<RwLock<Vec<ContentPost>>>,
}

impl AppState {
    pub fn new(posts: Vec<ContentPost>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    pub fn with_shared(posts: Arc<RwLock<Vec<ContentPost>>>) -> Self {
        Self { posts }
    }

    fn posts(&self) -> Arc<RwLock<Vec<ContentPost>>> {
        self.posts.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PlannerError> for ApiError {
    fn from(value: PlannerError) -> Self {
        match value {
            PlannerError::NotFound(_) => ApiError::NotFound(value.to_string()),
            PlannerError::Validation(_) => ApiError::Invalid(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FilterParams {
    #[serde(rename = "type")]
    type_filter: Option<String>,
    search: Option<String>,
}

impl FilterParams {
    fn type_filter(&self) -> Result<TypeFilter, ApiError> {
        match self.type_filter.as_deref() {
            None => Ok(TypeFilter::All),
            Some(raw) => TypeFilter::from_str(raw)
                .ok_or_else(|| ApiError::invalid(format!("unknown type filter '{raw}'"))),
        }
    }

    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthView {
    pub month: NaiveDate,
    pub cells: Vec<DayCell>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/calendar/:year/:month", get(get_month))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, posts: Vec<ContentPost>) -> std::io::Result<()> {
    let state = AppState::new(posts);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<ContentPost>>, ApiError> {
    let filter = params.type_filter()?;
    let posts = state.posts();
    let listed = {
        let guard = posts.read();
        planner::filter_posts(&guard, filter, params.search())
    };
    Ok(Json(listed))
}

async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<ContentPost>, ApiError> {
    let posts = state.posts();
    let result = {
        let guard = posts.read();
        find_post(&guard, &post_id).cloned()
    };
    match result {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::from(PlannerError::NotFound(post_id))),
    }
}

async fn create_post(
    State(state): State<AppState>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<ContentPost>), ApiError> {
    let posts = state.posts();
    let created = {
        let mut guard = posts.write();
        let (updated, created) = planner::create_post(&guard, &draft)?;
        *guard = updated;
        created
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<ContentPost>, ApiError> {
    let posts = state.posts();
    let updated = {
        let mut guard = posts.write();
        let new_posts = planner::update_post(&guard, &post_id, &patch)?;
        *guard = new_posts;
        find_post(&guard, &post_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("post {post_id} not found after update")))?
    };
    Ok(Json(updated))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let posts = state.posts();
    {
        let mut guard = posts.write();
        let new_posts = planner::delete_post(&guard, &post_id)?;
        *guard = new_posts;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(params): Query<FilterParams>,
) -> Result<Json<MonthView>, ApiError> {
    let reference = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::invalid(format!("invalid month {year}-{month:02}")))?;
    let filter = params.type_filter()?;
    let today = Local::now().date_naive();

    let posts = state.posts();
    let cells = {
        let guard = posts.read();
        month_grid(reference, today, &guard, filter, params.search())
    };
    Ok(Json(MonthView {
        month: first_of_month(reference),
        cells,
    }))
}
