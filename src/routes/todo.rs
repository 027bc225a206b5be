use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::{db::entities::todo, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AddTodoRequest {
    pub item: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    todos: Vec<todo::Model>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show))
        .route("/add", post(add))
        .route("/complete/{id}", get(complete))
        .route("/delete/{id}", get(delete))
        .with_state(state)
}

async fn show(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let todos = state.store.list().await?;
    let rendered = IndexTemplate { todos }.render().map_err(|_| {
        AppError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to render todo list",
        )
    })?;
    Ok(Html(rendered))
}

async fn add(
    State(state): State<Arc<AppState>>,
    Form(body): Form<AddTodoRequest>,
) -> Result<Response, AppError> {
    state.store.insert(body.item.trim()).await?;
    Ok(redirect_home())
}

async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    state.store.complete(id).await?;
    Ok(redirect_home())
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    state.store.delete(id).await?;
    Ok(redirect_home())
}

// Mutations answer with 301 back to the list page.
fn redirect_home() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/")]).into_response()
}
