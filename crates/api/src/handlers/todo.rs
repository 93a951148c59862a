//! Handlers for the `/todos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use catalog_core::catalog::ENTITY_TODO;
use catalog_core::credentials::require_text;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::todo::{CreateTodo, Todo, UpdateTodo};
use catalog_db::repositories::TodoRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub task: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_TODO,
        id,
    })
}

/// GET /api/todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<TodoListResponse>> {
    let todos = TodoRepo::list(&state.pool).await?;
    Ok(Json(TodoListResponse { todos }))
}

/// POST /api/todos
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<TodoResponse>)> {
    let task = require_text("Task", input.task.as_deref())?;
    let todo = TodoRepo::create(
        &state.pool,
        &CreateTodo {
            task,
            completed: input.completed,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

/// PUT /api/todos/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<Json<TodoResponse>> {
    if input.task.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::required("Task")));
    }
    let todo = TodoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(TodoResponse { todo }))
}

/// DELETE /api/todos/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if TodoRepo::delete(&state.pool, id).await? {
        Ok(Json(MessageResponse::new("Todo deleted successfully")))
    } else {
        Err(not_found(id))
    }
}
