use axum::extract::State;
use axum::Json;

use super::auth::AuthenticatedUser;
use super::error::ApiError;
use super::types::{
    HistoryResponse, LoginRequest, LoginResponse, PromptRequest, PromptResponse, StatusResponse,
};
use super::AppState;

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "promptgate",
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state
        .container
        .login_use_case()
        .execute(&req.username, &req.password)?;
    Ok(Json(LoginResponse { token }))
}

pub async fn prompt(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, ApiError> {
    let response = state
        .container
        .submit_prompt_use_case()
        .execute(&username, &req.prompt)
        .await?;
    Ok(Json(PromptResponse { response }))
}

pub async fn history(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.container.history_use_case().execute(&username).await?;
    Ok(Json(HistoryResponse { history }))
}
