// src/handlers/projects.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        response::{Envelope, ListEnvelope},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageProjects, RequireCapability},
    },
    models::project::{AssignUserPayload, CreateProjectPayload},
};

// GET /api/projects/my-projects
#[utoipa::path(
    get,
    path = "/api/projects/my-projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Obras acessíveis ao usuário", body = Vec<crate::models::project::Project>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_projects(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list_for(&user.0).await?;
    Ok(Json(ListEnvelope::new(projects)))
}

// GET /api/projects (somente gerente)
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Todas as obras", body = Vec<crate::models::project::Project>),
        (status = 403, description = "Papel sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_projects(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageProjects>,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list_all().await?;
    Ok(Json(ListEnvelope::new(projects)))
}

// POST /api/projects (somente gerente)
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = CreateProjectPayload,
    responses(
        (status = 201, description = "Obra criada", body = crate::models::project::Project),
        (status = 409, description = "Código de obra já usado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanManageProjects>,
    Json(payload): Json<CreateProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let project = app_state
        .project_service
        .create(&payload, user.0.id)
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "projects",
            Some(project.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(Envelope::new(project))))
}

// POST /api/projects/assign (somente gerente)
#[utoipa::path(
    post,
    path = "/api/projects/assign",
    tag = "Projects",
    request_body = AssignUserPayload,
    responses(
        (status = 201, description = "Usuário vinculado à obra", body = crate::models::project::ProjectAssignment),
        (status = 404, description = "Usuário ou obra inexistente"),
        (status = 409, description = "Vínculo já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_user_to_project(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanManageProjects>,
    Json(payload): Json<AssignUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = app_state
        .project_service
        .assign_user(payload.user_id, payload.project_id, user.0.id)
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "project_assignments",
            Some(assignment.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(Envelope::new(assignment))))
}

// GET /api/projects/{project_id}/stats
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/stats",
    tag = "Projects",
    params(("project_id" = Uuid, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Indicadores da obra", body = crate::models::project::ProjectStats),
        (status = 403, description = "Sem acesso à obra"),
        (status = 404, description = "Obra inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project_stats(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // Predicado de acesso antes de qualquer leitura: 403 sem vazar nada.
    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let stats = app_state.project_service.stats(project_id).await?;
    Ok(Json(Envelope::new(stats)))
}
