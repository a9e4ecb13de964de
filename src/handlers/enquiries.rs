// src/handlers/enquiries.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
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
        rbac::{CanRespondEnquiries, RequireCapability},
    },
    models::enquiry::EnquiryStatus,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEnquiryPayload {
    // Sem destinatário explícito, a consulta vai para um gerente.
    pub to_user: Option<Uuid>,

    #[validate(length(min = 1, message = "Subject is required."))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required."))]
    pub message: String,

    // URL produzida por um serviço de upload externo.
    pub attachment_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RespondEnquiryPayload {
    #[validate(length(min = 1, message = "Response is required."))]
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateEnquiryStatusPayload {
    pub status: EnquiryStatus,
}

// POST /api/enquiries — qualquer papel autenticado
#[utoipa::path(
    post,
    path = "/api/enquiries",
    tag = "Enquiries",
    request_body = CreateEnquiryPayload,
    responses(
        (status = 201, description = "Consulta enviada", body = crate::models::enquiry::Enquiry),
        (status = 404, description = "Nenhum gerente para receber a consulta")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_enquiry(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateEnquiryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let enquiry = app_state
        .enquiry_service
        .create(
            &user.0,
            payload.to_user,
            &payload.subject,
            &payload.message,
            payload.attachment_url.as_deref(),
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "enquiries",
            Some(enquiry.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Enquiry sent successfully",
            "data": enquiry,
        })),
    ))
}

// GET /api/enquiries — gerente vê tudo, os demais só as suas
#[utoipa::path(
    get,
    path = "/api/enquiries",
    tag = "Enquiries",
    responses(
        (status = 200, description = "Consultas visíveis ao usuário", body = Vec<crate::models::enquiry::Enquiry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user_enquiries(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let enquiries = app_state.enquiry_service.list_for(&user.0).await?;
    Ok(Json(ListEnvelope::new(enquiries)))
}

// GET /api/enquiries/pending-count
#[utoipa::path(
    get,
    path = "/api/enquiries/pending-count",
    tag = "Enquiries",
    responses((status = 200, description = "Consultas pendentes endereçadas ao usuário")),
    security(("api_jwt" = []))
)]
pub async fn get_pending_count(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.enquiry_service.pending_count(user.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "count": count },
    })))
}

// GET /api/enquiries/{id} — só participantes ou gerente
#[utoipa::path(
    get,
    path = "/api/enquiries/{id}",
    tag = "Enquiries",
    params(("id" = Uuid, Path, description = "ID da consulta")),
    responses(
        (status = 200, description = "Consulta", body = crate::models::enquiry::Enquiry),
        (status = 403, description = "Usuário não participa da consulta"),
        (status = 404, description = "Consulta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_enquiry_by_id(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let enquiry = app_state.enquiry_service.get(id, &user.0).await?;
    Ok(Json(Envelope::new(enquiry)))
}

// PUT /api/enquiries/{id}/respond (somente gerente)
#[utoipa::path(
    put,
    path = "/api/enquiries/{id}/respond",
    tag = "Enquiries",
    params(("id" = Uuid, Path, description = "ID da consulta")),
    request_body = RespondEnquiryPayload,
    responses(
        (status = 200, description = "Resposta registrada", body = crate::models::enquiry::Enquiry),
        (status = 404, description = "Consulta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_to_enquiry(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanRespondEnquiries>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondEnquiryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let enquiry = app_state
        .enquiry_service
        .respond(id, &payload.response, &user.0)
        .await?;

    app_state
        .audit_service
        .record(Some(user.0.id), "UPDATE", "enquiries", Some(id), None)
        .await;

    Ok(Json(json!({
        "success": true,
        "message": "Response sent successfully",
        "data": enquiry,
    })))
}

// PUT /api/enquiries/{id}/status (somente gerente)
#[utoipa::path(
    put,
    path = "/api/enquiries/{id}/status",
    tag = "Enquiries",
    params(("id" = Uuid, Path, description = "ID da consulta")),
    request_body = UpdateEnquiryStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = crate::models::enquiry::Enquiry),
        (status = 404, description = "Consulta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_enquiry_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanRespondEnquiries>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnquiryStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let enquiry = app_state
        .enquiry_service
        .update_status(id, payload.status)
        .await?;

    app_state
        .audit_service
        .record(Some(user.0.id), "UPDATE", "enquiries", Some(id), None)
        .await;

    Ok(Json(Envelope::new(enquiry)))
}
