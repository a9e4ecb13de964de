// src/models/enquiry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "enquiry_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    Pending,
    Responded,
    Closed,
}

// Consulta entre papéis (ex: apontador -> gerente). O anexo, quando
// existe, é uma URL produzida por um serviço de upload externo.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enquiry {
    pub id: Uuid,
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub subject: String,
    pub message: String,
    pub attachment_url: Option<String>,
    pub response: Option<String>,
    pub status: EnquiryStatus,
    pub responded_by: Option<Uuid>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Consulta + nomes de remetente/destinatário para listagem.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EnquiryWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub enquiry: Enquiry,
    pub from_name: String,
    pub to_name: String,
}
