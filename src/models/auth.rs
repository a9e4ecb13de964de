// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O conjunto fechado de papéis do sistema.
// "store_manager" e "employee" são aliases históricos aceitos na entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    #[serde(alias = "store_manager")]
    Storeman,
    #[serde(alias = "employee")]
    AttendanceClerk,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 3, message = "Username must have at least 3 characters."))]
    pub username: String,

    #[validate(email(message = "The e-mail provided is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must have at least 6 characters."))]
    pub password: String,

    pub role: Role,

    #[validate(length(min = 1, message = "Full name is required."))]
    pub full_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "The e-mail provided is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must have at least 6 characters."))]
    pub password: String,
}

// Resposta de autenticação com o token e o usuário (sem a senha)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_canonical_values() {
        assert_eq!(
            serde_json::from_str::<Role>("\"manager\"").unwrap(),
            Role::Manager
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"storeman\"").unwrap(),
            Role::Storeman
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"attendance_clerk\"").unwrap(),
            Role::AttendanceClerk
        );
    }

    #[test]
    fn role_accepts_legacy_aliases() {
        assert_eq!(
            serde_json::from_str::<Role>("\"store_manager\"").unwrap(),
            Role::Storeman
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"employee\"").unwrap(),
            Role::AttendanceClerk
        );
    }

    #[test]
    fn role_serializes_to_canonical_values() {
        assert_eq!(serde_json::to_string(&Role::Storeman).unwrap(), "\"storeman\"");
        assert_eq!(
            serde_json::to_string(&Role::AttendanceClerk).unwrap(),
            "\"attendance_clerk\""
        );
    }

    #[test]
    fn user_serialization_never_exposes_password_hash() {
        let user = User {
            id: Uuid::nil(),
            username: "maria".into(),
            email: "maria@example.com".into(),
            password_hash: "$2b$12$secret".into(),
            role: Role::Manager,
            full_name: "Maria Silva".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }
}
