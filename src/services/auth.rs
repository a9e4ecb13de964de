// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, RegisterUserPayload, User},
};

// Emite um token HS256 com validade de 7 dias.
pub(crate) fn issue_token(user_id: Uuid, jwt_secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

pub(crate) fn decode_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    pub async fn register_user(
        &self,
        payload: &RegisterUserPayload,
    ) -> Result<(User, String), AppError> {
        if self
            .user_repo
            .exists_by_username_or_email(&payload.username, &payload.email)
            .await?
        {
            return Err(AppError::Conflict(
                "User already exists with this email or username".to_string(),
            ));
        }

        // Hashing bcrypt é caro: roda fora do executor async.
        let password_clone = payload.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Hashing task failed: {e}"))??;

        let user = self
            .user_repo
            .create_user(
                &payload.username,
                &payload.email,
                &password_hash,
                payload.role,
                &payload.full_name,
            )
            .await?;

        let token = issue_token(user.id, &self.jwt_secret)?;
        Ok((user, token))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Conta desativada se comporta como credencial inválida:
        // não revelamos qual das duas coisas falhou.
        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Password verification task failed: {e}"))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = issue_token(user.id, &self.jwt_secret)?;
        Ok((user, token))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_secret)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_keeps_the_subject() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "test-secret").unwrap();
        let claims = decode_token(&token, "test-secret").unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "secret-a").unwrap();
        let result = decode_token(&token, "secret-b");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            decode_token("not-a-jwt", "whatever"),
            Err(AppError::InvalidToken)
        ));
    }
}
