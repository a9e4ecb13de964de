// src/services/notification_service.rs
//
// Notificações internas + envio de e-mail. O transporte real de
// e-mail é um colaborador externo: aqui ele é um contrato (Mailer),
// e toda entrega é melhor esforço — falha vira log, nunca erro
// da requisição principal.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{NotificationRepository, UserRepository},
    models::notification::Notification,
};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

// Implementação padrão: apenas registra a intenção de envio.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::info!("📧 E-mail para {to}: {subject}");
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    user_repo: UserRepository,
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(
        notification_repo: NotificationRepository,
        user_repo: UserRepository,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
            mailer,
        }
    }

    // Cria a notificação engolindo qualquer falha.
    pub async fn notify(&self, user_id: Uuid, title: &str, message: &str, kind: &str) {
        if let Err(e) = self
            .notification_repo
            .create(user_id, title, message, kind)
            .await
        {
            tracing::warn!("Failed to create notification for {user_id}: {e}");
        }
    }

    // Notificação + e-mail, ambos melhor esforço.
    pub async fn notify_with_email(&self, user_id: Uuid, title: &str, message: &str, kind: &str) {
        self.notify(user_id, title, message, kind).await;

        match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => {
                if let Err(e) = self.mailer.send(&user.email, title, message).await {
                    tracing::warn!("Failed to send e-mail to {}: {e}", user.email);
                }
            }
            Ok(None) => {
                tracing::warn!("E-mail skipped: user {user_id} not found");
            }
            Err(e) => {
                tracing::warn!("E-mail skipped: failed to load user {user_id}: {e}");
            }
        }
    }

    pub async fn list(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>, AppError> {
        self.notification_repo.list(user_id, limit).await
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.notification_repo.unread_count(user_id).await
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, AppError> {
        self.notification_repo
            .mark_read(id, user_id)
            .await?
            .ok_or(AppError::NotFound("Notification"))
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.notification_repo.mark_all_read(user_id).await
    }
}
