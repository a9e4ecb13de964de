// src/services/enquiry_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EnquiryRepository, UserRepository},
    models::{
        auth::{Role, User},
        enquiry::{Enquiry, EnquiryStatus, EnquiryWithNames},
    },
    services::notification_service::NotificationService,
};

// Quem pode ver uma consulta: remetente, destinatário ou gerente.
pub(crate) fn can_view(enquiry_from: Uuid, enquiry_to: Uuid, user_id: Uuid, role: Role) -> bool {
    role == Role::Manager || enquiry_from == user_id || enquiry_to == user_id
}

#[derive(Clone)]
pub struct EnquiryService {
    enquiry_repo: EnquiryRepository,
    user_repo: UserRepository,
    notification_service: NotificationService,
}

impl EnquiryService {
    pub fn new(
        enquiry_repo: EnquiryRepository,
        user_repo: UserRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            enquiry_repo,
            user_repo,
            notification_service,
        }
    }

    // Sem destinatário explícito, a consulta vai para um gerente.
    pub async fn create(
        &self,
        from: &User,
        to_user: Option<Uuid>,
        subject: &str,
        message: &str,
        attachment_url: Option<&str>,
    ) -> Result<Enquiry, AppError> {
        let to_user = match to_user {
            Some(id) => id,
            None => self
                .user_repo
                .find_first_manager()
                .await?
                .ok_or(AppError::NotFound("Manager"))?,
        };

        let enquiry = self
            .enquiry_repo
            .create(from.id, to_user, subject, message, attachment_url)
            .await?;

        self.notification_service
            .notify_with_email(
                to_user,
                "New Enquiry",
                &format!("You have a new enquiry from {}: {}", from.full_name, subject),
                "enquiry",
            )
            .await;

        Ok(enquiry)
    }

    pub async fn list_for(&self, user: &User) -> Result<Vec<EnquiryWithNames>, AppError> {
        self.enquiry_repo
            .list_for_user(user.id, user.role == Role::Manager)
            .await
    }

    pub async fn get(&self, id: Uuid, user: &User) -> Result<Enquiry, AppError> {
        let enquiry = self
            .enquiry_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Enquiry"))?;

        if !can_view(enquiry.from_user, enquiry.to_user, user.id, user.role) {
            return Err(AppError::AccessDenied("Unauthorized access".to_string()));
        }

        Ok(enquiry)
    }

    pub async fn respond(
        &self,
        id: Uuid,
        response: &str,
        responder: &User,
    ) -> Result<Enquiry, AppError> {
        let enquiry = self
            .enquiry_repo
            .respond(id, response, responder.id)
            .await?
            .ok_or(AppError::NotFound("Enquiry"))?;

        self.notification_service
            .notify(
                enquiry.from_user,
                "Enquiry Responded",
                &format!("Your enquiry \"{}\" has been answered", enquiry.subject),
                "enquiry",
            )
            .await;

        Ok(enquiry)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
    ) -> Result<Enquiry, AppError> {
        self.enquiry_repo
            .update_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Enquiry"))
    }

    pub async fn pending_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.enquiry_repo.pending_count(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_participants_or_manager_can_view() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_view(from, to, from, Role::AttendanceClerk));
        assert!(can_view(from, to, to, Role::Storeman));
        assert!(can_view(from, to, stranger, Role::Manager));
        assert!(!can_view(from, to, stranger, Role::Storeman));
        assert!(!can_view(from, to, stranger, Role::AttendanceClerk));
    }
}
