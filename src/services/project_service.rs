// src/services/project_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProjectRepository, UserRepository},
    models::{
        auth::{Role, User},
        project::{CreateProjectPayload, Project, ProjectAssignment, ProjectStats},
    },
};

#[derive(Clone)]
pub struct ProjectService {
    project_repo: ProjectRepository,
    user_repo: UserRepository,
}

impl ProjectService {
    pub fn new(project_repo: ProjectRepository, user_repo: UserRepository) -> Self {
        Self {
            project_repo,
            user_repo,
        }
    }

    pub async fn create(
        &self,
        payload: &CreateProjectPayload,
        created_by: Uuid,
    ) -> Result<Project, AppError> {
        self.project_repo
            .create(
                &payload.project_name,
                &payload.project_code,
                payload.location.as_deref(),
                payload.description.as_deref(),
                created_by,
            )
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_all().await
    }

    // "Minhas obras": gerente vê todas, os demais só as atribuídas.
    pub async fn list_for(&self, user: &User) -> Result<Vec<Project>, AppError> {
        if user.role == Role::Manager {
            self.project_repo.list_all().await
        } else {
            self.project_repo.list_for_user(user.id).await
        }
    }

    pub async fn find(&self, id: Uuid) -> Result<Project, AppError> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Project"))
    }

    pub async fn assign_user(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        assigned_by: Uuid,
    ) -> Result<ProjectAssignment, AppError> {
        // Valida as duas pontas antes de criar o vínculo.
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        self.project_repo
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::NotFound("Project"))?;

        self.project_repo
            .assign(user_id, project_id, assigned_by)
            .await
    }

    pub async fn stats(&self, project_id: Uuid) -> Result<ProjectStats, AppError> {
        // 404 explícito para obra inexistente.
        self.find(project_id).await?;
        self.project_repo.stats(project_id).await
    }
}
