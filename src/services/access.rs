// src/services/access.rs
//
// O predicado de acesso por obra. Todo handler que toca recurso
// escopado (funcionários, presença, estoque, despesas, relatórios)
// DEVE chamá-lo antes de ler ou escrever, e rejeitar com 403 —
// filtrar resultados em silêncio não basta.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProjectRepository,
    models::auth::{Role, User},
};

// A decisão em si é pura: gerente tem acesso universal (inclusive a
// obras inexistentes, para manter o predicado total); os demais
// dependem de um vínculo explícito.
pub(crate) fn decide(role: Role, has_assignment: bool) -> bool {
    role == Role::Manager || has_assignment
}

#[derive(Clone)]
pub struct AccessService {
    project_repo: ProjectRepository,
}

impl AccessService {
    pub fn new(project_repo: ProjectRepository) -> Self {
        Self { project_repo }
    }

    pub async fn has_project_access(
        &self,
        user: &User,
        project_id: Uuid,
    ) -> Result<bool, AppError> {
        // Gerente não precisa de consulta: curto-circuito.
        if user.role == Role::Manager {
            return Ok(true);
        }

        let has_assignment = self
            .project_repo
            .assignment_exists(user.id, project_id)
            .await?;

        Ok(decide(user.role, has_assignment))
    }

    pub async fn ensure_project_access(
        &self,
        user: &User,
        project_id: Uuid,
    ) -> Result<(), AppError> {
        if self.has_project_access(user, project_id).await? {
            Ok(())
        } else {
            Err(AppError::AccessDenied(
                "Access denied to this project".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Manager, false, true)] // gerente, mesmo sem vínculo (ou obra inexistente)
    #[case(Role::Manager, true, true)]
    #[case(Role::Storeman, true, true)]
    #[case(Role::Storeman, false, false)]
    #[case(Role::AttendanceClerk, true, true)]
    #[case(Role::AttendanceClerk, false, false)]
    fn access_decision(#[case] role: Role, #[case] has_assignment: bool, #[case] expected: bool) {
        assert_eq!(decide(role, has_assignment), expected);
    }
}
