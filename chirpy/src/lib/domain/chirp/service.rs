use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::chirp::ports::ChirpServicePort;

/// Domain service implementation for chirp operations.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body: command.body,
            user_id: command.author,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(chirp).await?;

        tracing::info!(chirp_id = %created.id, user_id = %created.user_id, "Chirp posted");

        Ok(created)
    }

    async fn reset_chirps(&self) -> Result<(), ChirpError> {
        self.repository.delete_all().await?;
        tracing::info!("All chirps deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::chirp::models::ChirpBody;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn delete_all(&self) -> Result<(), ChirpError>;
        }
    }

    #[tokio::test]
    async fn test_create_chirp_owned_by_author() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |chirp| {
                chirp.user_id == author
                    && chirp.body.as_str() == "Gale!"
                    && chirp.created_at == chirp.updated_at
            })
            .times(1)
            .returning(|chirp| Ok(chirp));

        let command = CreateChirpCommand {
            body: ChirpBody::new("Gale!".to_string()).unwrap(),
            author,
        };

        let chirp = ChirpService::new(Arc::new(repository))
            .create_chirp(command)
            .await
            .expect("Failed to create chirp");

        assert_eq!(chirp.user_id, author);
    }

    #[tokio::test]
    async fn test_create_chirp_unknown_author() {
        let mut repository = MockTestChirpRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|chirp| Err(ChirpError::AuthorNotFound(chirp.user_id.to_string())));

        let command = CreateChirpCommand {
            body: ChirpBody::new("Gale!".to_string()).unwrap(),
            author: UserId::new(),
        };

        let result = ChirpService::new(Arc::new(repository))
            .create_chirp(command)
            .await;
        assert!(matches!(result, Err(ChirpError::AuthorNotFound(_))));
    }

    #[tokio::test]
    async fn test_reset_chirps() {
        let mut repository = MockTestChirpRepository::new();
        repository.expect_delete_all().times(1).returning(|| Ok(()));

        assert!(ChirpService::new(Arc::new(repository))
            .reset_chirps()
            .await
            .is_ok());
    }
}
