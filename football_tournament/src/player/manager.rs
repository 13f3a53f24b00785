//! Player use cases.

use std::sync::Arc;

use super::models::{Player, PlayerDetails, PlayerId};
use crate::db::PlayerRepository;
use crate::errors::{EMPTY_PLAYER_NAME, TournamentError, TournamentResult};

/// Player manager
///
/// Players are leaf entities. Apart from the name check, every operation goes
/// straight to storage.
#[derive(Clone)]
pub struct PlayerManager {
    players: Arc<dyn PlayerRepository>,
}

impl PlayerManager {
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self { players }
    }

    /// Store a new player
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Name is blank
    pub async fn create_player(&self, player: &Player) -> TournamentResult<()> {
        check_name(&player.name)?;
        self.players.create(player).await?;
        log::debug!("Created player {} ({})", player.name, player.id);
        Ok(())
    }

    pub async fn get_player(&self, id: PlayerId) -> TournamentResult<Player> {
        self.players.get_by_id(id).await
    }

    pub async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        self.players.get_all().await
    }

    /// Overwrite name and birth date, returning the stored player
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Name is blank
    /// * `TournamentError::NotFound` - No such player
    pub async fn update_player(
        &self,
        id: PlayerId,
        details: &PlayerDetails,
    ) -> TournamentResult<Player> {
        check_name(&details.name)?;
        self.players.update(id, details).await
    }

    pub async fn delete_player(&self, id: PlayerId) -> TournamentResult<()> {
        self.players.delete(id).await?;
        log::debug!("Deleted player {id}");
        Ok(())
    }
}

fn check_name(name: &str) -> TournamentResult<()> {
    if name.trim().is_empty() {
        return Err(TournamentError::validation(EMPTY_PLAYER_NAME));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::errors::ErrorKind;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn manager() -> PlayerManager {
        PlayerManager::new(MemoryStore::new().repositories().players)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let manager = manager();
        let born = Utc.with_ymd_and_hms(1987, 6, 24, 0, 0, 0).unwrap();
        let player = Player::new("Messi", born);

        manager.create_player(&player).await.unwrap();
        let fetched = manager.get_player(player.id).await.unwrap();

        assert_eq!(fetched.id, player.id);
        assert_eq!(fetched.name, "Messi");
        assert_eq!(fetched.date_birth, born);
    }

    #[tokio::test]
    async fn test_update_overwrites_details() {
        let manager = manager();
        let born = Utc.with_ymd_and_hms(1987, 6, 24, 0, 0, 0).unwrap();
        let player = Player::new("Leo", born);
        manager.create_player(&player).await.unwrap();

        let details = PlayerDetails {
            name: "Lionel Messi".to_string(),
            date_birth: born,
        };
        let updated = manager.update_player(player.id, &details).await.unwrap();

        assert_eq!(updated.name, "Lionel Messi");
        assert_eq!(updated.created_at, player.created_at);
        assert_eq!(manager.list_players().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let manager = manager();
        let err = manager.delete_player(uuid::Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    /// Storage that fails the test if a write reaches it
    struct RejectingStore;

    #[async_trait]
    impl PlayerRepository for RejectingStore {
        async fn create(&self, _player: &Player) -> TournamentResult<()> {
            panic!("blank name reached storage");
        }

        async fn get_by_id(&self, id: PlayerId) -> TournamentResult<Player> {
            Err(TournamentError::not_found(format!("player {id} not found")))
        }

        async fn get_all(&self) -> TournamentResult<Vec<Player>> {
            Ok(Vec::new())
        }

        async fn update(&self, _id: PlayerId, _details: &PlayerDetails) -> TournamentResult<Player> {
            panic!("blank name reached storage");
        }

        async fn delete(&self, _id: PlayerId) -> TournamentResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_blank_name_rejected_before_storage() {
        let manager = PlayerManager::new(Arc::new(RejectingStore));
        let born = Utc.with_ymd_and_hms(1987, 6, 24, 0, 0, 0).unwrap();

        let err = manager.create_player(&Player::new("   ", born)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), EMPTY_PLAYER_NAME);

        let details = PlayerDetails {
            name: String::new(),
            date_birth: born,
        };
        let err = manager
            .update_player(uuid::Uuid::new_v4(), &details)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
