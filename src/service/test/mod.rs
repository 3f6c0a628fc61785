use serenity::all::{GuildId, RoleId, UserId};
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{
    data::{catalog::NationCatalog, config::ConfigRepository},
    error::{nation::NationError, AppError},
    model::member::MemberProfile,
    platform::memory::InMemoryPlatform,
    service::guild::GuildService,
    state::AppState,
};

mod guild;

const GUILD_ID: u64 = 100;

/// A bootstrapped guild on an in-memory platform, with the standard catalog.
struct Setup {
    /// Keeps the temporary data directory alive.
    test: TestContext,
    state: AppState,
    platform: InMemoryPlatform,
    guild_id: GuildId,
}

impl Setup {
    async fn new() -> Self {
        let test = TestBuilder::new().with_default_catalog().build().unwrap();
        let catalog = NationCatalog::load(&test.nations_path).await.unwrap();
        let state = AppState::new(
            catalog,
            ConfigRepository::new(&test.config_path),
            "test-token".to_string(),
        );
        let platform = InMemoryPlatform::new();
        let guild_id = GuildId::new(GUILD_ID);

        GuildService::new(&state, &platform)
            .bootstrap(guild_id)
            .await
            .unwrap();

        Self {
            test,
            state,
            platform,
            guild_id,
        }
    }

    /// Adds a member with the given roles and returns their ID.
    fn member(&self, user_id: u64, name: &str, roles: Vec<RoleId>) -> UserId {
        let user_id = UserId::new(user_id);
        self.platform.add_member(
            self.guild_id,
            MemberProfile {
                user_id,
                username: name.to_string(),
                global_name: None,
                nick: None,
                roles,
            },
        );
        user_id
    }

    fn profile(&self, user_id: UserId) -> MemberProfile {
        self.platform.member_profile(self.guild_id, user_id).unwrap()
    }
}

fn nation_err(result: Result<impl std::fmt::Debug, AppError>) -> NationError {
    match result {
        Err(AppError::NationErr(err)) => err,
        other => panic!("expected a nation error, got {:?}", other),
    }
}
