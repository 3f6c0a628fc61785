use serenity::all::{GuildId, RoleId, UserId};
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{
    bot::command::{CommandContext, CommandRegistry},
    data::{catalog::NationCatalog, config::ConfigRepository},
    model::{
        command::{CommandArgs, CommandInvocation},
        member::MemberProfile,
    },
    platform::memory::InMemoryPlatform,
    service::guild::GuildService,
    state::AppState,
};


const GUILD_ID: u64 = 100;
const USER_ID: u64 = 1;

/// A bootstrapped guild with one member and the standard command registry.
struct Setup {
    _test: TestContext,
    state: AppState,
    platform: InMemoryPlatform,
    registry: CommandRegistry,
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
        GuildService::new(&state, &platform)
            .bootstrap(GuildId::new(GUILD_ID))
            .await
            .unwrap();
        platform.add_member(
            GuildId::new(GUILD_ID),
            MemberProfile {
                user_id: UserId::new(USER_ID),
                username: "alice".to_string(),
                global_name: None,
                nick: None,
                roles: Vec::new(),
            },
        );

        Self {
            _test: test,
            state,
            platform,
            registry: CommandRegistry::standard().unwrap(),
        }
    }

    fn context(&self) -> CommandContext<'_> {
        let roles: Vec<RoleId> = self
            .platform
            .member_profile(GuildId::new(GUILD_ID), UserId::new(USER_ID))
            .map(|profile| profile.roles)
            .unwrap_or_default();

        CommandContext {
            state: &self.state,
            platform: &self.platform,
            guild_id: GuildId::new(GUILD_ID),
            user_id: UserId::new(USER_ID),
            member_roles: roles,
        }
    }

    async fn run(&self, path: &str, args: CommandArgs) -> String {
        let invocation = CommandInvocation {
            path: path.to_string(),
            args,
            focused: None,
        };

        self.registry
            .dispatch(&self.context(), &invocation)
            .await
            .content
    }
}
