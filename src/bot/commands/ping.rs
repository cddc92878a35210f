use serenity::all::CreateCommand;

pub const NAME: &str = "ping";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Check that the bot is online")
        .dm_permission(false)
}

pub fn run() -> String {
    "Pong!".to_string()
}
