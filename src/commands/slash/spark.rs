//! # Spark Engine Commands
//!
//! `/chat`, `/video`, `/search`, `/image`, `/music` and `/docs`, each taking
//! one required string.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::features::replies::CommandType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    CommandType::ALL.into_iter().map(create_command).collect()
}

fn create_command(kind: CommandType) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(kind.as_str())
        .description(kind.description())
        .create_option(|option| {
            option
                .name(kind.option_name())
                .description(kind.option_description())
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_of(command: &CreateApplicationCommand) -> &serde_json::Value {
        &command.0.get("options").unwrap().as_array().unwrap()[0]
    }

    #[test]
    fn test_chat_takes_message() {
        let commands = create_commands();
        let chat = commands
            .iter()
            .find(|c| c.0.get("name").and_then(|v| v.as_str()) == Some("chat"))
            .unwrap();
        let option = option_of(chat);
        assert_eq!(option["name"], "message");
        assert_eq!(option["required"], true);
    }

    #[test]
    fn test_search_takes_search() {
        let commands = create_commands();
        let search = commands
            .iter()
            .find(|c| c.0.get("name").and_then(|v| v.as_str()) == Some("search"))
            .unwrap();
        assert_eq!(option_of(search)["name"], "search");
    }

    #[test]
    fn test_every_option_is_a_string() {
        for command in create_commands() {
            // CommandOptionType::String
            assert_eq!(option_of(&command)["type"], 3);
        }
    }
}
