//! Slash command kinds served by the bot

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Chat,
    Image,
    Video,
    Search,
    Docs,
    Music,
}

impl CommandType {
    pub const ALL: [CommandType; 6] = [
        CommandType::Chat,
        CommandType::Video,
        CommandType::Search,
        CommandType::Image,
        CommandType::Music,
        CommandType::Docs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Chat => "chat",
            CommandType::Image => "image",
            CommandType::Video => "video",
            CommandType::Search => "search",
            CommandType::Docs => "docs",
            CommandType::Music => "music",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Name of the single string option the slash command carries
    pub fn option_name(&self) -> &'static str {
        match self {
            CommandType::Chat => "message",
            CommandType::Search => "search",
            _ => "prompt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandType::Chat => "Chat with the assistant",
            CommandType::Video => "Generate a 5s long video",
            CommandType::Search => "Perform a search query using Bing and AI models",
            CommandType::Image => "Generate an image using DALLE-3",
            CommandType::Music => {
                "Generate up to 1m of audio using an .mp3 link and lyrics after it in the same message"
            }
            CommandType::Docs => {
                "Call our docs and find out how to use each of our nodes on Spark Engine"
            }
        }
    }

    pub fn option_description(&self) -> &'static str {
        match self {
            CommandType::Chat => "Your message",
            CommandType::Search => "Your search",
            _ => "Your prompt",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
