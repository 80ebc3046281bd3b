//! Command handler registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::warn;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::SlashCommandHandler;
use super::handlers::create_all_handlers;

/// Registry mapping command names to handlers
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with every built-in handler
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for all names returned by `command_names()`
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names (not unique handlers)
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route an interaction to its handler. Unknown commands are logged and ignored.
    pub async fn dispatch(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match self.get(&command.data.name) {
            Some(handler) => handler.handle(ctx, serenity_ctx, command).await,
            None => {
                warn!("No handler registered for /{}", command.data.name);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl SlashCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _command: &ApplicationCommandInteraction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("chat").is_none());
    }

    #[test]
    fn test_registry_register_multiple_names() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["chat", "docs"],
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("chat"));
        assert!(registry.contains("docs"));
        assert!(!registry.contains("image"));
    }

    #[test]
    fn test_default_handlers_cover_every_command() {
        let registry = CommandRegistry::with_default_handlers();
        for name in ["chat", "video", "search", "image", "music", "docs"] {
            assert!(registry.contains(name), "missing handler for /{name}");
        }
        assert_eq!(registry.len(), 6);
    }
}
