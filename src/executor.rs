use std::{collections::HashMap, sync::Arc};

use anyhow::anyhow;
use tracing::debug;
use twilight_model::{
    application::{
        command::Command as ApplicationCommand,
        interaction::{Interaction, InteractionData},
    },
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
};
use twilight_util::builder::message::{ContainerBuilder, TextDisplayBuilder};

use crate::{
    arguments::ResolvedLookup,
    commands::{Command, CommandPermissions, CommandResponse, CompileError},
    descriptor::{DispatchError, ExecuteDescriptor},
};

/// Compiles declared commands and routes incoming interactions to them.
///
/// All commands are compiled during registration; dispatch only reads the
/// compiled artifacts.
pub struct CommandExecutor<S>
where
    S: Send + Sync + 'static,
{
    permissions: CommandPermissions,
    commands: Vec<ApplicationCommand>,
    descriptors: HashMap<String, ExecuteDescriptor<S>>,
}

impl<S> CommandExecutor<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(permissions: CommandPermissions) -> Self {
        CommandExecutor {
            permissions,
            commands: Vec::new(),
            descriptors: HashMap::new(),
        }
    }

    /// Compiles a command and stores its registration schema and dispatch
    /// descriptor.
    pub fn register(&mut self, command: impl Command<S>) -> Result<(), CompileError> {
        let (command, descriptor) = Box::new(command).compile(&self.permissions)?;

        if self.descriptors.contains_key(&command.name) {
            return Err(CompileError::DuplicateName(command.name));
        }

        debug!(name = %command.name, "registered command");
        self.descriptors.insert(command.name.clone(), descriptor);
        self.commands.push(command);
        Ok(())
    }

    /// The registration schemas for every registered command.
    pub fn commands(&self) -> &[ApplicationCommand] {
        &self.commands
    }

    /// Executes the command named by an interaction.
    pub async fn execute(&self, interaction: Arc<Interaction>, state: Arc<S>) -> CommandResponse {
        let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
            return Err(anyhow!(DispatchError::MissingCommandData));
        };

        let descriptor = self
            .descriptors
            .get(&data.name)
            .ok_or_else(|| anyhow!(DispatchError::UnknownCommand(data.name.clone())))?;

        debug!(name = %data.name, "dispatching interaction");
        let resolved = ResolvedLookup::new(data.resolved.as_ref());
        descriptor
            .execute(&data.options, &resolved, Arc::clone(&interaction), state)
            .await
    }
}

/// Renders an error as the ephemeral message shown for failed commands.
pub fn error_response(error: &anyhow::Error) -> InteractionResponse {
    let container = ContainerBuilder::new()
        .accent_color(Some(0xAA0000))
        .component(TextDisplayBuilder::new(format!("An error occurred: {}", error)).build())
        .build();

    InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(InteractionResponseData {
            components: Some(vec![container.into()]),
            flags: Some(MessageFlags::EPHEMERAL | MessageFlags::IS_COMPONENTS_V2),
            ..Default::default()
        }),
    }
}

impl<S> From<&CommandExecutor<S>> for Vec<ApplicationCommand>
where
    S: Send + Sync + 'static,
{
    fn from(executor: &CommandExecutor<S>) -> Self {
        executor.commands().to_vec()
    }
}

impl<S> Default for CommandExecutor<S>
where
    S: Send + Sync + 'static,
{
    fn default() -> Self {
        CommandExecutor::new(CommandPermissions::default())
    }
}
