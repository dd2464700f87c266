use std::{collections::HashMap, fmt::Debug, sync::Arc};

use anyhow::anyhow;
use twilight_model::application::interaction::{
    Interaction,
    application_command::{CommandDataOption, CommandOptionValue},
};

use crate::{
    arguments::ResolvedLookup,
    commands::{CommandFuture, CommandResponse},
};

/// A fused extraction-and-invocation step stored in a leaf descriptor.
pub type CommandHandler<S> = Box<
    dyn Fn(&[CommandDataOption], &ResolvedLookup<'_>, Arc<Interaction>, Arc<S>) -> CommandFuture
        + Send
        + Sync,
>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("Unknown subcommand `{0}`")]
    UnknownSubcommand(String),
    #[error("Interaction options do not contain a subcommand")]
    MissingSubcommand,
    #[error("Interaction is missing a resolved {0} target")]
    MissingTarget(&'static str),
    #[error("Interaction does not contain application command data")]
    MissingCommandData,
}

/// The runtime artifact compiled 1:1 with each command or sub-command.
///
/// Built once at compile time and read-only afterwards, so any number of
/// dispatches may walk it concurrently.
pub struct ExecuteDescriptor<S> {
    kind: DescriptorKind<S>,
}

enum DescriptorKind<S> {
    Leaf(CommandHandler<S>),
    Group(HashMap<String, ExecuteDescriptor<S>>),
}

impl<S> ExecuteDescriptor<S> {
    pub(crate) fn leaf(handler: CommandHandler<S>) -> Self {
        ExecuteDescriptor {
            kind: DescriptorKind::Leaf(handler),
        }
    }

    pub(crate) fn group(entries: HashMap<String, ExecuteDescriptor<S>>) -> Self {
        ExecuteDescriptor {
            kind: DescriptorKind::Group(entries),
        }
    }

    /// Walks the sub-command path carried by `options` down to a leaf and
    /// invokes its handler.
    pub async fn execute(
        &self,
        options: &[CommandDataOption],
        resolved: &ResolvedLookup<'_>,
        interaction: Arc<Interaction>,
        state: Arc<S>,
    ) -> CommandResponse {
        let mut descriptor = self;
        let mut options = options;

        loop {
            match &descriptor.kind {
                DescriptorKind::Leaf(handler) => {
                    return handler(options, resolved, interaction, state).await;
                }
                DescriptorKind::Group(entries) => {
                    let (name, nested) = options
                        .iter()
                        .find_map(|option| match &option.value {
                            CommandOptionValue::SubCommand(nested)
                            | CommandOptionValue::SubCommandGroup(nested) => {
                                Some((option.name.as_str(), nested.as_slice()))
                            }
                            _ => None,
                        })
                        .ok_or_else(|| anyhow!(DispatchError::MissingSubcommand))?;

                    descriptor = entries.get(name).ok_or_else(|| {
                        anyhow!(DispatchError::UnknownSubcommand(name.to_string()))
                    })?;
                    options = nested;
                }
            }
        }
    }
}

impl<S> Debug for ExecuteDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DescriptorKind::Leaf(_) => write!(f, "Leaf"),
            DescriptorKind::Group(entries) => {
                write!(f, "Group {{ ")?;
                for (name, child) in entries {
                    write!(f, "{}: {:?}, ", name, child)?;
                }
                write!(f, "}}")
            }
        }
    }
}
