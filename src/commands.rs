use std::{collections::HashMap, pin::Pin, sync::Arc};

use anyhow::{Result, anyhow};
use twilight_model::{
    application::{
        command::{
            Command as ApplicationCommand, CommandOptionChoice, CommandOptionType, CommandType,
        },
        interaction::{
            Interaction, InteractionContextType, InteractionMember,
            application_command::CommandDataOption,
        },
    },
    channel::Message,
    guild::Permissions,
    http::interaction::InteractionResponse,
    user::User,
};
use twilight_util::builder::command::CommandBuilder;

use crate::{
    arguments::{CommandOption, ResolvedLookup},
    descriptor::{CommandHandler, DispatchError, ExecuteDescriptor},
};

pub type CommandResponse = Result<InteractionResponse>;
pub type CommandFuture = Pin<Box<dyn Future<Output = CommandResponse> + Send>>;

type NoArgHandler<S> = Box<dyn Fn(Arc<Interaction>, Arc<S>) -> CommandFuture + Send + Sync>;
type MemberHandler<S> =
    Box<dyn Fn(InteractionMember, Arc<Interaction>, Arc<S>) -> CommandFuture + Send + Sync>;
type UserHandler<S> = Box<dyn Fn(User, Arc<Interaction>, Arc<S>) -> CommandFuture + Send + Sync>;
type MessageHandler<S> =
    Box<dyn Fn(Message, Arc<Interaction>, Arc<S>) -> CommandFuture + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Duplicate command name `{0}`")]
    DuplicateName(String),
}

/// Wire-level access control flags shared by every command compiled in a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandPermissions {
    pub default_member_permissions: Option<Permissions>,
    pub dm_permission: Option<bool>,
    pub nsfw: Option<bool>,
}

impl CommandPermissions {
    pub fn new() -> Self {
        CommandPermissions::default()
    }

    pub fn default_member_permissions(mut self, permissions: Permissions) -> Self {
        self.default_member_permissions = Some(permissions);
        self
    }

    pub fn dm_permission(mut self, dm_permission: bool) -> Self {
        self.dm_permission = Some(dm_permission);
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }
}

/// Parameter-holder types whose fields compile into command options.
///
/// Implemented via the `CommandArguments` derive macro.
pub trait CommandArguments: Default + Sized {
    /// Gets the list of options for this parameter set
    fn options() -> Vec<CommandOption>;
    /// Builds an instance from the options received with an interaction
    fn from_options(options: &[CommandDataOption], resolved: &ResolvedLookup<'_>) -> Result<Self>;
}

/// A slash command's handler, selected at declaration time by whether the
/// command takes parameters.
pub enum Callback<S> {
    NoArg(NoArgHandler<S>),
    OneArg {
        options: fn() -> Vec<CommandOption>,
        handler: CommandHandler<S>,
    },
}

impl<S> Callback<S>
where
    S: Send + Sync + 'static,
{
    pub fn no_arg<F, Fut>(handler: F) -> Self
    where
        F: Fn(Arc<Interaction>, Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResponse> + Send + 'static,
    {
        Callback::NoArg(Box::new(move |interaction, state| {
            Box::pin(handler(interaction, state)) as CommandFuture
        }))
    }

    pub fn one_arg<P, F, Fut>(handler: F) -> Self
    where
        P: CommandArguments + Send + 'static,
        F: Fn(P, Arc<Interaction>, Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResponse> + Send + 'static,
    {
        Callback::OneArg {
            options: P::options,
            handler: Box::new(
                move |options: &[CommandDataOption],
                      resolved: &ResolvedLookup<'_>,
                      interaction,
                      state| {
                    match P::from_options(options, resolved) {
                        Ok(arguments) => {
                            Box::pin(handler(arguments, interaction, state)) as CommandFuture
                        }
                        Err(error) => Box::pin(async move { Err(error) }) as CommandFuture,
                    }
                },
            ),
        }
    }
}

/// A member-target command's handler, selected at declaration time by which
/// resolved entity the command wants.
pub enum MemberCallback<S> {
    Member(MemberHandler<S>),
    User(UserHandler<S>),
}

impl<S> MemberCallback<S>
where
    S: Send + Sync + 'static,
{
    pub fn member<F, Fut>(handler: F) -> Self
    where
        F: Fn(InteractionMember, Arc<Interaction>, Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResponse> + Send + 'static,
    {
        MemberCallback::Member(Box::new(move |member, interaction, state| {
            Box::pin(handler(member, interaction, state)) as CommandFuture
        }))
    }

    pub fn user<F, Fut>(handler: F) -> Self
    where
        F: Fn(User, Arc<Interaction>, Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResponse> + Send + 'static,
    {
        MemberCallback::User(Box::new(move |user, interaction, state| {
            Box::pin(handler(user, interaction, state)) as CommandFuture
        }))
    }
}

/// A user-declared command, compiled exactly once into a registration schema
/// and a dispatch descriptor.
pub trait Command<S>: Send + Sync + 'static {
    fn compile(
        self: Box<Self>,
        permissions: &CommandPermissions,
    ) -> Result<(ApplicationCommand, ExecuteDescriptor<S>), CompileError>;
}

/// Commands that can also appear as a named sub-entry inside a group.
pub trait CommandOptions<S>: Send + Sync + 'static {
    fn compile_option(
        self: Box<Self>,
    ) -> Result<(CommandOption, ExecuteDescriptor<S>), CompileError>;
}

fn command_builder(
    name: &str,
    description: &str,
    kind: CommandType,
    permissions: &CommandPermissions,
) -> CommandBuilder {
    let mut builder = CommandBuilder::new(name, description, kind).contexts(vec![
        InteractionContextType::Guild,
        InteractionContextType::BotDm,
        InteractionContextType::PrivateChannel,
    ]);

    if let Some(permissions) = permissions.default_member_permissions {
        builder = builder.default_member_permissions(permissions);
    }
    // Superseded by contexts upstream; the flag still has to reach the schema.
    #[allow(deprecated)]
    if let Some(dm_permission) = permissions.dm_permission {
        builder = builder.dm_permission(dm_permission);
    }
    if let Some(nsfw) = permissions.nsfw {
        builder = builder.nsfw(nsfw);
    }

    builder
}

/// Wraps a compiled sub-command or group option as a top-level chat command,
/// copying its name, description and nested options up into the command.
fn chat_command(option: CommandOption, permissions: &CommandPermissions) -> ApplicationCommand {
    let mut builder = command_builder(
        option.name.as_deref().unwrap_or_default(),
        option.description.as_deref().unwrap_or_default(),
        CommandType::ChatInput,
        permissions,
    );

    for nested in option.options.unwrap_or_default() {
        builder = builder.option(nested);
    }

    builder.build()
}

/// A command targeting a guild member via the user context menu.
pub struct MemberCommand<S> {
    name: String,
    callback: MemberCallback<S>,
}

impl<S> MemberCommand<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(name: &str, callback: MemberCallback<S>) -> Self {
        MemberCommand {
            name: name.to_string(),
            callback,
        }
    }
}

impl<S> Command<S> for MemberCommand<S>
where
    S: Send + Sync + 'static,
{
    fn compile(
        self: Box<Self>,
        permissions: &CommandPermissions,
    ) -> Result<(ApplicationCommand, ExecuteDescriptor<S>), CompileError> {
        let MemberCommand { name, callback } = *self;
        let command = command_builder(&name, "", CommandType::User, permissions).build();

        let handler: CommandHandler<S> = match callback {
            MemberCallback::Member(callback) => Box::new(
                move |_options: &[CommandDataOption],
                      resolved: &ResolvedLookup<'_>,
                      interaction,
                      state| {
                    match resolved.target_member() {
                        Some(member) => callback(member, interaction, state),
                        None => Box::pin(async {
                            Err(anyhow!(DispatchError::MissingTarget("member")))
                        }) as CommandFuture,
                    }
                },
            ),
            MemberCallback::User(callback) => Box::new(
                move |_options: &[CommandDataOption],
                      resolved: &ResolvedLookup<'_>,
                      interaction,
                      state| {
                    match resolved.target_user() {
                        Some(user) => callback(user, interaction, state),
                        None => Box::pin(async { Err(anyhow!(DispatchError::MissingTarget("user"))) })
                            as CommandFuture,
                    }
                },
            ),
        };

        Ok((command, ExecuteDescriptor::leaf(handler)))
    }
}

/// A command targeting a message via the message context menu.
pub struct MessageCommand<S> {
    name: String,
    callback: MessageHandler<S>,
}

impl<S> MessageCommand<S>
where
    S: Send + Sync + 'static,
{
    pub fn new<F, Fut>(name: &str, handler: F) -> Self
    where
        F: Fn(Message, Arc<Interaction>, Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResponse> + Send + 'static,
    {
        MessageCommand {
            name: name.to_string(),
            callback: Box::new(move |message, interaction, state| {
                Box::pin(handler(message, interaction, state)) as CommandFuture
            }),
        }
    }
}

impl<S> Command<S> for MessageCommand<S>
where
    S: Send + Sync + 'static,
{
    fn compile(
        self: Box<Self>,
        permissions: &CommandPermissions,
    ) -> Result<(ApplicationCommand, ExecuteDescriptor<S>), CompileError> {
        let MessageCommand { name, callback } = *self;
        let command = command_builder(&name, "", CommandType::Message, permissions).build();

        let handler: CommandHandler<S> = Box::new(
            move |_options: &[CommandDataOption],
                  resolved: &ResolvedLookup<'_>,
                  interaction,
                  state| {
                match resolved.target_message() {
                    Some(message) => callback(message, interaction, state),
                    None => Box::pin(async { Err(anyhow!(DispatchError::MissingTarget("message"))) })
                        as CommandFuture,
                }
            },
        );

        Ok((command, ExecuteDescriptor::leaf(handler)))
    }
}

/// A chat command, optionally parameterized via a [`CommandArguments`] type.
pub struct SlashCommand<S> {
    name: String,
    description: String,
    callback: Callback<S>,
    choices: HashMap<String, Vec<CommandOptionChoice>>,
}

impl<S> SlashCommand<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(name: &str, description: &str, callback: Callback<S>) -> Self {
        SlashCommand {
            name: name.to_string(),
            description: description.to_string(),
            callback,
            choices: HashMap::new(),
        }
    }

    /// Attaches a choice list to the parameter field named `field`.
    ///
    /// Fields are matched by their declared (non-lowercased) name.
    pub fn choices(mut self, field: &str, choices: Vec<CommandOptionChoice>) -> Self {
        self.choices.insert(field.to_string(), choices);
        self
    }
}

impl<S> Command<S> for SlashCommand<S>
where
    S: Send + Sync + 'static,
{
    fn compile(
        self: Box<Self>,
        permissions: &CommandPermissions,
    ) -> Result<(ApplicationCommand, ExecuteDescriptor<S>), CompileError> {
        let (option, descriptor) = self.compile_option()?;
        Ok((chat_command(option, permissions), descriptor))
    }
}

impl<S> CommandOptions<S> for SlashCommand<S>
where
    S: Send + Sync + 'static,
{
    fn compile_option(
        self: Box<Self>,
    ) -> Result<(CommandOption, ExecuteDescriptor<S>), CompileError> {
        let SlashCommand {
            name,
            description,
            callback,
            choices,
        } = *self;

        let mut option = CommandOption::new(CommandOptionType::SubCommand)
            .name(&name)
            .description(&description);

        let descriptor = match callback {
            Callback::NoArg(handler) => ExecuteDescriptor::leaf(Box::new(
                move |_options: &[CommandDataOption],
                      _resolved: &ResolvedLookup<'_>,
                      interaction,
                      state| handler(interaction, state),
            )),
            Callback::OneArg { options, handler } => {
                let compiled = options()
                    .into_iter()
                    .map(|param| {
                        match choices.get(param.field_name.as_deref().unwrap_or_default()) {
                            Some(list) => param.choices(list.clone()),
                            None => param,
                        }
                    })
                    .collect();
                option = option.options(compiled);
                ExecuteDescriptor::leaf(handler)
            }
        };

        Ok((option, descriptor))
    }
}

/// A named group of chat sub-commands, nestable as a sub-command group.
pub struct SlashCommandGroup<S> {
    name: String,
    description: String,
    sub_commands: Vec<Box<dyn CommandOptions<S>>>,
}

impl<S> SlashCommandGroup<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(name: &str, description: &str) -> Self {
        SlashCommandGroup {
            name: name.to_string(),
            description: description.to_string(),
            sub_commands: Vec::new(),
        }
    }

    /// Adds a sub-entry. Entries compile in the order they were added.
    pub fn sub_command(mut self, sub_command: impl CommandOptions<S>) -> Self {
        self.sub_commands.push(Box::new(sub_command));
        self
    }
}

impl<S> Command<S> for SlashCommandGroup<S>
where
    S: Send + Sync + 'static,
{
    fn compile(
        self: Box<Self>,
        permissions: &CommandPermissions,
    ) -> Result<(ApplicationCommand, ExecuteDescriptor<S>), CompileError> {
        let (option, descriptor) = self.compile_option()?;
        Ok((chat_command(option, permissions), descriptor))
    }
}

impl<S> CommandOptions<S> for SlashCommandGroup<S>
where
    S: Send + Sync + 'static,
{
    fn compile_option(
        self: Box<Self>,
    ) -> Result<(CommandOption, ExecuteDescriptor<S>), CompileError> {
        let SlashCommandGroup {
            name,
            description,
            sub_commands,
        } = *self;

        let mut options = Vec::with_capacity(sub_commands.len());
        let mut entries = HashMap::with_capacity(sub_commands.len());

        for sub_command in sub_commands {
            let (option, descriptor) = sub_command.compile_option()?;
            let sub_name = option.name.clone().unwrap_or_default();

            if entries.insert(sub_name.clone(), descriptor).is_some() {
                return Err(CompileError::DuplicateName(sub_name));
            }
            options.push(option);
        }

        let option = CommandOption::new(CommandOptionType::SubCommandGroup)
            .name(&name)
            .description(&description)
            .options(options);

        Ok((option, ExecuteDescriptor::group(entries)))
    }
}
