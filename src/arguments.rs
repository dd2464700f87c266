use anyhow::{Result, anyhow};
use twilight_model::{
    application::{
        command::{
            CommandOptionChoice, CommandOptionType, CommandOptionValue as SchemaOptionValue,
        },
        interaction::{
            InteractionChannel, InteractionDataResolved, InteractionMember,
            application_command::CommandOptionValue,
        },
    },
    channel::{Attachment, ChannelType, Message},
    guild::Role,
    id::{
        Id,
        marker::{AttachmentMarker, ChannelMarker, RoleMarker, UserMarker},
    },
    user::User,
};

/// Intermediate option schema built by the `CommandArguments` derive and the
/// command compiler, converted into `twilight_model`'s wire option on
/// registration.
#[derive(Debug, Clone)]
pub struct CommandOption {
    pub autocomplete: Option<bool>,
    pub channel_types: Option<Vec<ChannelType>>,
    pub choices: Option<Vec<CommandOptionChoice>>,
    pub name: Option<String>,
    /// The declared field name before lowercasing; choice maps are keyed by it.
    pub field_name: Option<String>,
    pub description: Option<String>,
    pub kind: CommandOptionType,
    pub max_length: Option<u16>,
    pub max_value: Option<SchemaOptionValue>,
    pub min_length: Option<u16>,
    pub min_value: Option<SchemaOptionValue>,
    pub options: Option<Vec<CommandOption>>,
    pub required: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid type for command argument")]
    InvalidType,
    #[error("Option `{0}` does not match any argument field")]
    UnknownOption(String),
    #[error("Interaction is missing resolved data for a {0}")]
    Unresolved(&'static str),
}

/// Lookup view over an interaction's resolved-entity table.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLookup<'a> {
    resolved: Option<&'a InteractionDataResolved>,
}

impl<'a> ResolvedLookup<'a> {
    pub fn new(resolved: Option<&'a InteractionDataResolved>) -> Self {
        ResolvedLookup { resolved }
    }

    pub fn user(&self, id: Id<UserMarker>) -> Result<User> {
        self.resolved
            .and_then(|resolved| resolved.users.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(Error::Unresolved("user")))
    }

    pub fn member(&self, id: Id<UserMarker>) -> Result<InteractionMember> {
        self.resolved
            .and_then(|resolved| resolved.members.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(Error::Unresolved("member")))
    }

    pub fn channel(&self, id: Id<ChannelMarker>) -> Result<InteractionChannel> {
        self.resolved
            .and_then(|resolved| resolved.channels.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(Error::Unresolved("channel")))
    }

    pub fn role(&self, id: Id<RoleMarker>) -> Result<Role> {
        self.resolved
            .and_then(|resolved| resolved.roles.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(Error::Unresolved("role")))
    }

    pub fn attachment(&self, id: Id<AttachmentMarker>) -> Result<Attachment> {
        self.resolved
            .and_then(|resolved| resolved.attachments.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(Error::Unresolved("attachment")))
    }

    /// The sole resolved member of a user context-menu interaction.
    pub fn target_member(&self) -> Option<InteractionMember> {
        self.resolved
            .and_then(|resolved| resolved.members.values().next())
            .cloned()
    }

    /// The sole resolved user of a user context-menu interaction.
    pub fn target_user(&self) -> Option<User> {
        self.resolved
            .and_then(|resolved| resolved.users.values().next())
            .cloned()
    }

    /// The sole resolved message of a message context-menu interaction.
    pub fn target_message(&self) -> Option<Message> {
        self.resolved
            .and_then(|resolved| resolved.messages.values().next())
            .cloned()
    }
}

pub trait ToOption {
    fn to_option() -> CommandOption;
}

pub trait ArgumentConverter: Sized {
    fn convert(value: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self>;
}

impl<T: ArgumentConverter> ArgumentConverter for Option<T> {
    fn convert(value: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        Ok(Some(T::convert(value, resolved)?))
    }
}

impl CommandOption {
    pub fn new(kind: CommandOptionType) -> Self {
        CommandOption {
            autocomplete: None,
            channel_types: None,
            choices: None,
            name: None,
            field_name: None,
            description: None,
            kind,
            max_length: None,
            max_value: None,
            min_length: None,
            min_value: None,
            options: None,
            required: false,
        }
    }

    pub fn autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }

    pub fn channel_types(mut self, channel_types: Vec<ChannelType>) -> Self {
        self.channel_types = Some(channel_types);
        self
    }

    pub fn channel_type(mut self, channel_type: ChannelType) -> Self {
        match &mut self.channel_types {
            Some(types) => types.push(channel_type),
            None => self.channel_types = Some(vec![channel_type]),
        }
        self
    }

    pub fn choices(mut self, choices: Vec<CommandOptionChoice>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn max_length(mut self, max_length: u16) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn max_value(mut self, max_value: SchemaOptionValue) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn min_length(mut self, min_length: u16) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn min_value(mut self, min_value: SchemaOptionValue) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn field_name(mut self, field_name: &str) -> Self {
        self.field_name = Some(field_name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl<T: ToOption> ToOption for Option<T> {
    fn to_option() -> CommandOption {
        T::to_option().required(false)
    }
}

impl From<CommandOption> for twilight_model::application::command::CommandOption {
    fn from(option: CommandOption) -> Self {
        twilight_model::application::command::CommandOption {
            autocomplete: option.autocomplete,
            channel_types: option.channel_types,
            choices: option.choices,
            name: option.name.unwrap_or_default(),
            description: option.description.unwrap_or_default(),
            kind: option.kind,
            max_length: option.max_length,
            max_value: option.max_value,
            min_length: option.min_length,
            min_value: option.min_value,
            required: Some(option.required),
            description_localizations: None,
            name_localizations: None,
            options: option
                .options
                .map(|options| options.into_iter().map(Into::into).collect()),
        }
    }
}
