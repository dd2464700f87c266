use anyhow::{Result, anyhow};
use twilight_model::{
    application::{
        command::CommandOptionType,
        interaction::{InteractionChannel, InteractionMember},
    },
    channel::Attachment,
    guild::Role,
    id::{
        Id,
        marker::{AttachmentMarker, ChannelMarker, GenericMarker, RoleMarker, UserMarker},
    },
    user::User,
};

use crate::arguments::{ArgumentConverter, CommandOption, Error, ResolvedLookup, ToOption};

use twilight_model::application::interaction::application_command::CommandOptionValue;

impl ArgumentConverter for String {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::String(value) = data {
            Ok(value.clone())
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for String {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::String)
    }
}

// --- Numeric Types ---
// Integer options arrive as i64; a value outside the field's range is a
// coercion failure.
macro_rules! integer_converter {
    ($ty:ty) => {
        impl ArgumentConverter for $ty {
            fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
                if let CommandOptionValue::Integer(value) = data {
                    <$ty>::try_from(*value).map_err(|_| anyhow!(Error::InvalidType))
                } else {
                    Err(anyhow!(Error::InvalidType))
                }
            }
        }

        impl ToOption for $ty {
            fn to_option() -> CommandOption {
                CommandOption::new(CommandOptionType::Integer)
            }
        }
    };
}

macro_rules! float_converter {
    ($ty:ty) => {
        impl ArgumentConverter for $ty {
            fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
                if let CommandOptionValue::Number(value) = data {
                    Ok(*value as $ty)
                } else {
                    Err(anyhow!(Error::InvalidType))
                }
            }
        }

        impl ToOption for $ty {
            fn to_option() -> CommandOption {
                CommandOption::new(CommandOptionType::Number)
            }
        }
    };
}

// Signed types
integer_converter!(i8);
integer_converter!(i16);
integer_converter!(i32);
integer_converter!(i64);
integer_converter!(i128);
integer_converter!(isize);

// Unsigned types
integer_converter!(u8);
integer_converter!(u16);
integer_converter!(u32);
integer_converter!(u64);
integer_converter!(u128);
integer_converter!(usize);

// Floating point types
float_converter!(f32);
float_converter!(f64);

// --- Boolean Type ---
impl ArgumentConverter for bool {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Boolean(v) = data {
            Ok(*v)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for bool {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Boolean)
    }
}

// --- Char Type ---
impl ArgumentConverter for char {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::String(value) = data {
            let mut chars = value.chars();
            Ok(chars.next().ok_or_else(|| anyhow!(Error::InvalidType))?)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}
impl ToOption for char {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::String).max_length(1)
    }
}

// --- User ID Type ---
impl ArgumentConverter for Id<UserMarker> {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::User(user) = data {
            Ok(*user)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Id<UserMarker> {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::User)
    }
}

// --- Role ID Type ---
impl ArgumentConverter for Id<RoleMarker> {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Role(role) = data {
            Ok(*role)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Id<RoleMarker> {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Role)
    }
}

impl ArgumentConverter for Id<ChannelMarker> {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Channel(channel) = data {
            Ok(*channel)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Id<ChannelMarker> {
    fn to_option() -> CommandOption {
        // NOTE: Channel types are filtered as a part of the `CommandArguments` derive macro
        CommandOption::new(CommandOptionType::Channel)
    }
}

impl ArgumentConverter for Id<GenericMarker> {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Mentionable(mentionable) = data {
            Ok(*mentionable)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Id<GenericMarker> {
    fn to_option() -> CommandOption {
        // NOTE: Mentionable can be either a user or a role
        CommandOption::new(CommandOptionType::Mentionable)
    }
}

impl ArgumentConverter for Id<AttachmentMarker> {
    fn convert(data: &CommandOptionValue, _resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Attachment(attachment) = data {
            Ok(*attachment)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Id<AttachmentMarker> {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Attachment)
    }
}

// --- Resolved Entity Types ---
impl ArgumentConverter for User {
    fn convert(data: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::User(user) = data {
            resolved.user(*user)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for User {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::User)
    }
}

impl ArgumentConverter for InteractionMember {
    fn convert(data: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::User(user) = data {
            resolved.member(*user)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for InteractionMember {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::User)
    }
}

impl ArgumentConverter for InteractionChannel {
    fn convert(data: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Channel(channel) = data {
            resolved.channel(*channel)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for InteractionChannel {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Channel)
    }
}

impl ArgumentConverter for Role {
    fn convert(data: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Role(role) = data {
            resolved.role(*role)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Role {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Role)
    }
}

impl ArgumentConverter for Attachment {
    fn convert(data: &CommandOptionValue, resolved: &ResolvedLookup<'_>) -> Result<Self> {
        if let CommandOptionValue::Attachment(attachment) = data {
            resolved.attachment(*attachment)
        } else {
            Err(anyhow!(Error::InvalidType))
        }
    }
}

impl ToOption for Attachment {
    fn to_option() -> CommandOption {
        CommandOption::new(CommandOptionType::Attachment)
    }
}
