//! Shared fixtures for building interaction payloads.
//!
//! Entities are deserialized from minimal platform-shaped JSON so the
//! fixtures track the wire format rather than struct internals.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use twilight_interactor::commands::CommandResponse;
use twilight_model::{
    application::{
        command::CommandType,
        interaction::{
            Interaction, InteractionData, InteractionDataResolved, InteractionMember,
            application_command::{CommandData, CommandDataOption, CommandOptionValue},
        },
    },
    channel::Message,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::Id,
    user::User,
};

/// An application command interaction carrying the given command data.
pub fn interaction(data: CommandData) -> Arc<Interaction> {
    let mut interaction = bare_interaction();
    interaction.data = Some(InteractionData::ApplicationCommand(Box::new(data)));
    Arc::new(interaction)
}

/// An interaction with no command data attached.
///
/// The wire format never omits `data` for command interactions, so the
/// payload carries a placeholder that is stripped after deserializing.
pub fn bare_interaction() -> Interaction {
    let mut interaction: Interaction = serde_json::from_value(json!({
        "application_id": "1",
        "authorizing_integration_owners": {},
        "data": { "id": "10", "name": "placeholder", "type": 1 },
        "entitlements": [],
        "id": "2",
        "token": "interaction-token",
        "type": 2,
        "version": 1
    }))
    .expect("interaction fixture");
    interaction.data = None;
    interaction
}

pub fn command_data(
    name: &str,
    kind: CommandType,
    options: Vec<CommandDataOption>,
    resolved: Option<InteractionDataResolved>,
) -> CommandData {
    CommandData {
        guild_id: None,
        id: Id::new(10),
        name: name.to_string(),
        kind,
        options,
        resolved,
        target_id: None,
    }
}

pub fn option(name: &str, value: CommandOptionValue) -> CommandDataOption {
    CommandDataOption {
        name: name.to_string(),
        value,
    }
}

pub fn sub_command(name: &str, options: Vec<CommandDataOption>) -> CommandDataOption {
    option(name, CommandOptionValue::SubCommand(options))
}

pub fn sub_command_group(name: &str, options: Vec<CommandDataOption>) -> CommandDataOption {
    option(name, CommandOptionValue::SubCommandGroup(options))
}

pub fn empty_resolved() -> InteractionDataResolved {
    InteractionDataResolved {
        attachments: HashMap::new(),
        channels: HashMap::new(),
        members: HashMap::new(),
        messages: HashMap::new(),
        roles: HashMap::new(),
        users: HashMap::new(),
    }
}

pub fn resolved_user(user: User) -> InteractionDataResolved {
    let mut resolved = empty_resolved();
    resolved.users.insert(user.id, user);
    resolved
}

pub fn resolved_member(id: u64, member: InteractionMember) -> InteractionDataResolved {
    let mut resolved = empty_resolved();
    resolved.members.insert(Id::new(id), member);
    resolved
}

pub fn resolved_message(message: Message) -> InteractionDataResolved {
    let mut resolved = empty_resolved();
    resolved.messages.insert(message.id, message);
    resolved
}

fn user_json(id: u64) -> serde_json::Value {
    json!({
        "accent_color": null,
        "avatar": null,
        "banner": null,
        "bot": false,
        "discriminator": "0001",
        "global_name": null,
        "id": id.to_string(),
        "public_flags": 0,
        "username": "tester"
    })
}

pub fn user(id: u64) -> User {
    serde_json::from_value(user_json(id)).expect("user fixture")
}

pub fn member() -> InteractionMember {
    serde_json::from_value(json!({
        "avatar": null,
        "communication_disabled_until": null,
        "flags": 0,
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "nick": null,
        "pending": false,
        "permissions": "0",
        "premium_since": null,
        "roles": []
    }))
    .expect("member fixture")
}

pub fn message(id: u64) -> Message {
    serde_json::from_value(json!({
        "attachments": [],
        "author": user_json(900),
        "channel_id": "3",
        "components": [],
        "content": "hello",
        "edited_timestamp": null,
        "embeds": [],
        "flags": 0,
        "id": id.to_string(),
        "mention_everyone": false,
        "mention_roles": [],
        "mentions": [],
        "pinned": false,
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "tts": false,
        "type": 0
    }))
    .expect("message fixture")
}

/// A throwaway success response for handlers that only need to acknowledge.
pub fn ack() -> CommandResponse {
    Ok(InteractionResponse {
        kind: InteractionResponseType::Pong,
        data: None,
    })
}
