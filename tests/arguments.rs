//! Schema generation and extraction tests for derived parameter sets.

mod common;

use twilight_interactor::arguments::{ArgumentConverter, Error, ResolvedLookup, ToOption};
use twilight_interactor::commands::CommandArguments;
use twilight_interactor::{Choices, CommandArguments};
use twilight_model::application::command::{CommandOptionChoiceValue, CommandOptionType};
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_model::channel::ChannelType;
use twilight_model::id::{Id, marker::ChannelMarker};
use twilight_model::user::User;

#[derive(CommandArguments, Debug, Default)]
struct EchoParams {
    #[option(description = "What to say", required = "true")]
    message: String,
    #[option(description = "Times to repeat")]
    count: i64,
    loud: bool,
}

#[test]
fn options_follow_field_declaration_order() {
    let options = EchoParams::options();

    let names: Vec<_> = options
        .iter()
        .map(|option| option.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["message", "count", "loud"]);

    let kinds: Vec<_> = options.iter().map(|option| option.kind).collect();
    assert_eq!(
        kinds,
        [
            CommandOptionType::String,
            CommandOptionType::Integer,
            CommandOptionType::Boolean,
        ]
    );
}

#[test]
fn descriptions_come_from_attributes_with_a_default() {
    let options = EchoParams::options();

    assert_eq!(options[0].description.as_deref(), Some("What to say"));
    assert_eq!(
        options[2].description.as_deref(),
        Some("No description provided")
    );
}

#[allow(non_snake_case)]
#[derive(CommandArguments, Default)]
struct CaseParams {
    Reason: String,
}

#[test]
fn option_names_are_lowercased_field_names() {
    let options = CaseParams::options();

    assert_eq!(options[0].name.as_deref(), Some("reason"));
    assert_eq!(options[0].field_name.as_deref(), Some("Reason"));
}

#[derive(CommandArguments, Default)]
struct StrictParams {
    #[option(required = "true")]
    a: String,
    #[option(required = "yes")]
    b: String,
    c: String,
}

#[test]
fn required_is_only_set_by_the_literal_true() {
    let required: Vec<_> = StrictParams::options()
        .iter()
        .map(|option| option.required)
        .collect();
    assert_eq!(required, [true, false, false]);
}

#[test]
fn extraction_populates_fields_by_option_name() {
    let options = vec![
        common::option("message", CommandOptionValue::String("hi".to_string())),
        common::option("count", CommandOptionValue::Integer(3)),
    ];
    let lookup = ResolvedLookup::new(None);

    let params = EchoParams::from_options(&options, &lookup).unwrap();
    assert_eq!(params.message, "hi");
    assert_eq!(params.count, 3);
    assert!(!params.loud);
}

#[test]
fn extraction_ignores_option_order() {
    let options = vec![
        common::option("count", CommandOptionValue::Integer(2)),
        common::option("loud", CommandOptionValue::Boolean(true)),
        common::option("message", CommandOptionValue::String("hey".to_string())),
    ];
    let lookup = ResolvedLookup::new(None);

    let params = EchoParams::from_options(&options, &lookup).unwrap();
    assert_eq!(params.message, "hey");
    assert_eq!(params.count, 2);
    assert!(params.loud);
}

#[test]
fn unknown_options_are_rejected() {
    let options = vec![common::option("bogus", CommandOptionValue::Boolean(true))];
    let lookup = ResolvedLookup::new(None);

    let error = EchoParams::from_options(&options, &lookup).unwrap_err();
    match error.downcast_ref::<Error>() {
        Some(Error::UnknownOption(name)) => assert_eq!(name, "bogus"),
        other => panic!("expected UnknownOption, got {:?}", other),
    }
}

#[test]
fn mismatched_value_kinds_are_rejected() {
    let options = vec![common::option(
        "count",
        CommandOptionValue::String("three".to_string()),
    )];
    let lookup = ResolvedLookup::new(None);

    let error = EchoParams::from_options(&options, &lookup).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::InvalidType)
    ));
}

#[derive(CommandArguments, Debug, Default)]
struct RetryParams {
    #[option(description = "Times to retry")]
    attempts: u8,
}

#[test]
fn narrow_integer_fields_reject_out_of_range_values() {
    let lookup = ResolvedLookup::new(None);

    let options = vec![common::option("attempts", CommandOptionValue::Integer(3))];
    let params = RetryParams::from_options(&options, &lookup).unwrap();
    assert_eq!(params.attempts, 3);

    let options = vec![common::option("attempts", CommandOptionValue::Integer(300))];
    let error = RetryParams::from_options(&options, &lookup).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::InvalidType)
    ));

    let options = vec![common::option("attempts", CommandOptionValue::Integer(-1))];
    assert!(RetryParams::from_options(&options, &lookup).is_err());
}

#[derive(CommandArguments, Debug, Default)]
struct TargetParams {
    target: Option<User>,
}

#[test]
fn entity_fields_resolve_through_the_interaction_table() {
    let resolved = common::resolved_user(common::user(7));
    let lookup = ResolvedLookup::new(Some(&resolved));
    let options = vec![common::option("target", CommandOptionValue::User(Id::new(7)))];

    let params = TargetParams::from_options(&options, &lookup).unwrap();
    assert_eq!(params.target.unwrap().id, Id::new(7));
}

#[test]
fn entity_fields_error_when_the_table_has_no_entry() {
    let lookup = ResolvedLookup::new(None);
    let options = vec![common::option("target", CommandOptionValue::User(Id::new(7)))];

    let error = TargetParams::from_options(&options, &lookup).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::Unresolved("user"))
    ));
}

#[test]
fn optional_entity_options_are_not_required() {
    let options = TargetParams::options();

    assert_eq!(options[0].kind, CommandOptionType::User);
    assert!(!options[0].required);
}

#[derive(Choices, Debug, Default, PartialEq)]
enum Level {
    #[default]
    Info,
    #[choice(name = "Really loud", value = "loud")]
    Loud,
}

#[derive(CommandArguments, Default)]
struct LogParams {
    level: Level,
}

#[test]
fn choice_enums_compile_to_string_options_with_choices() {
    let option = Level::to_option();

    assert_eq!(option.kind, CommandOptionType::String);
    let choices = option.choices.unwrap();
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[0].name, "Info");
    assert_eq!(choices[1].name, "Really loud");
    assert_eq!(
        choices[1].value,
        CommandOptionChoiceValue::String("loud".to_string())
    );
}

#[test]
fn choice_enums_convert_from_their_declared_values() {
    let lookup = ResolvedLookup::new(None);

    let level = Level::convert(
        &CommandOptionValue::String("loud".to_string()),
        &lookup,
    )
    .unwrap();
    assert_eq!(level, Level::Loud);

    let error = Level::convert(
        &CommandOptionValue::String("silent".to_string()),
        &lookup,
    )
    .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::InvalidType)
    ));
}

#[test]
fn choice_enum_fields_extract_like_any_option() {
    let options = vec![common::option(
        "level",
        CommandOptionValue::String("Info".to_string()),
    )];
    let lookup = ResolvedLookup::new(None);

    let params = LogParams::from_options(&options, &lookup).unwrap();
    assert_eq!(params.level, Level::Info);
}

#[derive(CommandArguments, Default)]
struct MoveParams {
    #[option(description = "Where to move the conversation", channel_types(GuildText, GuildVoice))]
    destination: Option<Id<ChannelMarker>>,
}

#[test]
fn channel_fields_carry_their_type_restrictions() {
    let options = MoveParams::options();

    assert_eq!(options[0].kind, CommandOptionType::Channel);
    assert_eq!(
        options[0].channel_types,
        Some(vec![ChannelType::GuildText, ChannelType::GuildVoice])
    );
}

#[derive(CommandArguments, Default)]
struct NoParams;

#[test]
fn option_less_parameter_sets_compile_to_nothing() {
    assert!(NoParams::options().is_empty());

    let lookup = ResolvedLookup::new(None);
    assert!(NoParams::from_options(&[], &lookup).is_ok());
}
