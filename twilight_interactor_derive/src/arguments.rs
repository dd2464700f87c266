use darling::ast::Data;
use darling::util::PathList;
use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{GenericArgument, Ident, PathArguments, Type, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named, struct_unit))]
struct ArgumentsReceiver {
    ident: Ident,
    data: Data<(), OptionReceiver>,
}

#[derive(Debug, FromField)]
#[darling(attributes(option))]
struct OptionReceiver {
    ident: Option<Ident>,
    ty: Type,
    /// Set the description of the command option
    #[darling(default)]
    description: Option<String>,
    /// Mark the option as required; only the literal "true" counts
    #[darling(default)]
    required: Option<String>,
    /// For channel options, restrict to specific channel types
    #[darling(default)]
    channel_types: Option<PathList>,
}

/// One field compiled to its option schema and its extraction match arm.
struct CompiledField {
    schema: proc_macro2::TokenStream,
    arm: proc_macro2::TokenStream,
}

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    let receiver = match ArgumentsReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(error) => return error.write_errors().into(),
    };

    let fields = receiver
        .data
        .take_struct()
        .expect("darling rejects non-struct inputs")
        .fields;

    let compiled: darling::Result<Vec<CompiledField>> = fields.iter().map(compile_field).collect();
    let compiled = match compiled {
        Ok(compiled) => compiled,
        Err(error) => return error.write_errors().into(),
    };

    let schemas = compiled.iter().map(|field| &field.schema);
    let arms = compiled.iter().map(|field| &field.arm);

    let from_options = if compiled.is_empty() {
        quote! {
            fn from_options(
                _options: &[::twilight_model::application::interaction::application_command::CommandDataOption],
                _resolved: &::twilight_interactor::arguments::ResolvedLookup<'_>,
            ) -> ::anyhow::Result<Self> {
                Ok(<Self as ::core::default::Default>::default())
            }
        }
    } else {
        quote! {
            fn from_options(
                options: &[::twilight_model::application::interaction::application_command::CommandDataOption],
                resolved: &::twilight_interactor::arguments::ResolvedLookup<'_>,
            ) -> ::anyhow::Result<Self> {
                let mut arguments = <Self as ::core::default::Default>::default();

                for option in options {
                    match option.name.as_str() {
                        #(#arms)*
                        unknown => {
                            return Err(::anyhow::anyhow!(
                                ::twilight_interactor::arguments::Error::UnknownOption(
                                    unknown.to_string(),
                                )
                            ));
                        }
                    }
                }

                Ok(arguments)
            }
        }
    };

    let ident = receiver.ident;
    quote! {
        #[automatically_derived]
        impl ::twilight_interactor::commands::CommandArguments for #ident {
            fn options() -> Vec<::twilight_interactor::arguments::CommandOption> {
                vec![
                    #(#schemas),*
                ]
            }

            #from_options
        }
    }
    .into()
}

fn compile_field(field: &OptionReceiver) -> darling::Result<CompiledField> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| darling::Error::custom("option fields must be named"))?;
    let declared = ident.to_string().trim_start_matches("r#").to_string();
    let name = declared.to_lowercase();

    let description = field
        .description
        .clone()
        .unwrap_or_else(|| "No description provided".to_string());
    let required = matches!(field.required.as_deref(), Some("true"));

    let ty = &field.ty;
    let channel_types = match &field.channel_types {
        Some(_) if !is_channel_field(ty) => {
            return Err(darling::Error::custom(
                "channel_types can only be specified for channel option fields",
            )
            .with_span(ty));
        }
        Some(types) => {
            let paths = types
                .iter()
                .map(|path| quote! { ::twilight_model::channel::ChannelType::#path });
            Some(quote! { .channel_types(vec![#(#paths),*]) })
        }
        None => None,
    };

    let schema = quote! {
        <#ty as ::twilight_interactor::arguments::ToOption>::to_option()
            .name(#name)
            .field_name(#declared)
            .description(#description)
            .required(#required)
            #channel_types
    };
    let arm = quote! {
        #name => {
            arguments.#ident = ::twilight_interactor::arguments::ArgumentConverter::convert(
                &option.value,
                resolved,
            )?;
        }
    };

    Ok(CompiledField { schema, arm })
}

/// Whether a field type can carry a channel type restriction, looking through
/// an `Option` wrapper.
fn is_channel_field(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return false;
    };

    if segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return is_channel_field(inner);
    }

    if segment.ident == "InteractionChannel" {
        return true;
    }

    if segment.ident == "Id"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(Type::Path(inner_path))) = args.args.first()
        && let Some(inner_segment) = inner_path.path.segments.last()
    {
        return inner_segment.ident == "ChannelMarker";
    }

    false
}
