use std::collections::HashSet;

use darling::ast::Data;
use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Ident, parse_macro_input};

#[derive(FromDeriveInput)]
#[darling(attributes(choice), supports(enum_unit))]
struct ChoicesReceiver {
    ident: Ident,
    data: Data<ChoiceVariant, ()>,
}

#[derive(FromVariant)]
#[darling(attributes(choice))]
struct ChoiceVariant {
    ident: Ident,
    /// Override the display name shown in the client
    #[darling(default)]
    name: Option<String>,
    /// Override the wire value sent with the interaction
    #[darling(default)]
    value: Option<String>,
}

impl ChoiceVariant {
    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.ident.to_string())
    }

    fn wire_value(&self) -> String {
        self.value.clone().unwrap_or_else(|| self.ident.to_string())
    }
}

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    let receiver = match ChoicesReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(error) => return error.write_errors().into(),
    };

    let variants = receiver
        .data
        .take_enum()
        .expect("darling rejects non-enum inputs");

    // The platform caps choice lists at 25 entries
    if variants.len() > 25 {
        return darling::Error::custom("choice enums are limited to 25 variants")
            .write_errors()
            .into();
    }

    let mut seen = HashSet::new();
    for variant in &variants {
        let value = variant.wire_value();
        if !seen.insert(value.clone()) {
            return darling::Error::custom(format!("duplicate choice value `{}`", value))
                .with_span(&variant.ident)
                .write_errors()
                .into();
        }
    }

    let choices = variants.iter().map(|variant| {
        let name = variant.display_name();
        let value = variant.wire_value();
        quote! {
            ::twilight_model::application::command::CommandOptionChoice {
                name: #name.to_string(),
                name_localizations: None,
                value: ::twilight_model::application::command::CommandOptionChoiceValue::String(
                    #value.to_string(),
                ),
            }
        }
    });

    let arms = variants.iter().map(|variant| {
        let ident = &variant.ident;
        let value = variant.wire_value();
        quote! {
            #value => Ok(Self::#ident),
        }
    });

    let ident = receiver.ident;
    quote! {
        #[automatically_derived]
        impl ::twilight_interactor::arguments::ToOption for #ident {
            fn to_option() -> ::twilight_interactor::arguments::CommandOption {
                ::twilight_interactor::arguments::CommandOption::new(
                    ::twilight_model::application::command::CommandOptionType::String,
                )
                .choices(vec![
                    #(#choices),*
                ])
            }
        }

        #[automatically_derived]
        impl ::twilight_interactor::arguments::ArgumentConverter for #ident {
            fn convert(
                data: &::twilight_model::application::interaction::application_command::CommandOptionValue,
                _resolved: &::twilight_interactor::arguments::ResolvedLookup<'_>,
            ) -> ::anyhow::Result<Self> {
                let ::twilight_model::application::interaction::application_command::CommandOptionValue::String(value) = data else {
                    return Err(::anyhow::anyhow!(
                        ::twilight_interactor::arguments::Error::InvalidType
                    ));
                };

                match value.as_str() {
                    #(#arms)*
                    _ => Err(::anyhow::anyhow!(
                        ::twilight_interactor::arguments::Error::InvalidType
                    )),
                }
            }
        }
    }
    .into()
}
