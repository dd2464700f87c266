use proc_macro::TokenStream;

mod arguments;
mod choices;

#[proc_macro_derive(CommandArguments, attributes(option))]
pub fn command_arguments_derive(input: TokenStream) -> TokenStream {
    arguments::derive(input)
}

#[proc_macro_derive(Choices, attributes(choice))]
pub fn enum_choices_derive(input: TokenStream) -> TokenStream {
    choices::derive(input)
}
