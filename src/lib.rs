pub mod arguments;
pub mod commands;
pub mod descriptor;

#[cfg(feature = "executor")]
pub mod executor;

#[cfg(feature = "argument_converters")]
pub mod argument_converters;

// Re-export macros
pub use twilight_interactor_derive::{Choices, CommandArguments};
