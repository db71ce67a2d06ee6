// module declaration
pub mod actions;
pub mod core;
pub mod events;
pub mod form;
pub mod input;
pub mod network;
pub mod services;
pub mod ui_state;
pub mod workflow;

#[cfg(test)]
mod testing;

// export App and related types
pub use self::core::{App, MessageType, Mode};
pub use events::spawn_wallet_listener;
pub use form::{CollectionField, FormField};
pub use input::{dispatch, map_key};
pub use services::Services;
pub use workflow::{Phase, Stage};

#[cfg(test)]
mod tests;
