pub mod discord;
pub mod format;
pub mod types;

pub use discord::DiscordNotifier;
pub use types::{Notifier, NotifyError};
