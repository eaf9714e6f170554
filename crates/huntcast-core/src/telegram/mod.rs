mod bot;
mod messages;
mod publisher;

pub use bot::{BotProfile, ChannelApi, TelegramBot};
pub use messages::{Labels, TELEGRAM_MESSAGE_LIMIT};
pub use publisher::{PublishReceipt, Publisher};
