/*!
Enumerated parameter values.

  WebhookEvent  (--event, create_webhook)
  EmoticonType  (--type,  emoticons)

Both are parsed through `clap::ValueEnum` so the list of accepted values
lives in one place and can be quoted back in error messages. Matching is
exact: the value sent to HipChat is the value given on the command line.
*/

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Room event a webhook can subscribe to.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    RoomMessage,
    RoomNotification,
    RoomExit,
    RoomEnter,
    RoomTopicChange,
}

/// Emoticon listing scope.
#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[value(rename_all = "lower")]
pub enum EmoticonType {
    Global,
    Group,
    All,
}

impl WebhookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEvent::RoomMessage => "room_message",
            WebhookEvent::RoomNotification => "room_notification",
            WebhookEvent::RoomExit => "room_exit",
            WebhookEvent::RoomEnter => "room_enter",
            WebhookEvent::RoomTopicChange => "room_topic_change",
        }
    }
}

impl EmoticonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmoticonType::Global => "global",
            EmoticonType::Group => "group",
            EmoticonType::All => "all",
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EmoticonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `raw` into one of `T`'s variants (exact, case-sensitive match).
/// On failure returns the comma-separated list of valid names.
pub fn parse_choice<T: ValueEnum>(raw: &str) -> Result<T, String> {
    <T as ValueEnum>::from_str(raw, false).map_err(|_| choice_list::<T>())
}

/// Comma-separated list of the accepted names of `T`.
pub fn choice_list<T: ValueEnum>() -> String {
    T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|p| p.get_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/* --------------------------------- Tests ---------------------------------- */
