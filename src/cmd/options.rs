/*!
options.rs - the option table for one invocation.

  OperationFlags : one boolean flag per operation, exactly one allowed
                   (enforced by a required, non-multiple clap group)
  Options        : shared parameter flags, all optional strings; the
                   selected operation decides which of them it needs

Helpers:
  - coerce_bool(raw)        boolean-ish string -> bool
  - Options::color()        --color, falling back to --colour
  - Options::require(..)    present & non-empty, else UsageError::MissingOption
*/

use clap::Args;

use crate::cmd::operation::OperationKind;
use crate::error::UsageError;

/* ---- Operation Flags ---- */

#[derive(Args, Debug, Default, Clone)]
#[group(id = "operation", required = true, multiple = false)]
pub struct OperationFlags {
    /// Show the server's capabilities document
    #[arg(long = "capabilities", help_heading = "Operations")]
    pub capabilities: bool,
    /// List rooms
    #[arg(long = "rooms", help_heading = "Operations")]
    pub rooms: bool,
    /// Show one room (--room)
    #[arg(long = "get_room", help_heading = "Operations")]
    pub get_room: bool,
    /// Create a room (--room [--topic --privacy --is_guest_accessible --owner_id])
    #[arg(long = "create_room", help_heading = "Operations")]
    pub create_room: bool,
    /// Update a room (--room --topic --privacy --is_archived --is_guest_accessible --owner_id)
    #[arg(long = "update_room", help_heading = "Operations")]
    pub update_room: bool,
    /// Delete a room (--room)
    #[arg(long = "delete_room", help_heading = "Operations")]
    pub delete_room: bool,
    /// Print whether a room exists (--room)
    #[arg(long = "room_exists", help_heading = "Operations")]
    pub room_exists: bool,
    /// Room history (--room)
    #[arg(long = "history", help_heading = "Operations")]
    pub history: bool,
    /// Latest room history (--room)
    #[arg(long = "recent_history", help_heading = "Operations")]
    pub recent_history: bool,
    /// Room statistics (--room)
    #[arg(long = "room_statistics", help_heading = "Operations")]
    pub room_statistics: bool,
    /// Room members (--room)
    #[arg(long = "room_members", help_heading = "Operations")]
    pub room_members: bool,
    /// Room participants (--room)
    #[arg(long = "room_participants", help_heading = "Operations")]
    pub room_participants: bool,
    /// Send a room notification (--room --msg [--color --notify --msg_format])
    #[arg(long = "notify_room", help_heading = "Operations")]
    pub notify_room: bool,
    /// Send a message to a room as the token's user (--room --msg)
    #[arg(long = "send_message", help_heading = "Operations")]
    pub send_message: bool,
    /// Set a room's topic (--room --topic)
    #[arg(long = "set_topic", help_heading = "Operations")]
    pub set_topic: bool,
    /// Share a file with a room (--room --file [--msg])
    #[arg(long = "share_file", help_heading = "Operations")]
    pub share_file: bool,
    /// List a room's webhooks (--room)
    #[arg(long = "webhooks", help_heading = "Operations")]
    pub webhooks: bool,
    /// Show one webhook (--room --hook)
    #[arg(long = "get_webhook", help_heading = "Operations")]
    pub get_webhook: bool,
    /// Create a webhook (--room --url --event [--pattern --name])
    #[arg(long = "create_webhook", help_heading = "Operations")]
    pub create_webhook: bool,
    /// Delete a webhook (--room --hook)
    #[arg(long = "delete_webhook", help_heading = "Operations")]
    pub delete_webhook: bool,
    /// List users
    #[arg(long = "users", help_heading = "Operations")]
    pub users: bool,
    /// Show one user (--user)
    #[arg(long = "get_user", help_heading = "Operations")]
    pub get_user: bool,
    /// Send a private message (--user --msg [--notify --msg_format])
    #[arg(long = "private_message", help_heading = "Operations")]
    pub private_message: bool,
    /// Latest private chat history with a user (--user)
    #[arg(long = "private_history", help_heading = "Operations")]
    pub private_history: bool,
    /// List emoticons ([--type])
    #[arg(long = "emoticons", help_heading = "Operations")]
    pub emoticons: bool,
    /// Show one emoticon (--emoticon)
    #[arg(long = "get_emoticon", help_heading = "Operations")]
    pub get_emoticon: bool,
}

impl OperationFlags {
    /// The single selected operation, or `None` when no flag is set.
    /// When parsed through clap the group guarantees exactly one.
    pub fn selected(&self) -> Option<OperationKind> {
        let table = [
            (self.capabilities, OperationKind::Capabilities),
            (self.rooms, OperationKind::Rooms),
            (self.get_room, OperationKind::GetRoom),
            (self.create_room, OperationKind::CreateRoom),
            (self.update_room, OperationKind::UpdateRoom),
            (self.delete_room, OperationKind::DeleteRoom),
            (self.room_exists, OperationKind::RoomExists),
            (self.history, OperationKind::History),
            (self.recent_history, OperationKind::RecentHistory),
            (self.room_statistics, OperationKind::RoomStatistics),
            (self.room_members, OperationKind::RoomMembers),
            (self.room_participants, OperationKind::RoomParticipants),
            (self.notify_room, OperationKind::NotifyRoom),
            (self.send_message, OperationKind::SendMessage),
            (self.set_topic, OperationKind::SetTopic),
            (self.share_file, OperationKind::ShareFile),
            (self.webhooks, OperationKind::Webhooks),
            (self.get_webhook, OperationKind::GetWebhook),
            (self.create_webhook, OperationKind::CreateWebhook),
            (self.delete_webhook, OperationKind::DeleteWebhook),
            (self.users, OperationKind::Users),
            (self.get_user, OperationKind::GetUser),
            (self.private_message, OperationKind::PrivateMessage),
            (self.private_history, OperationKind::PrivateHistory),
            (self.emoticons, OperationKind::Emoticons),
            (self.get_emoticon, OperationKind::GetEmoticon),
        ];
        let mut chosen = table.iter().filter(|(set, _)| *set).map(|(_, k)| *k);
        match (chosen.next(), chosen.next()) {
            (Some(kind), None) => Some(kind),
            _ => None,
        }
    }
}

/* ---- Parameter Flags ---- */

#[derive(Args, Debug, Default, Clone)]
pub struct Options {
    /// Room id or name
    #[arg(long, value_name = "ROOM")]
    pub room: Option<String>,

    /// Room topic
    #[arg(long, value_name = "TOPIC", allow_hyphen_values = true)]
    pub topic: Option<String>,

    /// Room privacy (public|private)
    #[arg(long, value_name = "PRIVACY")]
    pub privacy: Option<String>,

    /// Whether the room is archived (0/false/no = false)
    #[arg(
        long = "is_archived",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub is_archived: Option<String>,

    /// Whether guests may join the room (0/false/no = false)
    #[arg(
        long = "is_guest_accessible",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub is_guest_accessible: Option<String>,

    /// Room owner's user id
    #[arg(long = "owner_id", value_name = "ID")]
    pub owner_id: Option<String>,

    /// Message text
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub msg: Option<String>,

    /// Whether the message should trigger a user notification
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub notify: Option<String>,

    /// Notification background color (yellow|green|red|purple|gray|random)
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Alias for --color
    #[arg(long, value_name = "COLOR")]
    pub colour: Option<String>,

    /// Message format (html|text)
    #[arg(long = "msg_format", value_name = "FORMAT")]
    pub msg_format: Option<String>,

    /// Webhook id
    #[arg(long, value_name = "ID")]
    pub hook: Option<String>,

    /// Webhook target URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Webhook message pattern (regular expression)
    #[arg(long, value_name = "REGEX", allow_hyphen_values = true)]
    pub pattern: Option<String>,

    /// Webhook event
    #[arg(long, value_name = "EVENT")]
    pub event: Option<String>,

    /// Webhook name
    #[arg(long, value_name = "NAME", allow_hyphen_values = true)]
    pub name: Option<String>,

    /// User id, email or @mention name
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Emoticon scope (global|group|all)
    #[arg(long = "type", value_name = "TYPE")]
    pub emoticon_type: Option<String>,

    /// Emoticon id or shortcut
    #[arg(long, value_name = "EMOTICON")]
    pub emoticon: Option<String>,

    /// Path of the file to share
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
}

impl Options {
    /// Value of a required option. Absent and empty are both missing.
    pub fn require(
        value: &Option<String>,
        operation: OperationKind,
        option: &'static str,
    ) -> Result<String, UsageError> {
        match value.as_deref() {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(UsageError::MissingOption {
                operation: operation.flag(),
                option,
            }),
        }
    }

    /// Value of an optional option; empty counts as absent.
    pub fn optional(value: &Option<String>) -> Option<String> {
        value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// `--color`, or `--colour` when `--color` is absent.
    pub fn color(&self) -> Option<String> {
        Self::optional(&self.color).or_else(|| Self::optional(&self.colour))
    }
}

/// Collapse a boolean-ish string. Absent, empty, `0`, `false`, `no`, `off`
/// and `n` (any case) are false; everything else is true.
pub fn coerce_bool(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    let l = raw.trim().to_ascii_lowercase();
    !matches!(l.as_str(), "" | "0" | "false" | "no" | "off" | "n")
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_bool_falsy_values() {
        assert!(!coerce_bool(None));
        assert!(!coerce_bool(Some("")));
        assert!(!coerce_bool(Some("0")));
        assert!(!coerce_bool(Some("False")));
        assert!(!coerce_bool(Some("no")));
    }

    #[test]
    fn coerce_bool_truthy_values() {
        assert!(coerce_bool(Some("1")));
        assert!(coerce_bool(Some("true")));
        assert!(coerce_bool(Some("yes")));
        assert!(coerce_bool(Some("anything")));
    }

    #[test]
    fn colour_is_fallback_for_color() {
        let mut opts = Options {
            colour: Some("red".into()),
            ..Default::default()
        };
        assert_eq!(opts.color().as_deref(), Some("red"));

        opts.color = Some("green".into());
        assert_eq!(opts.color().as_deref(), Some("green"), "--color wins");

        opts.color = Some(String::new());
        assert_eq!(opts.color().as_deref(), Some("red"), "empty --color ignored");
    }

    #[test]
    fn require_treats_empty_as_missing() {
        let err = Options::require(&Some(String::new()), OperationKind::GetRoom, "room")
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required option --room for --get_room");
        assert_eq!(
            Options::require(&Some("ops".into()), OperationKind::GetRoom, "room").unwrap(),
            "ops"
        );
    }

    #[test]
    fn selected_requires_exactly_one() {
        let mut flags = OperationFlags::default();
        assert_eq!(flags.selected(), None);
        flags.rooms = true;
        assert_eq!(flags.selected(), Some(OperationKind::Rooms));
        flags.users = true;
        assert_eq!(flags.selected(), None);
    }
}
