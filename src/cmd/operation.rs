/*!
operation.rs - the closed set of operations.

  OperationKind : which flag was selected, its flag name and its required
                  parameters
  Operation     : validated, typed parameters of the selected operation
  request bodies: serde structs matching the HipChat v2 JSON shapes

Flow:
  OperationKind + &Options --from_options--> Operation --to_request--> ApiRequest

Everything here runs before any network activity.
*/

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

use crate::client::{ApiRequest, FileUpload};
use crate::cmd::choices::{EmoticonType, WebhookEvent, choice_list, parse_choice};
use crate::cmd::options::{Options, coerce_bool};
use crate::error::UsageError;

/* -------------------------------------------------------------------------- */
/* OperationKind                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OperationKind {
    Capabilities,
    Rooms,
    GetRoom,
    CreateRoom,
    UpdateRoom,
    DeleteRoom,
    RoomExists,
    History,
    RecentHistory,
    RoomStatistics,
    RoomMembers,
    RoomParticipants,
    NotifyRoom,
    SendMessage,
    SetTopic,
    ShareFile,
    Webhooks,
    GetWebhook,
    CreateWebhook,
    DeleteWebhook,
    Users,
    GetUser,
    PrivateMessage,
    PrivateHistory,
    Emoticons,
    GetEmoticon,
}

impl OperationKind {
    #[cfg(test)]
    pub const fn all() -> &'static [OperationKind] {
        use OperationKind::*;
        &[
            Capabilities,
            Rooms,
            GetRoom,
            CreateRoom,
            UpdateRoom,
            DeleteRoom,
            RoomExists,
            History,
            RecentHistory,
            RoomStatistics,
            RoomMembers,
            RoomParticipants,
            NotifyRoom,
            SendMessage,
            SetTopic,
            ShareFile,
            Webhooks,
            GetWebhook,
            CreateWebhook,
            DeleteWebhook,
            Users,
            GetUser,
            PrivateMessage,
            PrivateHistory,
            Emoticons,
            GetEmoticon,
        ]
    }

    /// Command-line flag name (without the leading `--`).
    pub const fn flag(&self) -> &'static str {
        match self {
            OperationKind::Capabilities => "capabilities",
            OperationKind::Rooms => "rooms",
            OperationKind::GetRoom => "get_room",
            OperationKind::CreateRoom => "create_room",
            OperationKind::UpdateRoom => "update_room",
            OperationKind::DeleteRoom => "delete_room",
            OperationKind::RoomExists => "room_exists",
            OperationKind::History => "history",
            OperationKind::RecentHistory => "recent_history",
            OperationKind::RoomStatistics => "room_statistics",
            OperationKind::RoomMembers => "room_members",
            OperationKind::RoomParticipants => "room_participants",
            OperationKind::NotifyRoom => "notify_room",
            OperationKind::SendMessage => "send_message",
            OperationKind::SetTopic => "set_topic",
            OperationKind::ShareFile => "share_file",
            OperationKind::Webhooks => "webhooks",
            OperationKind::GetWebhook => "get_webhook",
            OperationKind::CreateWebhook => "create_webhook",
            OperationKind::DeleteWebhook => "delete_webhook",
            OperationKind::Users => "users",
            OperationKind::GetUser => "get_user",
            OperationKind::PrivateMessage => "private_message",
            OperationKind::PrivateHistory => "private_history",
            OperationKind::Emoticons => "emoticons",
            OperationKind::GetEmoticon => "get_emoticon",
        }
    }

    /// Parameter flags that must be present (and non-empty), in the order
    /// `Operation::from_options` checks them.
    #[cfg(test)]
    pub const fn required(&self) -> &'static [&'static str] {
        match self {
            OperationKind::Capabilities
            | OperationKind::Rooms
            | OperationKind::Users
            | OperationKind::Emoticons => &[],
            OperationKind::GetRoom
            | OperationKind::CreateRoom
            | OperationKind::DeleteRoom
            | OperationKind::RoomExists
            | OperationKind::History
            | OperationKind::RecentHistory
            | OperationKind::RoomStatistics
            | OperationKind::RoomMembers
            | OperationKind::RoomParticipants
            | OperationKind::Webhooks => &["room"],
            OperationKind::UpdateRoom => &[
                "room",
                "topic",
                "privacy",
                "is_archived",
                "is_guest_accessible",
                "owner_id",
            ],
            OperationKind::NotifyRoom | OperationKind::SendMessage => &["room", "msg"],
            OperationKind::SetTopic => &["room", "topic"],
            OperationKind::ShareFile => &["room", "file"],
            OperationKind::GetWebhook | OperationKind::DeleteWebhook => &["room", "hook"],
            OperationKind::CreateWebhook => &["room", "url", "event"],
            OperationKind::GetUser | OperationKind::PrivateHistory => &["user"],
            OperationKind::PrivateMessage => &["user", "msg"],
            OperationKind::GetEmoticon => &["emoticon"],
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Request Bodies                                                             */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRoom {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,
    pub guest_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomUpdate {
    pub name: String,
    pub topic: String,
    pub privacy: String,
    pub is_archived: bool,
    pub is_guest_accessible: bool,
    pub owner: OwnerRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRef {
    pub id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub notify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWebhook {
    pub url: String,
    pub event: WebhookEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateMessage {
    pub message: String,
    pub notify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<String>,
}

/// User ids are numeric in HipChat but emails and @mentions are accepted
/// too; numbers are forwarded as JSON numbers, anything else as a string.
pub fn id_value(raw: &str) -> Value {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map(|n| Value::Number(n.into()))
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}

/* -------------------------------------------------------------------------- */
/* Operation                                                                  */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Capabilities,
    Rooms,
    GetRoom { room: String },
    CreateRoom(NewRoom),
    UpdateRoom { room: String, update: RoomUpdate },
    DeleteRoom { room: String },
    RoomExists { room: String },
    History { room: String },
    RecentHistory { room: String },
    RoomStatistics { room: String },
    RoomMembers { room: String },
    RoomParticipants { room: String },
    NotifyRoom { room: String, notification: Notification },
    SendMessage { room: String, message: String },
    SetTopic { room: String, topic: String },
    ShareFile { room: String, file: PathBuf, message: Option<String> },
    Webhooks { room: String },
    GetWebhook { room: String, hook: String },
    CreateWebhook { room: String, webhook: NewWebhook },
    DeleteWebhook { room: String, hook: String },
    Users,
    GetUser { user: String },
    PrivateMessage { user: String, message: PrivateMessage },
    PrivateHistory { user: String },
    Emoticons { scope: Option<EmoticonType> },
    GetEmoticon { emoticon: String },
}

impl Operation {
    /// Validate `opts` for `kind` and assemble the typed operation.
    pub fn from_options(kind: OperationKind, opts: &Options) -> Result<Self, UsageError> {
        let req = |value: &Option<String>, option: &'static str| {
            Options::require(value, kind, option)
        };
        let room = || req(&opts.room, "room");
        let user = || req(&opts.user, "user");

        let op = match kind {
            OperationKind::Capabilities => Operation::Capabilities,
            OperationKind::Rooms => Operation::Rooms,
            OperationKind::GetRoom => Operation::GetRoom { room: room()? },
            OperationKind::CreateRoom => Operation::CreateRoom(NewRoom {
                name: room()?,
                topic: Options::optional(&opts.topic),
                privacy: Options::optional(&opts.privacy),
                guest_access: coerce_bool(opts.is_guest_accessible.as_deref()),
                owner_user_id: Options::optional(&opts.owner_id).map(|o| id_value(&o)),
            }),
            OperationKind::UpdateRoom => {
                let room = room()?;
                let topic = req(&opts.topic, "topic")?;
                let privacy = req(&opts.privacy, "privacy")?;
                let archived = presence(&opts.is_archived, kind, "is_archived")?;
                let guest = presence(&opts.is_guest_accessible, kind, "is_guest_accessible")?;
                let owner = req(&opts.owner_id, "owner_id")?;
                Operation::UpdateRoom {
                    update: RoomUpdate {
                        name: room.clone(),
                        topic,
                        privacy,
                        is_archived: coerce_bool(Some(archived)),
                        is_guest_accessible: coerce_bool(Some(guest)),
                        owner: OwnerRef {
                            id: id_value(&owner),
                        },
                    },
                    room,
                }
            }
            OperationKind::DeleteRoom => Operation::DeleteRoom { room: room()? },
            OperationKind::RoomExists => Operation::RoomExists { room: room()? },
            OperationKind::History => Operation::History { room: room()? },
            OperationKind::RecentHistory => Operation::RecentHistory { room: room()? },
            OperationKind::RoomStatistics => Operation::RoomStatistics { room: room()? },
            OperationKind::RoomMembers => Operation::RoomMembers { room: room()? },
            OperationKind::RoomParticipants => Operation::RoomParticipants { room: room()? },
            OperationKind::NotifyRoom => Operation::NotifyRoom {
                room: room()?,
                notification: Notification {
                    message: req(&opts.msg, "msg")?,
                    color: opts.color(),
                    notify: coerce_bool(opts.notify.as_deref()),
                    message_format: Options::optional(&opts.msg_format),
                },
            },
            OperationKind::SendMessage => Operation::SendMessage {
                room: room()?,
                message: req(&opts.msg, "msg")?,
            },
            OperationKind::SetTopic => Operation::SetTopic {
                room: room()?,
                topic: req(&opts.topic, "topic")?,
            },
            OperationKind::ShareFile => Operation::ShareFile {
                room: room()?,
                file: PathBuf::from(req(&opts.file, "file")?),
                message: Options::optional(&opts.msg),
            },
            OperationKind::Webhooks => Operation::Webhooks { room: room()? },
            OperationKind::GetWebhook => Operation::GetWebhook {
                room: room()?,
                hook: req(&opts.hook, "hook")?,
            },
            OperationKind::CreateWebhook => {
                let room = room()?;
                let url = req(&opts.url, "url")?;
                let raw_event = req(&opts.event, "event")?;
                let event = parse_choice::<WebhookEvent>(&raw_event).map_err(|choices| {
                    UsageError::InvalidChoice {
                        option: "event",
                        value: raw_event.clone(),
                        choices,
                    }
                })?;
                Operation::CreateWebhook {
                    room,
                    webhook: NewWebhook {
                        url,
                        event,
                        pattern: Options::optional(&opts.pattern),
                        name: Options::optional(&opts.name),
                    },
                }
            }
            OperationKind::DeleteWebhook => Operation::DeleteWebhook {
                room: room()?,
                hook: req(&opts.hook, "hook")?,
            },
            OperationKind::Users => Operation::Users,
            OperationKind::GetUser => Operation::GetUser { user: user()? },
            OperationKind::PrivateMessage => Operation::PrivateMessage {
                user: user()?,
                message: PrivateMessage {
                    message: req(&opts.msg, "msg")?,
                    notify: coerce_bool(opts.notify.as_deref()),
                    message_format: Options::optional(&opts.msg_format),
                },
            },
            OperationKind::PrivateHistory => Operation::PrivateHistory { user: user()? },
            OperationKind::Emoticons => {
                let scope = match Options::optional(&opts.emoticon_type) {
                    None => None,
                    Some(raw) => Some(parse_choice::<EmoticonType>(&raw).map_err(|_| {
                        UsageError::InvalidChoice {
                            option: "type",
                            value: raw.clone(),
                            choices: choice_list::<EmoticonType>(),
                        }
                    })?),
                };
                Operation::Emoticons { scope }
            }
            OperationKind::GetEmoticon => Operation::GetEmoticon {
                emoticon: req(&opts.emoticon, "emoticon")?,
            },
        };
        Ok(op)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Capabilities => OperationKind::Capabilities,
            Operation::Rooms => OperationKind::Rooms,
            Operation::GetRoom { .. } => OperationKind::GetRoom,
            Operation::CreateRoom(_) => OperationKind::CreateRoom,
            Operation::UpdateRoom { .. } => OperationKind::UpdateRoom,
            Operation::DeleteRoom { .. } => OperationKind::DeleteRoom,
            Operation::RoomExists { .. } => OperationKind::RoomExists,
            Operation::History { .. } => OperationKind::History,
            Operation::RecentHistory { .. } => OperationKind::RecentHistory,
            Operation::RoomStatistics { .. } => OperationKind::RoomStatistics,
            Operation::RoomMembers { .. } => OperationKind::RoomMembers,
            Operation::RoomParticipants { .. } => OperationKind::RoomParticipants,
            Operation::NotifyRoom { .. } => OperationKind::NotifyRoom,
            Operation::SendMessage { .. } => OperationKind::SendMessage,
            Operation::SetTopic { .. } => OperationKind::SetTopic,
            Operation::ShareFile { .. } => OperationKind::ShareFile,
            Operation::Webhooks { .. } => OperationKind::Webhooks,
            Operation::GetWebhook { .. } => OperationKind::GetWebhook,
            Operation::CreateWebhook { .. } => OperationKind::CreateWebhook,
            Operation::DeleteWebhook { .. } => OperationKind::DeleteWebhook,
            Operation::Users => OperationKind::Users,
            Operation::GetUser { .. } => OperationKind::GetUser,
            Operation::PrivateMessage { .. } => OperationKind::PrivateMessage,
            Operation::PrivateHistory { .. } => OperationKind::PrivateHistory,
            Operation::Emoticons { .. } => OperationKind::Emoticons,
            Operation::GetEmoticon { .. } => OperationKind::GetEmoticon,
        }
    }

    /// Build the HTTP request for this operation. Only `ShareFile` touches
    /// the filesystem (the upload is read here, before any request).
    pub fn to_request(&self) -> Result<ApiRequest, UsageError> {
        let req = match self {
            Operation::Capabilities => ApiRequest::get(&["capabilities"]),
            Operation::Rooms => ApiRequest::get(&["room"]),
            Operation::GetRoom { room } | Operation::RoomExists { room } => {
                ApiRequest::get(&["room", room.as_str()])
            }
            Operation::CreateRoom(body) => ApiRequest::post(&["room"], to_json(body)),
            Operation::UpdateRoom { room, update } => {
                ApiRequest::put(&["room", room.as_str()], to_json(update))
            }
            Operation::DeleteRoom { room } => ApiRequest::delete(&["room", room.as_str()]),
            Operation::History { room } => {
                ApiRequest::get(&["room", room.as_str(), "history"])
            }
            Operation::RecentHistory { room } => {
                ApiRequest::get(&["room", room.as_str(), "history", "latest"])
            }
            Operation::RoomStatistics { room } => {
                ApiRequest::get(&["room", room.as_str(), "statistics"])
            }
            Operation::RoomMembers { room } => {
                ApiRequest::get(&["room", room.as_str(), "member"])
            }
            Operation::RoomParticipants { room } => {
                ApiRequest::get(&["room", room.as_str(), "participant"])
            }
            Operation::NotifyRoom { room, notification } => {
                ApiRequest::post(
                    &["room", room.as_str(), "notification"],
                    to_json(notification),
                )
            }
            Operation::SendMessage { room, message } => {
                ApiRequest::post(
                    &["room", room.as_str(), "message"],
                    json!({ "message": message }),
                )
            }
            Operation::SetTopic { room, topic } => {
                ApiRequest::put(&["room", room.as_str(), "topic"], json!({ "topic": topic }))
            }
            Operation::ShareFile {
                room,
                file,
                message,
            } => {
                let upload = read_upload(file, message.as_deref())?;
                ApiRequest::upload(&["room", room.as_str(), "share", "file"], upload)
            }
            Operation::Webhooks { room } => {
                ApiRequest::get(&["room", room.as_str(), "webhook"])
            }
            Operation::GetWebhook { room, hook } => {
                ApiRequest::get(&["room", room.as_str(), "webhook", hook.as_str()])
            }
            Operation::CreateWebhook { room, webhook } => {
                ApiRequest::post(&["room", room.as_str(), "webhook"], to_json(webhook))
            }
            Operation::DeleteWebhook { room, hook } => {
                ApiRequest::delete(&["room", room.as_str(), "webhook", hook.as_str()])
            }
            Operation::Users => ApiRequest::get(&["user"]),
            Operation::GetUser { user } => ApiRequest::get(&["user", user.as_str()]),
            Operation::PrivateMessage { user, message } => {
                ApiRequest::post(&["user", user.as_str(), "message"], to_json(message))
            }
            Operation::PrivateHistory { user } => {
                ApiRequest::get(&["user", user.as_str(), "history", "latest"])
            }
            Operation::Emoticons { scope } => {
                let req = ApiRequest::get(&["emoticon"]);
                match scope {
                    Some(s) => req.with_query("type", s.as_str()),
                    None => req,
                }
            }
            Operation::GetEmoticon { emoticon } => {
                ApiRequest::get(&["emoticon", emoticon.as_str()])
            }
        };
        Ok(req)
    }
}

/// Presence check for boolean-ish flags: the flag must be given, but `0` or
/// an empty value is a legitimate (false) answer.
fn presence<'a>(
    value: &'a Option<String>,
    operation: OperationKind,
    option: &'static str,
) -> Result<&'a str, UsageError> {
    value.as_deref().ok_or(UsageError::MissingOption {
        operation: operation.flag(),
        option,
    })
}

fn to_json<T: Serialize>(body: &T) -> Value {
    // Plain structs of strings, bools and JSON values always serialize.
    serde_json::to_value(body).unwrap_or(Value::Null)
}

fn read_upload(path: &Path, message: Option<&str>) -> Result<FileUpload, UsageError> {
    let content = std::fs::read(path).map_err(|source| UsageError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mut metadata = serde_json::Map::new();
    if let Some(m) = message {
        metadata.insert("message".into(), Value::String(m.to_string()));
    }
    Ok(FileUpload {
        metadata: Value::Object(metadata),
        file_name,
        content,
    })
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */
#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn full_options() -> Options {
        Options {
            room: Some("Ops Room".into()),
            topic: Some("deploys".into()),
            privacy: Some("private".into()),
            is_archived: Some("0".into()),
            is_guest_accessible: Some("1".into()),
            owner_id: Some("42".into()),
            msg: Some("hello".into()),
            notify: Some("1".into()),
            color: None,
            colour: None,
            msg_format: Some("text".into()),
            hook: Some("7".into()),
            url: Some("https://example.com/hook".into()),
            pattern: None,
            event: Some("room_message".into()),
            name: None,
            user: Some("@alice".into()),
            emoticon_type: Some("all".into()),
            emoticon: Some("awthanks".into()),
            file: Some("/nonexistent/report.txt".into()),
        }
    }

    fn clear(opts: &mut Options, option: &str) {
        let slot = match option {
            "room" => &mut opts.room,
            "topic" => &mut opts.topic,
            "privacy" => &mut opts.privacy,
            "is_archived" => &mut opts.is_archived,
            "is_guest_accessible" => &mut opts.is_guest_accessible,
            "owner_id" => &mut opts.owner_id,
            "msg" => &mut opts.msg,
            "hook" => &mut opts.hook,
            "url" => &mut opts.url,
            "event" => &mut opts.event,
            "user" => &mut opts.user,
            "emoticon" => &mut opts.emoticon,
            "file" => &mut opts.file,
            other => panic!("no slot for {other}"),
        };
        *slot = None;
    }

    #[test]
    fn every_operation_accepts_full_options() {
        for kind in OperationKind::all() {
            let op = Operation::from_options(*kind, &full_options())
                .unwrap_or_else(|e| panic!("{}: {e}", kind.flag()));
            assert_eq!(op.kind(), *kind);
        }
    }

    #[test]
    fn missing_required_option_is_named() {
        for kind in OperationKind::all() {
            for option in kind.required() {
                let mut opts = full_options();
                clear(&mut opts, option);
                let err = Operation::from_options(*kind, &opts).unwrap_err();
                assert_eq!(
                    err.to_string(),
                    format!("missing required option --{option} for --{}", kind.flag())
                );
            }
        }
    }

    #[test]
    fn flag_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in OperationKind::all() {
            assert!(seen.insert(kind.flag()), "duplicate flag {}", kind.flag());
        }
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn update_room_builds_nested_owner() {
        let op = Operation::from_options(OperationKind::UpdateRoom, &full_options()).unwrap();
        let req = op.to_request().unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.path, vec!["room", "Ops Room"]);
        assert_eq!(
            req.json_body(),
            Some(&json!({
                "name": "Ops Room",
                "topic": "deploys",
                "privacy": "private",
                "is_archived": false,
                "is_guest_accessible": true,
                "owner": { "id": 42 }
            }))
        );
    }

    #[test]
    fn update_room_accepts_zero_for_archived() {
        let mut opts = full_options();
        opts.is_archived = Some(String::new());
        let op = Operation::from_options(OperationKind::UpdateRoom, &opts).unwrap();
        match op {
            Operation::UpdateRoom { update, .. } => assert!(!update.is_archived),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn create_room_defaults_guest_access_false() {
        let opts = Options {
            room: Some("new".into()),
            ..Default::default()
        };
        let op = Operation::from_options(OperationKind::CreateRoom, &opts).unwrap();
        assert_eq!(
            op.to_request().unwrap().json_body(),
            Some(&json!({ "name": "new", "guest_access": false }))
        );
    }

    #[test]
    fn create_webhook_event_validation() {
        let mut opts = full_options();
        opts.event = Some("invalid_value".into());
        let err = Operation::from_options(OperationKind::CreateWebhook, &opts).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid_value"));
        assert!(msg.contains("room_topic_change"), "lists choices: {msg}");

        let op = Operation::from_options(OperationKind::CreateWebhook, &full_options()).unwrap();
        let req = op.to_request().unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(
            req.json_body(),
            Some(&json!({ "url": "https://example.com/hook", "event": "room_message" }))
        );
    }

    #[test]
    fn emoticon_type_validation() {
        let mut opts = full_options();
        opts.emoticon_type = Some("foo".into());
        let err = Operation::from_options(OperationKind::Emoticons, &opts).unwrap_err();
        assert!(err.to_string().contains("global, group, all"));

        let op = Operation::from_options(OperationKind::Emoticons, &full_options()).unwrap();
        let req = op.to_request().unwrap();
        assert_eq!(req.query, vec![("type".to_string(), "all".to_string())]);

        let op = Operation::from_options(OperationKind::Emoticons, &Options::default()).unwrap();
        assert!(op.to_request().unwrap().query.is_empty());
    }

    #[test]
    fn notify_uses_colour_alias() {
        let mut with_colour = full_options();
        with_colour.colour = Some("red".into());
        let mut with_color = full_options();
        with_color.color = Some("red".into());

        let a = Operation::from_options(OperationKind::NotifyRoom, &with_colour).unwrap();
        let b = Operation::from_options(OperationKind::NotifyRoom, &with_color).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.to_request().unwrap().json_body(),
            Some(&json!({
                "message": "hello",
                "color": "red",
                "notify": true,
                "message_format": "text"
            }))
        );
    }

    #[test]
    fn operation_paths() {
        let opts = full_options();
        let cases: &[(OperationKind, Method, &[&str])] = &[
            (OperationKind::Capabilities, Method::GET, &["capabilities"]),
            (OperationKind::Rooms, Method::GET, &["room"]),
            (OperationKind::DeleteRoom, Method::DELETE, &["room", "Ops Room"]),
            (OperationKind::RoomExists, Method::GET, &["room", "Ops Room"]),
            (OperationKind::RecentHistory, Method::GET, &["room", "Ops Room", "history", "latest"]),
            (OperationKind::RoomParticipants, Method::GET, &["room", "Ops Room", "participant"]),
            (OperationKind::SetTopic, Method::PUT, &["room", "Ops Room", "topic"]),
            (OperationKind::DeleteWebhook, Method::DELETE, &["room", "Ops Room", "webhook", "7"]),
            (OperationKind::GetUser, Method::GET, &["user", "@alice"]),
            (OperationKind::PrivateMessage, Method::POST, &["user", "@alice", "message"]),
            (OperationKind::GetEmoticon, Method::GET, &["emoticon", "awthanks"]),
        ];
        for (kind, method, path) in cases {
            let req = Operation::from_options(*kind, &opts)
                .unwrap()
                .to_request()
                .unwrap();
            assert_eq!(&req.method, method, "{}", kind.flag());
            assert_eq!(req.path, path.to_vec(), "{}", kind.flag());
        }
    }

    #[test]
    fn share_file_reads_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, b"quarterly numbers").unwrap();

        let op = Operation::ShareFile {
            room: "ops".into(),
            file: path,
            message: Some("see attached".into()),
        };
        let req = op.to_request().unwrap();
        assert_eq!(req.path, vec!["room", "ops", "share", "file"]);
        let upload = req.upload_body().unwrap();
        assert_eq!(upload.file_name, "report.txt");
        assert_eq!(upload.content, b"quarterly numbers");
        assert_eq!(upload.metadata, json!({ "message": "see attached" }));
    }

    #[test]
    fn share_file_missing_file_is_usage_error() {
        let op = Operation::from_options(OperationKind::ShareFile, &full_options()).unwrap();
        let err = op.to_request().unwrap_err();
        assert!(matches!(err, UsageError::File { .. }));
    }

    #[test]
    fn id_value_numbers_and_strings() {
        assert_eq!(id_value("42"), json!(42));
        assert_eq!(id_value(" 42 "), json!(42));
        assert_eq!(id_value("alice@example.com"), json!("alice@example.com"));
        assert_eq!(id_value(" alice "), json!("alice"));
    }

    #[test]
    fn update_room_reports_first_missing_option() {
        let opts = Options {
            room: Some("ops".into()),
            ..Default::default()
        };
        let err = Operation::from_options(OperationKind::UpdateRoom, &opts).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required option --topic for --update_room"
        );
        assert!(Operation::from_options(OperationKind::GetRoom, &opts).is_ok());
    }

    #[test]
    fn create_webhook_forwards_event_unchanged() {
        let mut opts = full_options();
        opts.event = Some(" ROOM_Message ".into());
        let err = Operation::from_options(OperationKind::CreateWebhook, &opts).unwrap_err();
        assert!(matches!(err, UsageError::InvalidChoice { option: "event", .. }));

        opts.event = Some("room_enter".into());
        let req = Operation::from_options(OperationKind::CreateWebhook, &opts)
            .unwrap()
            .to_request()
            .unwrap();
        assert_eq!(req.json_body().unwrap()["event"], json!("room_enter"));
    }
}
