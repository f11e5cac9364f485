use serde::{Deserialize, Deserializer};

pub const PONG_RESPONSE: &str = r#"{"type": 1}"#;
pub const DEFERRED_CHANNEL_MESSAGE_RESPONSE: &str = r#"{"type": 5}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutoComplete,
    ModalSubmit,
    Unknown(i64),
}

impl From<i64> for InteractionType {
    fn from(value: i64) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            3 => InteractionType::MessageComponent,
            4 => InteractionType::ApplicationCommandAutoComplete,
            5 => InteractionType::ModalSubmit,
            other => InteractionType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum ApplicationCommandOptionType {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
    Unknown(i64),
}

impl From<i64> for ApplicationCommandOptionType {
    fn from(value: i64) -> Self {
        match value {
            1 => ApplicationCommandOptionType::SubCommand,
            2 => ApplicationCommandOptionType::SubCommandGroup,
            3 => ApplicationCommandOptionType::String,
            4 => ApplicationCommandOptionType::Integer,
            5 => ApplicationCommandOptionType::Boolean,
            6 => ApplicationCommandOptionType::User,
            7 => ApplicationCommandOptionType::Channel,
            8 => ApplicationCommandOptionType::Role,
            9 => ApplicationCommandOptionType::Mentionable,
            10 => ApplicationCommandOptionType::Number,
            11 => ApplicationCommandOptionType::Attachment,
            other => ApplicationCommandOptionType::Unknown(other),
        }
    }
}

/// The minimal shape shared by every interaction kind, used to decide how
/// the rest of the payload should be decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    pub r#type: InteractionType,
}

/// An application command interaction. Only the fields needed to derive the
/// command name are modelled; the raw body is what gets forwarded.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub r#type: InteractionType,
    pub data: InteractionData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub r#type: Option<ApplicationCommandOptionType>,
    #[serde(default)]
    pub focused: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<InteractionData>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<InteractionData>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<InteractionData>>::deserialize(deserializer)?.unwrap_or_default())
}

impl InteractionData {
    pub fn is_focused(&self) -> bool {
        self.focused.unwrap_or(false)
    }

    pub fn is_sub_command(&self) -> bool {
        matches!(
            self.r#type,
            Some(ApplicationCommandOptionType::SubCommand)
                | Some(ApplicationCommandOptionType::SubCommandGroup)
        )
    }
}
