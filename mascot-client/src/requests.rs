//! Operator API methods and their typed request structures
//!
//! Each API method is described by a `MethodSpec`: the JSON-RPC method name
//! and the `FieldRule` table its parameters are validated against. The typed
//! structs below serialize to exactly those PascalCase wire names and leave
//! unset optional fields out, so a request built from them always passes
//! the presence and type checks; only value constraints can still fail.
//!
//! Raw `serde_json::json!` mappings go through the same tables.

use mascot_core::{FieldRule, ParamType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire contract of one operator API method
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    /// JSON-RPC method name
    pub name: &'static str,
    /// Parameter contract, checked in order
    pub rules: &'static [FieldRule],
    /// Whether the validated parameters are sent; when false an empty
    /// mapping goes on the wire instead
    pub forward_params: bool,
}

/// `Game.List`. `BankGroupId` is validated but never sent.
pub const LIST_GAMES: MethodSpec = MethodSpec {
    name: "Game.List",
    rules: &[FieldRule::optional("BankGroupId", ParamType::String)],
    forward_params: false,
};

/// `BankGroup.Set`
pub const SET_BANK_GROUP: MethodSpec = MethodSpec {
    name: "BankGroup.Set",
    rules: &[
        FieldRule::required("Id", ParamType::String),
        FieldRule::required("Currency", ParamType::String),
        FieldRule::optional("SettingsPatch", ParamType::Integer),
    ],
    forward_params: true,
};

/// `Player.Set`
pub const SET_PLAYER: MethodSpec = MethodSpec {
    name: "Player.Set",
    rules: &[
        FieldRule::required("Id", ParamType::String),
        FieldRule::required("BankGroupId", ParamType::String),
        FieldRule::optional("Nick", ParamType::String),
    ],
    forward_params: true,
};

/// `Bonus.Set`
pub const SET_BONUS: MethodSpec = MethodSpec {
    name: "Bonus.Set",
    rules: &[FieldRule::required("Id", ParamType::String)],
    forward_params: true,
};

/// `Session.Create`
pub const CREATE_SESSION: MethodSpec = MethodSpec {
    name: "Session.Create",
    rules: &[
        FieldRule::required("PlayerId", ParamType::String),
        FieldRule::required("GameId", ParamType::String),
        FieldRule::optional("BonusId", ParamType::String),
        FieldRule::optional("RestorePolicy", ParamType::String).one_of(RestorePolicy::ALLOWED),
        FieldRule::optional("StaticHost", ParamType::String),
        FieldRule::optional("AlternativeId", ParamType::String),
    ],
    forward_params: true,
};

/// `Session.CreateDemo`
pub const CREATE_DEMO_SESSION: MethodSpec = MethodSpec {
    name: "Session.CreateDemo",
    rules: &[
        FieldRule::required("GameId", ParamType::String),
        FieldRule::required("BankGroupId", ParamType::String),
        FieldRule::optional("StartBalance", ParamType::Integer),
        FieldRule::optional("StaticHost", ParamType::String),
    ],
    forward_params: true,
};

/// `Session.Close`
pub const CLOSE_SESSION: MethodSpec = MethodSpec {
    name: "Session.Close",
    rules: &[FieldRule::required("SessionId", ParamType::String)],
    forward_params: true,
};

/// `History.GetToken`
pub const GET_HISTORY_TOKEN: MethodSpec = MethodSpec {
    name: "History.GetToken",
    rules: &[
        FieldRule::required("SessionId", ParamType::String),
        FieldRule::required("ExpiryInSeconds", ParamType::Integer),
    ],
    forward_params: true,
};

/// Every method the client exposes
pub const ALL_METHODS: &[MethodSpec] = &[
    LIST_GAMES,
    SET_BANK_GROUP,
    SET_PLAYER,
    SET_BONUS,
    CREATE_SESSION,
    CREATE_DEMO_SESSION,
    CLOSE_SESSION,
    GET_HISTORY_TOKEN,
];

/// What `Session.Create` does when the player already has a session for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestorePolicy {
    /// Resume the existing session
    Restore,
    /// Always start a new session
    Create,
}

impl RestorePolicy {
    /// Wire values accepted for `RestorePolicy`
    pub const ALLOWED: &'static [&'static str] = &["Restore", "Create"];

    /// Wire value of this policy
    pub fn as_str(self) -> &'static str {
        match self {
            RestorePolicy::Restore => "Restore",
            RestorePolicy::Create => "Create",
        }
    }
}

impl fmt::Display for RestorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of `Game.List`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListGames {
    /// Bank group to list games for; the server ignores it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_group_id: Option<String>,
}

/// A bank group, for `BankGroup.Set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankGroup {
    /// Bank group identifier
    pub id: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Revision of the bank group settings to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_patch: Option<i64>,
}

impl BankGroup {
    /// Create a bank group with the given id and currency
    pub fn new(id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            settings_patch: None,
        }
    }

    /// Set the settings patch
    pub fn with_settings_patch(mut self, patch: i64) -> Self {
        self.settings_patch = Some(patch);
        self
    }
}

/// A player, for `Player.Set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    /// Player identifier
    pub id: String,
    /// Bank group the player belongs to
    pub bank_group_id: String,
    /// Display name shown in games
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
}

impl Player {
    /// Create a player in a bank group
    pub fn new(id: impl Into<String>, bank_group_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bank_group_id: bank_group_id.into(),
            nick: None,
        }
    }

    /// Set the display name
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }
}

/// A bonus, for `Bonus.Set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bonus {
    /// Bonus identifier
    pub id: String,
}

impl Bonus {
    /// Create a bonus reference
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Parameters of `Session.Create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionRequest {
    /// Player the session is opened for
    pub player_id: String,
    /// Game to launch
    pub game_id: String,
    /// Bonus applied to the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_id: Option<String>,
    /// Whether to resume an existing session or always create one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_policy: Option<RestorePolicy>,
    /// Host serving the game's static assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_host: Option<String>,
    /// Operator-side identifier for the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_id: Option<String>,
}

impl SessionRequest {
    /// Create a session request for a player and game
    pub fn new(player_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            game_id: game_id.into(),
            bonus_id: None,
            restore_policy: None,
            static_host: None,
            alternative_id: None,
        }
    }

    /// Apply a bonus
    pub fn with_bonus(mut self, bonus_id: impl Into<String>) -> Self {
        self.bonus_id = Some(bonus_id.into());
        self
    }

    /// Set the restore policy
    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = Some(policy);
        self
    }

    /// Set the static asset host
    pub fn with_static_host(mut self, host: impl Into<String>) -> Self {
        self.static_host = Some(host.into());
        self
    }

    /// Set the operator-side session identifier
    pub fn with_alternative_id(mut self, alternative_id: impl Into<String>) -> Self {
        self.alternative_id = Some(alternative_id.into());
        self
    }
}

/// Parameters of `Session.CreateDemo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DemoSessionRequest {
    /// Game to launch
    pub game_id: String,
    /// Bank group whose currency the demo uses
    pub bank_group_id: String,
    /// Opening balance in the bank group's currency minor units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_balance: Option<i64>,
    /// Host serving the game's static assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_host: Option<String>,
}

impl DemoSessionRequest {
    /// Create a demo session request for a game and bank group
    pub fn new(game_id: impl Into<String>, bank_group_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            bank_group_id: bank_group_id.into(),
            start_balance: None,
            static_host: None,
        }
    }

    /// Set the opening balance
    pub fn with_start_balance(mut self, balance: i64) -> Self {
        self.start_balance = Some(balance);
        self
    }

    /// Set the static asset host
    pub fn with_static_host(mut self, host: impl Into<String>) -> Self {
        self.static_host = Some(host.into());
        self
    }
}

/// Parameters of `Session.Close`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloseSession {
    /// Session to close
    pub session_id: String,
}

impl CloseSession {
    /// Create a close request for a session
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// Parameters of `History.GetToken`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryTokenRequest {
    /// Session whose history the token grants access to
    pub session_id: String,
    /// Lifetime of the issued token
    pub expiry_in_seconds: i64,
}

impl HistoryTokenRequest {
    /// Create a token request valid for `expiry_in_seconds`
    pub fn new(session_id: impl Into<String>, expiry_in_seconds: i64) -> Self {
        Self {
            session_id: session_id.into(),
            expiry_in_seconds,
        }
    }
}
