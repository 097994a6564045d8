use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value stored for boolean modifiers (`--verbose`, bare words).
pub const FLAG_TRUE: &str = "true";
/// Normalized negative boolean value.
pub const FLAG_FALSE: &str = "false";

/// Metadata carried alongside a command.
///
/// Opaque to parsing and repair: every derived command copies it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Command ID (UUIDv7 for time-sortability), stamped by the front-end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// When the command was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Who issued the command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project the command applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

impl CommandMetadata {
    /// Fresh metadata with a new ID and the current time.
    pub fn stamped(user_id: Option<String>, project_path: Option<String>) -> Self {
        Self {
            id: Some(Uuid::now_v7()),
            timestamp: Some(Utc::now()),
            user_id,
            project_path,
        }
    }
}

/// One user-issued instruction: intent, optional target, modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Original text as typed. Never changes after creation.
    raw: String,
    /// Canonical verb, lowercase.
    pub intent: String,
    /// Object of the intent, may be empty.
    #[serde(default)]
    pub target: String,
    /// Flag name → value. Boolean flags hold `"true"`.
    #[serde(default)]
    pub modifiers: BTreeMap<String, String>,
    /// Whether the command currently satisfies the grammar.
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub metadata: CommandMetadata,
}

impl Command {
    /// An empty, invalid command wrapping `raw`.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Build a command from already-extracted fields. Validity starts false.
    pub fn from_parts(
        raw: impl Into<String>,
        intent: impl Into<String>,
        target: impl Into<String>,
        modifiers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            intent: intent.into(),
            target: target.into(),
            modifiers,
            is_valid: false,
            metadata: CommandMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: CommandMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_modifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.modifiers.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// A new command with a different intent/target.
    ///
    /// Raw text, metadata and modifiers are copied; validity is reset so the
    /// caller has to re-check the grammar.
    pub fn rewrite(&self, intent: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            raw: self.raw.clone(),
            intent: intent.into(),
            target: target.into(),
            modifiers: self.modifiers.clone(),
            is_valid: false,
            metadata: self.metadata.clone(),
        }
    }

    /// A new command with the same intent/target and replaced modifiers.
    pub fn rewrite_modifiers(&self, modifiers: BTreeMap<String, String>) -> Self {
        Self {
            modifiers,
            ..self.rewrite(self.intent.clone(), self.target.clone())
        }
    }

    /// True when there is nothing to interpret at all.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
            && self.intent.is_empty()
            && self.target.is_empty()
            && self.modifiers.is_empty()
    }

    pub fn has_target(&self) -> bool {
        !self.target.is_empty()
    }
}

impl fmt::Display for Command {
    /// Canonical short form, e.g. `analyze security --depth=2 --verbose`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.intent)?;
        if self.has_target() {
            write!(f, " {}", self.target)?;
        }
        for (key, value) in &self.modifiers {
            if value == FLAG_TRUE {
                write!(f, " --{key}")?;
            } else {
                write!(f, " --{key}={value}")?;
            }
        }
        Ok(())
    }
}
