//! Raw review-activity records.
//!
//! Activities arrive from the review service as loosely-typed JSON. The types
//! here mirror that wire shape without owning it: every field is optional or
//! defaulted, so partial records decode rather than fail. The payload is the
//! one place the wire shape is genuinely ad hoc, so it is modeled as a tagged
//! union over the known kinds with a catch-all for anything else.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author block on an activity record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Code position block attached to code-comment activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeComment {
    #[serde(default)]
    pub path: Option<String>,
    /// Line in the new revision the comment spans from.
    #[serde(default)]
    pub line_new: Option<i64>,
    /// Line in the old revision the comment spans from.
    #[serde(default)]
    pub line_old: Option<i64>,
    #[serde(default)]
    pub span_new: Option<i64>,
    #[serde(default)]
    pub span_old: Option<i64>,
    /// True when the commented position no longer matches current content.
    #[serde(default)]
    pub outdated: bool,
    #[serde(default)]
    pub merge_base_sha: Option<String>,
    #[serde(default)]
    pub source_sha: Option<String>,
}

/// Typed payload union over the known activity kinds.
///
/// Unrecognized kinds (including the deprecated snapshot-embedding code
/// comment shape) decode to [`ActivityPayload::Unknown`]; side and line
/// derivation never depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActivityPayload {
    Comment,
    CodeComment {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        lines: Option<Vec<String>>,
        /// New-side start line. Mixed wire encoding: a number (possibly `0`)
        /// when the comment is on the new side, absent or a literal `false`
        /// otherwise.
        #[serde(default)]
        line_start_new: Option<Value>,
        #[serde(default)]
        line_end_new: Option<Value>,
    },
    TitleChange {
        #[serde(default)]
        old: Option<String>,
        #[serde(default)]
        new: Option<String>,
    },
    ReviewSubmit {
        #[serde(default)]
        decision: Option<String>,
        #[serde(default, alias = "Message")]
        message: Option<String>,
    },
    Merge {
        #[serde(default)]
        merge_method: Option<String>,
        #[serde(default)]
        merge_sha: Option<String>,
        #[serde(default, alias = "Message")]
        message: Option<String>,
    },
    BranchUpdate {
        #[serde(default)]
        old: Option<String>,
        #[serde(default)]
        new: Option<String>,
    },
    BranchDelete,
    StateChange {
        #[serde(default)]
        old: Option<String>,
        #[serde(default)]
        new: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl ActivityPayload {
    /// True when the payload pins its comment to the new (right) side.
    ///
    /// Presence of the start marker is what matters: `0` is a legitimate
    /// start line, while a literal `false` is the legacy absent encoding.
    #[must_use]
    pub fn starts_on_new_side(&self) -> bool {
        match self {
            Self::CodeComment {
                line_start_new: Some(marker),
                ..
            } => marker.as_bool() != Some(false),
            _ => false,
        }
    }

    /// Human-readable message carried by the payload, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::ReviewSubmit { message, .. } | Self::Merge { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// One review activity as delivered by the review service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewActivity {
    #[serde(default)]
    pub id: Option<i64>,
    /// Root activity this one replies to, when it is a reply.
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub resolved: Option<i64>,
    #[serde(default)]
    pub author: Option<ActivityAuthor>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub edited: Option<i64>,
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(default)]
    pub deleted: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub code_comment: Option<CodeComment>,
    #[serde(default, deserialize_with = "payload_lenient")]
    pub payload: Option<ActivityPayload>,
}

// A payload that is present but unparseable still decodes (as Unknown), so a
// single malformed record cannot sink the whole activity list.
fn payload_lenient<'de, D>(deserializer: D) -> Result<Option<ActivityPayload>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| serde_json::from_value(v).unwrap_or(ActivityPayload::Unknown)))
}

/// Decode a review-activity list from its JSON wire form.
///
/// # Errors
///
/// Returns an error when `input` is not a JSON array of activity records.
pub fn activities_from_json(input: &str) -> anyhow::Result<Vec<ReviewActivity>> {
    serde_json::from_str(input).context("Failed to decode review activities")
}
