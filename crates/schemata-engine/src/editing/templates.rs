use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editing::document::BlockType;
use crate::editing::error::EngineError;

/// One of the four fixed schemata shapes the toolbar can insert
///
/// The four wire tokens (`half`, `main`, `bar`, `inverse`) are the entire
/// external insertion API surface; anything else fails at parse time with
/// [`EngineError::UnsupportedInsertionKind`] so the typed engine stays total
/// over this closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionKind {
    Half,
    Main,
    Bar,
    Inverse,
}

impl InsertionKind {
    pub const ALL: [InsertionKind; 4] = [
        InsertionKind::Half,
        InsertionKind::Main,
        InsertionKind::Bar,
        InsertionKind::Inverse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsertionKind::Half => "half",
            InsertionKind::Main => "main",
            InsertionKind::Bar => "bar",
            InsertionKind::Inverse => "inverse",
        }
    }
}

impl fmt::Display for InsertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertionKind {
    type Err = EngineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "half" => Ok(InsertionKind::Half),
            "main" => Ok(InsertionKind::Main),
            "bar" => Ok(InsertionKind::Bar),
            "inverse" => Ok(InsertionKind::Inverse),
            other => Err(EngineError::UnsupportedInsertionKind {
                token: other.to_string(),
            }),
        }
    }
}

/// One slot of an insertion template
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Freshly-keyed block with empty text
    Fresh(BlockType),
    /// The block under the cursor, retyped in place (same key and text)
    Converted(BlockType),
}

/// Fixed block-run template for an insertion kind
///
/// Each template interleaves exactly one `Converted` slot with `Fresh`
/// blocks. The converted type diverges on purpose: `half`/`main` retype the
/// cursor block to `schema-entry` while `bar`/`inverse` retype it to
/// `schema` directly, matching the established toolbar behavior.
pub fn template_for(kind: InsertionKind) -> Vec<Slot> {
    use BlockType::{Plain, Schema, SchemaEntry, SchemaExit};
    use Slot::{Converted, Fresh};

    match kind {
        InsertionKind::Half => vec![
            Fresh(Plain),
            Converted(SchemaEntry),
            Fresh(Schema),
            Fresh(SchemaExit),
            Fresh(Plain),
        ],
        InsertionKind::Main => vec![
            Fresh(Plain),
            Converted(SchemaEntry),
            Fresh(Schema),
            Fresh(SchemaExit),
            Fresh(Schema),
            Fresh(Schema),
            Fresh(SchemaExit),
            Fresh(Plain),
        ],
        InsertionKind::Bar => vec![Fresh(Plain), Converted(Schema), Fresh(Plain)],
        InsertionKind::Inverse => vec![
            Fresh(Plain),
            Converted(Schema),
            Fresh(SchemaExit),
            Fresh(Schema),
            Fresh(Plain),
        ],
    }
}
