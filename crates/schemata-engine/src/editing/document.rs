use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::editing::error::EngineError;
use crate::editing::keys::BlockKey;

/// Type tag deciding how a block renders and behaves
///
/// The schemata vocabulary is closed; `Custom` carries any host-defined tag
/// through the engine untouched (the classifier treats it as plain text).
/// Serialized as the bare string tag so host import/export formats stay flat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Regular text content
    Plain,
    /// Main body row of a schemata diagram
    Schema,
    /// Upper entry row of a schemata diagram
    SchemaEntry,
    /// Lower exit row of a schemata diagram
    SchemaExit,
    /// Host-defined block type, passed through verbatim
    Custom(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Plain => "plain",
            BlockType::Schema => "schema",
            BlockType::SchemaEntry => "schema-entry",
            BlockType::SchemaExit => "schema-exit",
            BlockType::Custom(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "plain" => BlockType::Plain,
            "schema" => BlockType::Schema,
            "schema-entry" => BlockType::SchemaEntry,
            "schema-exit" => BlockType::SchemaExit,
            other => BlockType::Custom(other.to_string()),
        }
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(BlockType::from_tag(&tag))
    }
}

/// Smallest addressable unit of document content: a typed, keyed span of text
///
/// Blocks are immutable value records. "Mutating" a block always means
/// producing a new block value merged into a new document; the retyping
/// helpers keep the key (and usually the text) stable across the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    key: BlockKey,
    #[serde(rename = "type")]
    block_type: BlockType,
    text: String,
}

impl Block {
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        Self {
            key,
            block_type,
            text: text.into(),
        }
    }

    /// Fresh block with empty text, as generated for template runs
    pub fn empty(key: BlockKey, block_type: BlockType) -> Self {
        Self::new(key, block_type, "")
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// New block with the same key and text but a different type
    pub fn retyped(&self, block_type: BlockType) -> Self {
        Self {
            key: self.key.clone(),
            block_type,
            text: self.text.clone(),
        }
    }

    /// New block with the same key and type but different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            block_type: self.block_type.clone(),
            text: text.into(),
        }
    }
}

/// Ordered sequence of blocks; order is reading order
///
/// Invariant: block keys are unique within a document. Construction validates
/// this and fails with [`EngineError::DuplicateKey`] rather than letting a
/// corrupt document circulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for block in &blocks {
            if !seen.insert(block.key().as_str()) {
                return Err(EngineError::DuplicateKey {
                    key: block.key().clone(),
                });
            }
        }
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Index of the block with the given key, if present
    pub fn position_of(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn get(&self, key: &BlockKey) -> Option<&Block> {
        self.position_of(key).map(|i| &self.blocks[i])
    }

    /// Splice result assembled by the engine: `before ++ run ++ after`
    ///
    /// Callers guarantee run keys are fresh; the uniqueness invariant is
    /// re-checked so a colliding generator surfaces here instead of later.
    pub(crate) fn spliced(
        before: &[Block],
        run: Vec<Block>,
        after: &[Block],
    ) -> Result<Self, EngineError> {
        let mut blocks = Vec::with_capacity(before.len() + run.len() + after.len());
        blocks.extend_from_slice(before);
        blocks.extend(run);
        blocks.extend_from_slice(after);
        Self::new(blocks)
    }
}

impl TryFrom<Vec<Block>> for Document {
    type Error = EngineError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::new(blocks)
    }
}

impl From<Document> for Vec<Block> {
    fn from(document: Document) -> Self {
        document.blocks
    }
}

/// Cursor/range position referencing block keys and byte offsets
///
/// Only the anchor block matters to the engine; the focus side is carried
/// through untouched for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor_key: BlockKey,
    pub anchor_offset: usize,
    pub focus_key: BlockKey,
    pub focus_offset: usize,
}

impl Selection {
    pub fn new(
        anchor_key: BlockKey,
        anchor_offset: usize,
        focus_key: BlockKey,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor_key,
            anchor_offset,
            focus_key,
            focus_offset,
        }
    }

    /// Collapsed selection (caret) at the given offset within one block
    pub fn caret(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }
}
