//! The splice transformation at the heart of schemata insertion.
//!
//! Both operations here are pure: they borrow the current document and
//! selection, and either return a wholly new pair or an error with nothing
//! committed. The host owns the single authoritative state cell and replaces
//! it atomically with the output (usually via [`crate::editing::Session`]).

use crate::editing::document::{Block, Document, Selection};
use crate::editing::error::EngineError;
use crate::editing::keys::KeyGenerator;
use crate::editing::templates::{InsertionKind, Slot, template_for};

/// Splice a schemata block run into the document at the cursor.
///
/// The block under the cursor is consumed: it reappears inside the template
/// run retyped to the kind's converted type, keeping its key and text. All
/// other template slots become freshly-keyed empty blocks. Blocks before and
/// after the cursor block are carried over untouched, and the selection is
/// returned as-is (the host refocuses after committing).
pub fn insert_schema(
    document: &Document,
    selection: &Selection,
    kind: InsertionKind,
    keys: &mut dyn KeyGenerator,
) -> Result<(Document, Selection), EngineError> {
    let at = document
        .position_of(&selection.anchor_key)
        .ok_or_else(|| EngineError::BlockNotFound {
            key: selection.anchor_key.clone(),
        })?;

    // Partition around the cursor block; it lives in neither side.
    let blocks = document.blocks();
    let (before, rest) = blocks.split_at(at);
    let current = &rest[0];
    let after = &rest[1..];

    let run: Vec<Block> = template_for(kind)
        .into_iter()
        .map(|slot| match slot {
            Slot::Fresh(block_type) => Block::empty(keys.next_key(), block_type),
            Slot::Converted(block_type) => current.retyped(block_type),
        })
        .collect();

    let new_document = Document::spliced(before, run, after)?;
    Ok((new_document, selection.clone()))
}

/// Insert text at the caret, replacing the selected range.
///
/// Only the anchor block is edited. When the focus sits in the same block
/// the anchor..focus range is replaced; a focus in another block degrades to
/// a plain insertion at the anchor offset. The returned selection is
/// collapsed just after the inserted text.
pub fn insert_text(
    document: &Document,
    selection: &Selection,
    text: &str,
) -> Result<(Document, Selection), EngineError> {
    let at = document
        .position_of(&selection.anchor_key)
        .ok_or_else(|| EngineError::BlockNotFound {
            key: selection.anchor_key.clone(),
        })?;

    let current = &document.blocks()[at];
    let content = current.text();

    let (start, end) = if selection.focus_key == selection.anchor_key {
        let a = clamp_to_char_boundary(content, selection.anchor_offset);
        let b = clamp_to_char_boundary(content, selection.focus_offset);
        (a.min(b), a.max(b))
    } else {
        let a = clamp_to_char_boundary(content, selection.anchor_offset);
        (a, a)
    };

    let mut new_text = String::with_capacity(content.len() - (end - start) + text.len());
    new_text.push_str(&content[..start]);
    new_text.push_str(text);
    new_text.push_str(&content[end..]);

    let blocks = document
        .blocks()
        .iter()
        .map(|block| {
            if block.key() == current.key() {
                block.with_text(new_text.clone())
            } else {
                block.clone()
            }
        })
        .collect();

    let new_document = Document::new(blocks)?;
    let caret = Selection::caret(selection.anchor_key.clone(), start + text.len());
    Ok((new_document, caret))
}

/// Largest char boundary at or below `offset`, clamped to the text length
fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut at = offset.min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}
