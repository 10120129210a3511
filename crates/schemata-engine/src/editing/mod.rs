/*!
 * # Editing Core Module
 *
 * The editing core turns a block-based document plus a user gesture into the
 * next document version. It is the only part of the system that understands
 * schemata structure; everything visual lives in the host.
 *
 * ## Architecture Overview
 *
 * ### 1. Immutable Document Snapshots
 * - The document is an ordered `Vec<Block>`; every block carries a stable
 *   `BlockKey`, a `BlockType` tag and its text content
 * - Edits never mutate in place: each operation returns a wholly new
 *   `Document`/`Selection` pair and the host replaces its current state
 *   atomically
 *
 * ### 2. Command-Based Editing
 * - All edits are represented as **Commands** (`Cmd` enum) applied through a
 *   `Session`, which commits the result and bumps a version counter
 * - A failed command leaves the session untouched: either a fully-spliced
 *   document comes back or a typed error does, never a partial splice
 *
 * ### 3. Stable Block Identity via Keys
 * - `BlockKey`s survive edits: the block under the cursor keeps its key when
 *   an insertion retypes it, so host-side references stay valid
 * - Fresh keys come from an injected `KeyGenerator`, letting tests pin exact
 *   output structure with a sequential generator
 *
 * ### 4. Classification for Rendering
 * - `classify` maps a block's type to a `RenderKind` and style class token;
 *   the host consults it per visible block and never inspects types itself
 *
 * ## Module Structure
 *
 * - **`document`**: `Block`, `BlockType`, `Document`, `Selection` model types
 * - **`keys`**: stable block identity and key generation
 * - **`templates`**: the four insertion kinds and their block-run templates
 * - **`engine`**: the splice transformation (`insert_schema`, `insert_text`)
 * - **`classify`**: per-block rendering classification
 * - **`commands`**: `Cmd` enum and the `Session` apply loop
 * - **`patch`**: edit result metadata (new selection, version)
 * - **`error`**: typed failure taxonomy
 *
 * ## Usage Pattern
 *
 * ```rust
 * use schemata_engine::editing::*;
 *
 * // 1. Host builds the model (usually from its own import format)
 * let mut keys = UuidKeys;
 * let block = Block::new(keys.next_key(), BlockType::Plain, "hello");
 * let selection = Selection::caret(block.key().clone(), 0);
 * let document = Document::new(vec![block]).unwrap();
 *
 * // 2. Session owns the authoritative state
 * let mut session = Session::new(document, selection, keys);
 *
 * // 3. User gestures arrive as commands
 * let patch = session.apply(Cmd::InsertSchema { kind: InsertionKind::Bar }).unwrap();
 * assert_eq!(patch.version, 1);
 *
 * // 4. Host re-renders, consulting the classifier per block
 * for block in session.document().blocks() {
 *     let class = classify(block);
 *     println!("{} -> {}", block.text(), class.style_class);
 * }
 * ```
 */

// Module exports
pub mod classify;
pub mod commands;
pub mod document;
pub mod engine;
pub mod error;
pub mod keys;
pub mod patch;
pub mod templates;

// Public API re-exports
pub use classify::{Classification, RenderKind, classify};
pub use commands::{Cmd, Session};
pub use document::{Block, BlockType, Document, Selection};
pub use engine::{insert_schema, insert_text};
pub use error::EngineError;
pub use keys::{BlockKey, KeyGenerator, SequentialKeys, UuidKeys};
pub use patch::Patch;
pub use templates::{InsertionKind, Slot, template_for};
