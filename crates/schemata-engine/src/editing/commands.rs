use crate::editing::document::{Document, Selection};
use crate::editing::engine::{insert_schema, insert_text};
use crate::editing::error::EngineError;
use crate::editing::keys::{KeyGenerator, UuidKeys};
use crate::editing::patch::Patch;
use crate::editing::templates::InsertionKind;

/// Commands that can be applied to the editor state
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Splice a schemata block run in at the cursor
    InsertSchema { kind: InsertionKind },
    /// Insert a symbol/text at the caret, replacing the selected range
    InsertText { text: String },
    /// Move the cursor; both keys must resolve to blocks in the document
    SetSelection { selection: Selection },
}

/// Authoritative editor state: current document + selection, edited through
/// commands
///
/// The host holds exactly one session per open document and serializes
/// gestures through it: one user action, one `apply`, one commit. Each
/// successful apply swaps in the new document/selection pair atomically and
/// bumps the version; a failed apply changes nothing, so the session is
/// never left holding a partially-spliced document.
pub struct Session<G: KeyGenerator = UuidKeys> {
    document: Document,
    selection: Selection,
    version: u64,
    keys: G,
}

impl<G: KeyGenerator> Session<G> {
    pub fn new(document: Document, selection: Selection, keys: G) -> Self {
        Self {
            document,
            selection,
            version: 0,
            keys,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Version counter, incremented on each successful apply
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command, committing the result on success
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EngineError> {
        let (document, selection) = match cmd {
            Cmd::InsertSchema { kind } => {
                insert_schema(&self.document, &self.selection, kind, &mut self.keys)?
            }
            Cmd::InsertText { text } => insert_text(&self.document, &self.selection, &text)?,
            Cmd::SetSelection { selection } => {
                for key in [&selection.anchor_key, &selection.focus_key] {
                    if self.document.position_of(key).is_none() {
                        return Err(EngineError::BlockNotFound { key: key.clone() });
                    }
                }
                (self.document.clone(), selection)
            }
        };

        self.document = document;
        self.selection = selection;
        self.version += 1;

        Ok(Patch {
            new_selection: self.selection.clone(),
            version: self.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::document::{Block, BlockType};
    use crate::editing::keys::{BlockKey, SequentialKeys};
    use pretty_assertions::assert_eq;

    fn session() -> Session<SequentialKeys> {
        let doc = Document::new(vec![
            Block::new(BlockKey::from("a"), BlockType::Plain, "intro"),
            Block::new(BlockKey::from("b"), BlockType::Plain, "theme"),
        ])
        .unwrap();
        let sel = Selection::caret(BlockKey::from("b"), 0);
        Session::new(doc, sel, SequentialKeys::new())
    }

    #[test]
    fn apply_commits_and_bumps_version() {
        let mut session = session();

        let patch = session
            .apply(Cmd::InsertSchema {
                kind: InsertionKind::Half,
            })
            .unwrap();

        assert_eq!(patch.version, 1);
        assert_eq!(session.version(), 1);
        assert_eq!(session.document().len(), 6);
        // Selection carried through unchanged by schema insertion
        assert_eq!(patch.new_selection, Selection::caret(BlockKey::from("b"), 0));
    }

    #[test]
    fn failed_apply_leaves_session_untouched() {
        let mut session = session();
        session
            .apply(Cmd::SetSelection {
                selection: Selection::caret(BlockKey::from("a"), 2),
            })
            .unwrap();
        let doc_before = session.document().clone();
        let sel_before = session.selection().clone();
        let version_before = session.version();

        let err = session.apply(Cmd::SetSelection {
            selection: Selection::caret(BlockKey::from("zzz"), 0),
        });

        assert!(matches!(err, Err(EngineError::BlockNotFound { .. })));
        assert_eq!(session.document(), &doc_before);
        assert_eq!(session.selection(), &sel_before);
        assert_eq!(session.version(), version_before);
    }

    #[test]
    fn insert_text_moves_the_caret() {
        let mut session = session();

        let patch = session
            .apply(Cmd::InsertText {
                text: "~".to_string(),
            })
            .unwrap();

        assert_eq!(session.document().blocks()[1].text(), "~theme");
        assert_eq!(patch.new_selection, Selection::caret(BlockKey::from("b"), 1));
    }

    #[test]
    fn consecutive_insertions_replay_deterministically() {
        // Two sessions fed the same command stream end up identical
        let mut first = session();
        let mut second = session();

        for cmd in [
            Cmd::InsertSchema {
                kind: InsertionKind::Bar,
            },
            Cmd::InsertText {
                text: "x".to_string(),
            },
        ] {
            first.apply(cmd.clone()).unwrap();
            second.apply(cmd).unwrap();
        }

        assert_eq!(first.document(), second.document());
        assert_eq!(first.selection(), second.selection());
    }
}
