use crate::editing::document::Selection;

/// Result of applying a command through a session
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub new_selection: Selection,
    pub version: u64,
}
