pub mod editing;

// Re-export key types for easier usage
pub use editing::{
    classify::*, commands::*, document::*, engine::*, error::*, keys::*, patch::*, templates::*,
};
