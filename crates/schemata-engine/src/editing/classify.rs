use crate::editing::document::{Block, BlockType};

/// Rendering strategy for a block, consumed by the host per visible block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Regular text block, rendered by the host's default text view
    Plain,
    /// Main body row of a schemata diagram
    SchemaMain,
    /// Upper entry row of a schemata diagram
    SchemaEntry,
    /// Lower exit row of a schemata diagram
    SchemaExit,
}

/// Classifier output: which view component applies and its style class token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub render_kind: RenderKind,
    pub style_class: &'static str,
}

/// Classify a block for rendering.
///
/// Pure function of the block's type alone; text and key are ignored.
/// Total over the type vocabulary: unrecognized (host-defined) types fall
/// through to plain rendering rather than failing.
pub fn classify(block: &Block) -> Classification {
    match block.block_type() {
        BlockType::Schema => Classification {
            render_kind: RenderKind::SchemaMain,
            style_class: "schemata",
        },
        BlockType::SchemaEntry => Classification {
            render_kind: RenderKind::SchemaEntry,
            style_class: "schemata_up",
        },
        BlockType::SchemaExit => Classification {
            render_kind: RenderKind::SchemaExit,
            style_class: "schemata_down",
        },
        BlockType::Plain | BlockType::Custom(_) => Classification {
            render_kind: RenderKind::Plain,
            style_class: "block",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::keys::BlockKey;
    use rstest::rstest;

    fn block(block_type: BlockType) -> Block {
        Block::new(BlockKey::from("k1"), block_type, "ignored")
    }

    #[rstest]
    #[case(BlockType::Schema, RenderKind::SchemaMain, "schemata")]
    #[case(BlockType::SchemaEntry, RenderKind::SchemaEntry, "schemata_up")]
    #[case(BlockType::SchemaExit, RenderKind::SchemaExit, "schemata_down")]
    #[case(BlockType::Plain, RenderKind::Plain, "block")]
    fn classification_mapping(
        #[case] block_type: BlockType,
        #[case] render_kind: RenderKind,
        #[case] style_class: &str,
    ) {
        let class = classify(&block(block_type));
        assert_eq!(class.render_kind, render_kind);
        assert_eq!(class.style_class, style_class);
    }

    #[test]
    fn host_defined_types_fall_through_to_plain() {
        let class = classify(&block(BlockType::Custom("atomic".to_string())));
        assert_eq!(class.render_kind, RenderKind::Plain);
        assert_eq!(class.style_class, "block");
    }

    #[test]
    fn classification_ignores_text_and_key() {
        let a = Block::new(BlockKey::from("k1"), BlockType::Schema, "one");
        let b = Block::new(BlockKey::from("k2"), BlockType::Schema, "two");
        assert_eq!(classify(&a), classify(&b));
        // Idempotent: same block classified twice yields the same result
        assert_eq!(classify(&a), classify(&a));
    }
}
