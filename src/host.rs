//! Capability interface to the host document store.
//!
//! The host owns a mutable, attribute-rich outline tree. This crate never
//! holds an owned copy of it: all access goes through opaque handles and the
//! [`HostDocument`] trait, and tree snapshots are re-resolved at the start of
//! every operation rather than cached across mutations.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HostError;

/// Stable handle to a block owned by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockId(pub String);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a page owned by the host
#[derive(Debug, Clone)]
pub struct PageRef {
    pub id: String,
    pub name: String,
}

/// One node of a page snapshot tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub id: BlockId,
    pub content: String,
    pub children: Vec<BlockNode>,
}

/// Options for [`HostDocument::insert_block`]
#[derive(Debug, Clone, Default)]
pub struct InsertOptions {
    /// Insert after the reference block instead of beneath it.
    pub sibling: bool,
    /// Property bag attached to the new block.
    pub properties: BTreeMap<String, Value>,
}

impl InsertOptions {
    pub fn sibling() -> Self {
        Self {
            sibling: true,
            ..Self::default()
        }
    }
}

/// Operations the host document store must provide
#[async_trait]
pub trait HostDocument: Send + Sync {
    /// The block the user is currently editing, if any.
    async fn current_block(&self) -> Result<Option<BlockId>, HostError>;

    /// The page the user is currently viewing, if any.
    async fn current_page(&self) -> Result<Option<PageRef>, HostError>;

    /// Create a block at the very top of a page.
    async fn prepend_block_in_page(
        &self,
        page_id: &str,
        content: &str,
    ) -> Result<BlockId, HostError>;

    /// Create a block relative to `reference`: beneath it as its last child,
    /// or directly after it when `options.sibling` is set.
    async fn insert_block(
        &self,
        reference: &BlockId,
        content: &str,
        options: InsertOptions,
    ) -> Result<BlockId, HostError>;

    /// Create a block at the raw editing cursor.
    async fn insert_at_cursor(&self, content: &str) -> Result<BlockId, HostError>;

    /// Replace a block's content in place.
    async fn update_block(&self, block: &BlockId, content: &str) -> Result<(), HostError>;

    /// Remove a block and its subtree.
    async fn delete_block(&self, block: &BlockId) -> Result<(), HostError>;

    /// Full recursive snapshot of a page's block tree.
    async fn page_blocks_tree(&self, page_name: &str) -> Result<Vec<BlockNode>, HostError>;
}
