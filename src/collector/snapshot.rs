//! Point-in-time view of the node, built once per poll.
//!
//! A `Snapshot` can only be obtained from `SnapshotBuilder::finish`, which is
//! where `rpc_up` is derived; nothing mutates it afterwards.

use serde::Serialize;
use std::fmt;

use crate::rpc::{ClientError, ErrorKind, SyncProgress, SyncStatus};

/// The three facts a poll collects, in poll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BlockHeight,
    ChainId,
    SyncStatus,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::BlockHeight, Field::ChainId, Field::SyncStatus];

    /// Human-readable prefix used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::BlockHeight => "block number",
            Field::ChainId => "chain id",
            Field::SyncStatus => "sync status",
        }
    }

    /// Value for the `field` metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::BlockHeight => "block_height",
            Field::ChainId => "chain_id",
            Field::SyncStatus => "sync_status",
        }
    }
}

/// A failed call recorded against the field it was meant to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, err: &ClientError) -> Self {
        Self { field, kind: err.kind(), message: err.to_string() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    block_height: u64,
    chain_id: u64,
    sync: SyncStatus,
    rpc_up: bool,
    errors: Vec<FieldError>,
}

impl Snapshot {
    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync
    }

    pub fn syncing(&self) -> bool {
        self.sync.is_syncing()
    }

    pub fn sync_progress(&self) -> Option<SyncProgress> {
        self.sync.progress()
    }

    /// True iff every call of the poll succeeded.
    pub fn rpc_up(&self) -> bool {
        self.rpc_up
    }

    /// Failures in poll order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// All failures joined as `"<field>: <error>; <field>: <error>"`.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(self.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
    }
}

/// Accumulates call outcomes field by field. Failed fields keep their zero value.
#[derive(Debug)]
pub struct SnapshotBuilder {
    block_height: u64,
    chain_id: u64,
    sync: SyncStatus,
    errors: Vec<FieldError>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self { block_height: 0, chain_id: 0, sync: SyncStatus::NotSyncing, errors: Vec::new() }
    }

    pub fn block_height(&mut self, outcome: Result<u64, ClientError>) -> &mut Self {
        match outcome {
            Ok(v) => self.block_height = v,
            Err(e) => self.fail(Field::BlockHeight, &e),
        }
        self
    }

    pub fn chain_id(&mut self, outcome: Result<u64, ClientError>) -> &mut Self {
        match outcome {
            Ok(v) => self.chain_id = v,
            Err(e) => self.fail(Field::ChainId, &e),
        }
        self
    }

    pub fn sync_status(&mut self, outcome: Result<SyncStatus, ClientError>) -> &mut Self {
        match outcome {
            Ok(v) => self.sync = v,
            Err(e) => self.fail(Field::SyncStatus, &e),
        }
        self
    }

    fn fail(&mut self, field: Field, err: &ClientError) {
        self.errors.push(FieldError::new(field, err));
    }

    pub fn finish(self) -> Snapshot {
        Snapshot {
            block_height: self.block_height,
            chain_id: self.chain_id,
            sync: self.sync,
            rpc_up: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}
