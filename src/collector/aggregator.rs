use std::sync::Arc;
use tracing::warn;

use crate::collector::snapshot::{Snapshot, SnapshotBuilder};
use crate::rpc::RpcClient;

/// Turns the three node calls into one `Snapshot`.
///
/// Calls run in a fixed order and independently: a failed call zeroes its own
/// field and is recorded, the remaining calls still run. Nothing is retried.
#[derive(Clone)]
pub struct SnapshotAggregator {
    client: Arc<RpcClient>,
}

impl SnapshotAggregator {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    pub async fn poll(&self) -> Snapshot {
        let mut builder = SnapshotBuilder::new();
        builder
            .block_height(self.client.get_block_number().await)
            .chain_id(self.client.get_chain_id().await)
            .sync_status(self.client.get_sync_status().await);
        let snapshot = builder.finish();

        for err in snapshot.errors() {
            warn!(
                field = err.field.as_str(),
                kind = err.kind.as_str(),
                endpoint = %self.client.endpoint(),
                "error fetching {}: {}",
                err.field.label(),
                err.message
            );
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::snapshot::Field;
    use crate::rpc::client::tests::FakeNode;
    use crate::rpc::{ClientError, ErrorKind, SyncProgress};
    use serde_json::json;

    fn aggregator(node: FakeNode) -> (SnapshotAggregator, Arc<FakeNode>) {
        let node = Arc::new(node);
        let client = RpcClient::new("http://node.invalid:8545", node.clone());
        (SnapshotAggregator::new(Arc::new(client)), node)
    }

    #[tokio::test]
    async fn test_all_calls_succeed() {
        let (agg, _) = aggregator(FakeNode::healthy());
        let snap = agg.poll().await;
        assert!(snap.rpc_up());
        assert_eq!(snap.block_height(), 10_235_456);
        assert_eq!(snap.chain_id(), 2345);
        assert!(!snap.syncing());
        assert!(snap.errors().is_empty());
    }

    #[tokio::test]
    async fn test_block_height_failure_keeps_other_fields() {
        let node = FakeNode::healthy().fail("eth_blockNumber", ClientError::Transport("connection reset".into()));
        let (agg, _) = aggregator(node);
        let snap = agg.poll().await;

        assert!(!snap.rpc_up());
        assert_eq!(snap.block_height(), 0);
        assert_eq!(snap.chain_id(), 2345);
        assert!(!snap.syncing());
        assert_eq!(snap.errors().len(), 1);
        assert_eq!(snap.errors()[0].field, Field::BlockHeight);
    }

    #[tokio::test]
    async fn test_http_500_everywhere() {
        let node = FakeNode::default()
            .reply_raw("eth_blockNumber", 500, "boom")
            .reply_raw("eth_chainId", 500, "boom")
            .reply_raw("eth_syncing", 500, "boom");
        let (agg, node) = aggregator(node);
        let snap = agg.poll().await;

        assert!(!snap.rpc_up());
        assert_eq!(snap.errors().len(), 3);
        assert!(snap.errors().iter().all(|e| e.kind == ErrorKind::Transport));
        let fields: Vec<Field> = snap.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        // every call still attempted, once each
        assert_eq!(node.requests.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_syncing_progress_carried() {
        let node = FakeNode::healthy().result(
            "eth_syncing",
            json!({"startingBlock": "0x0", "currentBlock": "0x64", "highestBlock": "0xc8"}),
        );
        let (agg, _) = aggregator(node);
        let snap = agg.poll().await;
        assert!(snap.rpc_up());
        assert!(snap.syncing());
        assert_eq!(
            snap.sync_progress(),
            Some(SyncProgress { starting_block: 0, current_block: 100, highest_block: 200 })
        );
    }

    #[tokio::test]
    async fn test_sync_failure_reports_not_syncing() {
        let node = FakeNode::healthy().result("eth_syncing", json!("weird"));
        let (agg, _) = aggregator(node);
        let snap = agg.poll().await;
        assert!(!snap.rpc_up());
        assert!(!snap.syncing());
        assert_eq!(snap.sync_progress(), None);
        assert_eq!(snap.error_for(Field::SyncStatus).map(|e| e.kind), Some(ErrorKind::Decode));
        assert_eq!(snap.block_height(), 10_235_456);
    }
}
