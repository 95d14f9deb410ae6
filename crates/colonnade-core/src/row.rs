use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::clustering::{ClusteringSpec, ClusteringValue};
use crate::error::CoreError;
use crate::keys::PartitionKey;

/// A record stored in a wide-column table.
///
/// Ties a record type to its table, its partition key and its clustering
/// columns. Engines only ever see the encoded forms.
pub trait Row: Serialize + DeserializeOwned + Send + Sync + 'static {
    type Partition: PartitionKey;

    const CLUSTERING: &'static ClusteringSpec;

    fn partition_key(&self) -> Result<Self::Partition, CoreError>;

    fn clustering_values(&self) -> Vec<ClusteringValue>;

    /// Checks invariants that must hold before the row is written.
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }

    fn clustering_key(&self) -> Result<String, CoreError> {
        Self::CLUSTERING.encode_key(&self.clustering_values())
    }

    fn table() -> &'static str {
        Self::CLUSTERING.table
    }

    fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
