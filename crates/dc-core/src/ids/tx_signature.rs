use serde::{Deserialize, Serialize};

use super::id_macro::impl_string_id;

/// Base58 signature of a submitted transaction, as returned by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxSignature(String);

impl_string_id!(TxSignature);
