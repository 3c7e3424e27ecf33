use serde::{Deserialize, Serialize};

use super::id_macro::impl_string_id;

/// Locator of file bytes in the content-addressed store (an IPFS CID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl_string_id!(ContentAddress);
