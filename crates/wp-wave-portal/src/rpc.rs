//! JSON-RPC payload shapes and hex helpers for the EIP-1193 requests the
//! adapter issues.

use alloy_primitives::{B256, hex};
use serde::Deserialize;
use serde_json::Value;
use wp_chain_client::{ChainError, ChainResult};

pub(crate) fn decode<T: for<'de> Deserialize<'de>>(method: &str, value: Value) -> ChainResult<T> {
    serde_json::from_value(value).map_err(|e| ChainError::Decode(format!("{method}: {e}")))
}

pub fn parse_quantity(raw: &str) -> ChainResult<u64> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Decode(format!("quantity {raw:?} lacks 0x prefix")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainError::Decode(format!("quantity {raw:?}: {e}")))
}

pub fn quantity(value: u64) -> String {
    format!("{value:#x}")
}

pub fn parse_bytes(raw: &str) -> ChainResult<Vec<u8>> {
    hex::decode(raw).map_err(|e| ChainError::Decode(format!("hex data: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcReceipt {
    pub block_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcLog {
    pub topics: Vec<B256>,
    pub data: String,
}
