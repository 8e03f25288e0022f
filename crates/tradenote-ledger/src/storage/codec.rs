//! 스냅샷 직렬화 형식.
//!
//! 형식: camelCase 키를 가진 TradeRecord 객체들의 JSON 배열 (삽입 순서).

use tradenote_core::TradeRecord;

use crate::error::{StoreError, StoreResult};

/// 컬렉션을 스냅샷 바이트로 직렬화합니다.
pub fn encode(records: &[TradeRecord]) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(records).map_err(|e| StoreError::Encode(e.to_string()))
}

/// 스냅샷 바이트를 컬렉션으로 역직렬화합니다.
///
/// 비어 있거나 공백뿐인 슬롯은 빈 컬렉션으로 취급합니다.
pub fn decode(bytes: &[u8]) -> StoreResult<Vec<TradeRecord>> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
}
