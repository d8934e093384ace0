use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One leaderboard row as the WIRA backend encodes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub username: String,
    #[serde(rename = "c_class")]
    pub class_id: i64,
    pub score: i64,
}

/// Reads a stored payload as leaderboard rows.
///
/// The backend answers an empty page with `null`, which yields no rows.
pub fn decode_rankings(payload: &Value) -> Result<Vec<Ranking>, serde_json::Error> {
    if payload.is_null() {
        return Ok(Vec::new());
    }
    Vec::<Ranking>::deserialize(payload)
}
