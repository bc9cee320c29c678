//! Polling client for the game service's committed move list

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use gantry_core::{MoveRequest, PieceKind, Square};

use crate::config::Config;
use crate::error::DriverError;

/// One committed move as reported by the game service.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub is_white: bool,
    #[serde(default)]
    pub is_capture: bool,
    #[serde(default)]
    pub is_promotion: bool,
    #[serde(default)]
    pub is_castle: bool,
    /// Who issued the move ("player", "coach", ...)
    #[serde(default)]
    pub source: String,
}

impl MoveRecord {
    /// Promotion records carry only a flag; the staged piece defaults
    /// to a queen.
    pub fn to_request(&self) -> MoveRequest {
        MoveRequest {
            from: self.from,
            to: self.to,
            is_white: self.is_white,
            is_capture: self.is_capture,
            is_castle: self.is_castle,
            promotion: self.is_promotion.then_some(PieceKind::Queen),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveRecord>,
}

/// HTTP client polling the game service for committed moves.
pub struct GameClient {
    client: Client,
    moves_url: String,
}

impl GameClient {
    pub fn new(config: &Config) -> Result<Self, DriverError> {
        let client = Client::builder()
            .user_agent("GantryChess/1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            moves_url: config.moves_url(),
        })
    }

    /// Fetch the full committed move list, oldest first. The caller
    /// keeps the cursor into this list.
    pub async fn fetch_moves(&self) -> Result<Vec<MoveRecord>, DriverError> {
        let response = self
            .client
            .get(&self.moves_url)
            .send()
            .await?
            .error_for_status()?;
        let body: MovesResponse = response.json().await?;
        debug!(count = body.moves.len(), "Fetched move list");
        Ok(body.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let record: MoveRecord = serde_json::from_str(
            r#"{
                "from": "e4",
                "to": "d5",
                "is_white": true,
                "is_capture": true,
                "is_promotion": false,
                "is_castle": false,
                "source": "coach"
            }"#,
        )
        .unwrap();
        assert_eq!(record.from.to_string(), "e4");
        assert_eq!(record.to.to_string(), "d5");
        assert!(record.is_capture);
        assert_eq!(record.source, "coach");
    }

    #[test]
    fn test_decode_defaults_missing_flags() {
        let record: MoveRecord =
            serde_json::from_str(r#"{"from": "e2", "to": "e4", "is_white": false}"#).unwrap();
        assert!(!record.is_capture);
        assert!(!record.is_promotion);
        assert!(!record.is_castle);
        assert_eq!(record.source, "");
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let record: MoveRecord = serde_json::from_str(
            r#"{"from": "e7", "to": "e8", "is_white": true, "is_promotion": true}"#,
        )
        .unwrap();
        assert_eq!(record.to_request().promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn test_rejects_malformed_square() {
        let result =
            serde_json::from_str::<MoveRecord>(r#"{"from": "e9", "to": "e4", "is_white": true}"#);
        assert!(result.is_err());
    }
}
