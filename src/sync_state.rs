use serde::{Deserialize, Serialize};

use crate::{bar_kind::BarKind, message_bus::SyncError, weight::Weight};

/// Logical channel every surface of the calculator talks on.
pub const CHANNEL_NAME: &str = "iwf-plate-calculator-sync";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SyncState {
    pub weight: Weight,
    pub bar_kind: BarKind,
}

impl SyncState {
    pub fn new(weight: Weight, bar_kind: BarKind) -> Self {
        SyncState { weight, bar_kind }
    }
}

impl Default for SyncState {
    /// Both surfaces open on a 25kg men's bar.
    fn default() -> Self {
        SyncState::new(Weight::kg(25), BarKind::Men)
    }
}

/// Wire form: `{"type":"UPDATE","weight":82.5,"barType":"WOMEN"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncMessage {
    #[serde(rename = "UPDATE")]
    Update {
        weight: Weight,
        #[serde(rename = "barType")]
        bar_type: BarKind,
    },
    /// Any `type` this build does not understand.
    #[serde(other)]
    Unknown,
}

impl SyncMessage {
    /// # Errors
    pub fn encode(&self) -> Result<String, SyncError> {
        serde_json::to_string(self).map_err(SyncError::Encode)
    }

    /// # Errors
    pub fn decode(payload: &str) -> Result<Self, SyncError> {
        serde_json::from_str(payload).map_err(SyncError::Decode)
    }
}

impl From<SyncState> for SyncMessage {
    fn from(state: SyncState) -> Self {
        SyncMessage::Update {
            weight: state.weight,
            bar_type: state.bar_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_update_in_wire_shape() {
        let message = SyncMessage::from(SyncState::new(Weight::from_grams(82_500), BarKind::Women));
        let value: serde_json::Value = serde_json::from_str(&message.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "UPDATE", "weight": 82.5, "barType": "WOMEN" })
        );
    }

    #[test]
    fn decodes_integer_weights() {
        let message = SyncMessage::decode(r#"{"type":"UPDATE","weight":80,"barType":"WOMEN"}"#).unwrap();
        assert_eq!(
            message,
            SyncMessage::Update {
                weight: Weight::kg(80),
                bar_type: BarKind::Women,
            }
        );
    }

    #[test]
    fn unknown_types_decode_to_unknown() {
        assert_eq!(
            SyncMessage::decode(r#"{"type":"PING","at":12}"#).unwrap(),
            SyncMessage::Unknown
        );
    }

    #[test]
    fn malformed_updates_fail_to_decode() {
        assert!(SyncMessage::decode(r#"{"type":"UPDATE","weight":80}"#).is_err());
        assert!(SyncMessage::decode(r#"{"type":"UPDATE","weight":-1,"barType":"MEN"}"#).is_err());
        assert!(SyncMessage::decode("not json").is_err());
    }
}
