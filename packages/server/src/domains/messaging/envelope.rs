use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The application flavour an event is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Flavour {
    Consumer,
    Pro,
}

/// Wrapper carried by every published notification. `uid` identifies who the
/// event concerns; the payload is opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    pub uid: String,
    pub flavour: Flavour,
    pub payload: serde_json::Value,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = NotificationEnvelope {
            uid: "+254711223344".to_string(),
            flavour: Flavour::Consumer,
            payload: json!({ "channel": "sms" }),
            metadata: HashMap::new(),
        };

        let encoded = serde_json::to_string(&envelope).unwrap();
        let decoded: NotificationEnvelope = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn flavour_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Flavour::Consumer).unwrap(),
            r#""CONSUMER""#
        );
        assert_eq!(serde_json::to_string(&Flavour::Pro).unwrap(), r#""PRO""#);
    }
}
