//! The line-delimited JSON wire envelope.
//!
//! The loosely-typed `data` map is only ever held at this boundary;
//! [`super::message::InboundMessage`] and
//! [`super::message::OutboundMessage`] are the strongly-typed variants
//! the rest of the engine actually works with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub ts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    #[must_use]
    pub fn new(msg_type: impl Into<String>, ts_ms: i64, data: Option<Value>) -> Self {
        Envelope {
            msg_type: msg_type.into(),
            ts: ts_ms,
            id: None,
            data,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let env = Envelope::new("get_stats", 1_700_000_000_000, None).with_id("req-1");
        let line = serde_json::to_string(&env).unwrap();
        let back: Envelope = serde_json::from_str(&line).unwrap();
        assert_eq!(env.msg_type, back.msg_type);
        assert_eq!(env.ts, back.ts);
        assert_eq!(env.id, back.id);
    }

    #[test]
    fn data_omitted_when_absent() {
        let env = Envelope::new("pause", 0, None);
        let line = serde_json::to_string(&env).unwrap();
        assert!(!line.contains("\"data\""));
        assert!(!line.contains("\"id\""));
    }
}
