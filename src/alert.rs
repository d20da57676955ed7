//! Alert Model
//!
//! One alert is decoded from one JSON document and never mutated afterwards.
//! Addresses are optional at decode time; they only become mandatory once
//! the evaluator asks for mitigation (see [`Alert::endpoints`]).

use crate::evaluator::RiskSignals;
use crate::{RelayError, Result};
use serde::Deserialize;

/// Incoming attack alert
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    /// Opaque identifier, echoed in the acknowledgment
    pub alert_id: String,
    /// Classifier confidence, nominally in [0.0, 1.0]
    pub classifier_confidence: f64,
    /// Packet flag indicators
    pub flags: AlertFlags,
    /// Source address of the suspicious flow
    #[serde(default)]
    pub source_ip: Option<String>,
    /// Destination address of the suspicious flow
    #[serde(default)]
    pub destination_ip: Option<String>,
    /// Detection time as reported by the sensor
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Transport protocol, e.g. "TCP"
    #[serde(default)]
    pub protocol: Option<String>,
    /// Action suggested by the classifier
    #[serde(default)]
    pub recommended_action: Option<String>,
}

/// Flag indicators reported with an alert
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AlertFlags {
    /// Fragmented packet seen
    #[serde(rename = "FRAG")]
    pub frag: bool,
    /// TCP reset seen
    #[serde(rename = "RST")]
    pub rst: bool,
    /// TCP SYN seen
    #[serde(rename = "SYN", default)]
    pub syn: bool,
    /// TCP FIN seen
    #[serde(rename = "FIN", default)]
    pub fin: bool,
}

impl Alert {
    /// Decode an alert from a request body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| RelayError::MalformedInput(e.to_string()))
    }

    /// Signals the evaluator decides on
    pub fn signals(&self) -> RiskSignals {
        RiskSignals {
            confidence: self.classifier_confidence,
            frag: self.flags.frag,
            rst: self.flags.rst,
        }
    }

    /// Source and destination, required once mitigation is triggered
    pub fn endpoints(&self) -> Result<(&str, &str)> {
        let src = required(self.source_ip.as_deref(), "source_ip")?;
        let dst = required(self.destination_ip.as_deref(), "destination_ip")?;
        Ok((src, dst))
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(RelayError::MalformedInput(format!("empty field `{}`", field))),
        None => Err(RelayError::MalformedInput(format!("missing field `{}`", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "alert_id": "e7b3f13e-1234-45ab-b123-1234567890ab",
        "timestamp": "2025-07-05T12:34:56Z",
        "source_ip": "192.168.1.10",
        "destination_ip": "10.0.0.5",
        "protocol": "TCP",
        "flags": {"RST": true, "FIN": false, "SYN": false, "FRAG": true},
        "classifier_confidence": 0.92,
        "recommended_action": "DROP_FRAGMENT"
    }"#;

    #[test]
    fn test_parse_full_alert() {
        let alert = Alert::from_slice(FULL.as_bytes()).unwrap();
        assert_eq!(alert.alert_id, "e7b3f13e-1234-45ab-b123-1234567890ab");
        assert_eq!(alert.classifier_confidence, 0.92);
        assert!(alert.flags.frag);
        assert!(alert.flags.rst);
        assert!(!alert.flags.syn);
        assert_eq!(alert.protocol.as_deref(), Some("TCP"));
        assert_eq!(alert.recommended_action.as_deref(), Some("DROP_FRAGMENT"));
        assert_eq!(alert.endpoints().unwrap(), ("192.168.1.10", "10.0.0.5"));
    }

    #[test]
    fn test_minimal_alert_without_addresses() {
        let body = br#"{"alert_id":"a1","classifier_confidence":0.1,"flags":{"FRAG":false,"RST":false}}"#;
        let alert = Alert::from_slice(body).unwrap();
        assert!(!alert.flags.fin);
        assert!(alert.timestamp.is_none());
        assert!(matches!(alert.endpoints(), Err(RelayError::MalformedInput(_))));
    }

    #[test]
    fn test_missing_required_fields() {
        let cases: [&[u8]; 5] = [
            br#"{"classifier_confidence":0.5,"flags":{"FRAG":false,"RST":false}}"#,
            br#"{"alert_id":"a","flags":{"FRAG":false,"RST":false}}"#,
            br#"{"alert_id":"a","classifier_confidence":0.5}"#,
            br#"{"alert_id":"a","classifier_confidence":0.5,"flags":{"RST":false}}"#,
            br#"{"alert_id":"a","classifier_confidence":0.5,"flags":{"FRAG":false}}"#,
        ];
        for body in cases {
            assert!(matches!(Alert::from_slice(body), Err(RelayError::MalformedInput(_))));
        }
    }

    #[test]
    fn test_wrong_types_and_garbage() {
        assert!(Alert::from_slice(b"not json").is_err());
        assert!(Alert::from_slice(b"").is_err());
        assert!(Alert::from_slice(
            br#"{"alert_id":"a","classifier_confidence":"high","flags":{"FRAG":false,"RST":false}}"#
        )
        .is_err());
    }

    #[test]
    fn test_empty_address_rejected() {
        let body = br#"{"alert_id":"a","classifier_confidence":1.0,"flags":{"FRAG":false,"RST":false},"source_ip":"","destination_ip":"10.0.0.9"}"#;
        let alert = Alert::from_slice(body).unwrap();
        assert!(alert.endpoints().is_err());
    }

    #[test]
    fn test_out_of_range_confidence_accepted() {
        let body = br#"{"alert_id":"a","classifier_confidence":7.5,"flags":{"FRAG":false,"RST":false}}"#;
        let alert = Alert::from_slice(body).unwrap();
        assert_eq!(alert.signals().confidence, 7.5);
    }
}
