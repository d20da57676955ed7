//! Mitigation Policy Builder
//!
//! Builds static-flow-pusher drop entries. Every value goes on the wire as a
//! string, which is what the Floodlight REST API expects.

use serde::{Serialize, Serializer};

/// Switch the drop rule is installed on
pub const TARGET_SWITCH: &str = "00:00:00:00:00:00:00:01";
/// Rule name
pub const RULE_NAME: &str = "block_bad_traffic";
/// Rule priority
pub const RULE_PRIORITY: u16 = 32768;
/// IPv4 ethertype
pub const ETH_TYPE_IPV4: u16 = 0x0800;

/// Flow action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowAction {
    /// Discard matching packets
    Drop,
}

/// Flow entry for the static flow pusher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRule {
    /// Target switch DPID
    #[serde(rename = "switch")]
    pub switch_id: String,
    /// Entry name
    pub name: String,
    /// Entry priority
    #[serde(serialize_with = "display")]
    pub priority: u16,
    /// Ethertype match
    #[serde(serialize_with = "hex16")]
    pub eth_type: u16,
    /// Source address match
    pub ipv4_src: String,
    /// Destination address match
    pub ipv4_dst: String,
    /// Install as active
    #[serde(serialize_with = "display")]
    pub active: bool,
    /// Action applied to matching packets
    pub actions: FlowAction,
}

fn display<T: std::fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

fn hex16<S: Serializer>(value: &u16, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:#06x}", value))
}

/// Builds drop rules from alert addressing
#[derive(Debug, Clone, Copy, Default)]
pub struct MitigationPolicyBuilder;

impl MitigationPolicyBuilder {
    /// Create builder
    pub fn new() -> Self {
        Self
    }

    /// Drop rule for traffic from `src` to `dst`
    pub fn build(&self, src: &str, dst: &str) -> FlowRule {
        FlowRule {
            switch_id: TARGET_SWITCH.into(),
            name: RULE_NAME.into(),
            priority: RULE_PRIORITY,
            eth_type: ETH_TYPE_IPV4,
            ipv4_src: src.into(),
            ipv4_dst: dst.into(),
            active: true,
            actions: FlowAction::Drop,
        }
    }
}
