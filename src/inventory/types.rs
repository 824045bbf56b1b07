//! Inventory record shapes, mirroring the state-management API's JSON.
//!
//! Field names follow the service's PascalCase wire format via serde
//! renames. Every struct tolerates absent optional fields so that older
//! service versions still decode.

use serde::{Deserialize, Serialize};

/// One IP address attached to an ethernet interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IpAddress {
    #[serde(rename = "IPAddress", default)]
    pub ip_address: String,
    #[serde(rename = "Network", default)]
    pub network: String,
}

/// A node's ethernet interface as reported by the inventory service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EthernetInterface {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "MACAddress", default)]
    pub mac_address: String,
    #[serde(rename = "ComponentID", default)]
    pub component_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "IPAddresses", default)]
    pub ip_addresses: Vec<IpAddress>,
}

impl EthernetInterface {
    /// First attached IP address, or empty when the interface has none.
    #[must_use]
    pub fn first_ip(&self) -> &str {
        self.ip_addresses.first().map_or("", |ip| ip.ip_address.as_str())
    }
}

/// A Redfish-manageable endpoint (typically a BMC).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedfishEndpoint {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Hostname", default)]
    pub hostname: String,
    #[serde(rename = "User", default)]
    pub user: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "IPAddress", default)]
    pub ip_address: String,
}

/// A cluster component (node, BMC, switch, ...) state record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Role", default)]
    pub role: String,
    #[serde(rename = "Enabled", default)]
    pub enabled: Option<bool>,
    #[serde(rename = "NID", default)]
    pub nid: Option<i64>,
    #[serde(rename = "Arch", default)]
    pub arch: String,
    #[serde(rename = "Class", default)]
    pub class: String,
}
