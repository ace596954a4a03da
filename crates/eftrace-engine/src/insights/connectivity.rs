use chrono::{DateTime, Utc};
use eftrace_types::{EventKind, LogType, ParsedLogResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::selectors::DataPoint;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityInsight {
    pub addresses: Vec<AddressInsight>,
    /// x = epoch milliseconds, y = rtt, in event order
    pub rtt: Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInsight {
    pub address: String,
    pub connects: u64,
    pub disconnects: u64,
    pub timeouts: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

pub(super) fn build(results: &[ParsedLogResult]) -> ConnectivityInsight {
    let mut addresses: BTreeMap<String, AddressInsight> = BTreeMap::new();
    let mut rtt = Vec::new();

    let events = results
        .iter()
        .flat_map(|r| r.events.iter())
        .filter(|e| e.log_type == LogType::NetworkConnection);

    for event in events {
        let address = event.fields.str("address").unwrap_or("unknown");
        let ts = event.timestamp;
        let entry = addresses
            .entry(address.to_string())
            .or_insert_with(|| AddressInsight {
                address: address.to_string(),
                connects: 0,
                disconnects: 0,
                timeouts: 0,
                first_seen: ts,
                last_seen: ts,
            });
        entry.first_seen = entry.first_seen.min(ts);
        entry.last_seen = entry.last_seen.max(ts);

        match event.kind() {
            EventKind::NetworkConnect => entry.connects += 1,
            EventKind::NetworkDisconnect => entry.disconnects += 1,
            EventKind::NetworkTimeout => entry.timeouts += 1,
            EventKind::NetworkStatistics => {
                if let Some(value) = event.fields.f64("rtt") {
                    rtt.push(DataPoint::new(ts.timestamp_millis() as f64, value));
                }
            }
            _ => {}
        }
    }

    ConnectivityInsight {
        addresses: addresses.into_values().collect(),
        rtt,
    }
}
