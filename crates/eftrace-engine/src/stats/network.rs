use eftrace_types::{EventKind, Fields, LogEvent, LogType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Incremental mean: `mean += (x - mean) / n` with `n` already counting `x`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningAverage {
    pub samples: u64,
    pub mean: f64,
}

impl RunningAverage {
    pub fn push(&mut self, x: f64) {
        self.samples += 1;
        self.mean += (x - self.mean) / self.samples as f64;
    }

    pub fn value(&self) -> Option<f64> {
        (self.samples > 0).then_some(self.mean)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressStats {
    pub connects: u64,
    pub disconnects: u64,
    pub timeouts: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_connections: u64,
    pub total_disconnects: u64,
    pub total_timeouts: u64,
    /// Keyed by `address`, or "unknown" when the event has none
    pub by_address: BTreeMap<String, AddressStats>,
    pub rtt: RunningAverage,
    pub packets_lost: u64,
    pub packets_sent: u64,
    pub packets_received: u64,

    /// network-messages lines seen
    pub message_samples: u64,
    pub rpi: RunningAverage,
    pub lud: RunningAverage,
}

const UNKNOWN_ADDRESS: &str = "unknown";

/// Any finite non-negative number, rounded to the nearest packet
fn packet_count(fields: &Fields, key: &str) -> Option<u64> {
    fields
        .f64(key)
        .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
        .map(|n| n.round() as u64)
}

impl NetworkStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        match event.log_type {
            LogType::NetworkConnection => self.record_connection(event),
            LogType::NetworkMessages => self.record_messages(event),
            _ => {}
        }
    }

    fn record_connection(&mut self, event: &LogEvent) {
        let fields = &event.fields;
        let address = fields.str("address").unwrap_or(UNKNOWN_ADDRESS).to_string();
        let entry = self.by_address.entry(address).or_default();

        match event.kind() {
            EventKind::NetworkConnect => {
                self.total_connections += 1;
                entry.connects += 1;
            }
            EventKind::NetworkDisconnect => {
                self.total_disconnects += 1;
                entry.disconnects += 1;
            }
            EventKind::NetworkTimeout => {
                self.total_timeouts += 1;
                entry.timeouts += 1;
            }
            EventKind::NetworkStatistics => {
                if let Some(rtt) = fields.f64("rtt") {
                    self.rtt.push(rtt);
                }
                if let Some(lost) = packet_count(fields, "packetsLost") {
                    self.packets_lost += lost;
                }
                if let Some(sent) = packet_count(fields, "packetsSent") {
                    self.packets_sent += sent;
                }
                if let Some(received) = packet_count(fields, "packetsReceived") {
                    self.packets_received += received;
                }
            }
            _ => {}
        }
    }

    fn record_messages(&mut self, event: &LogEvent) {
        self.message_samples += 1;
        if let Some(rpi) = event.fields.f64("rpi") {
            self.rpi.push(rpi);
        }
        if let Some(lud) = event.fields.f64("lud") {
            self.lud.push(lud);
        }
    }

    /// Share of sent packets reported lost, if anything was sent
    pub fn packet_loss_ratio(&self) -> Option<f64> {
        (self.packets_sent > 0).then(|| self.packets_lost as f64 / self.packets_sent as f64)
    }
}
