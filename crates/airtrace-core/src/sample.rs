use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder for any descriptive field the platform could not provide.
pub const UNKNOWN: &str = "Unknown";

/// Latency and throughput figures are finite and non-negative.
pub fn is_valid_measurement(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Wireless link metadata as reported by a [`crate::LinkInfoProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub ssid: String,
    pub bssid: String,
    /// Platform-dependent units: dBm on some adapters, percent on others.
    pub signal: Option<i32>,
    pub frequency: String,
}

impl LinkInfo {
    /// The all-unknown reading used when the adapter cannot be queried.
    pub fn unknown() -> Self {
        Self {
            ssid: UNKNOWN.to_string(),
            bssid: UNKNOWN.to_string(),
            signal: None,
            frequency: UNKNOWN.to_string(),
        }
    }

    /// Replace empty descriptive fields with [`UNKNOWN`].
    pub fn normalized(mut self) -> Self {
        for field in [&mut self.ssid, &mut self.bssid, &mut self.frequency] {
            if field.trim().is_empty() {
                *field = UNKNOWN.to_string();
            }
        }
        self
    }
}

impl Default for LinkInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Download/upload rates in Mbps from a [`crate::ThroughputProbe`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
}

impl Throughput {
    pub fn new(download_mbps: f64, upload_mbps: f64) -> Self {
        Self {
            download_mbps: Some(download_mbps),
            upload_mbps: Some(upload_mbps),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// One timestamped observation of link, latency and throughput state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub location: String,
    pub ssid: String,
    pub bssid: String,
    pub signal: Option<i32>,
    pub frequency: String,
    pub latency_ms: Option<f64>,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
}

impl Sample {
    /// Build a periodic sample. Throughput is never part of a periodic reading.
    pub fn from_readings(
        timestamp: NaiveDateTime,
        location: impl Into<String>,
        link: LinkInfo,
        latency_ms: Option<f64>,
    ) -> Self {
        let link = link.normalized();
        let location = location.into();

        Self {
            timestamp,
            location: if location.trim().is_empty() {
                UNKNOWN.to_string()
            } else {
                location
            },
            ssid: link.ssid,
            bssid: link.bssid,
            signal: link.signal,
            frequency: link.frequency,
            latency_ms: latency_ms.filter(|ms| is_valid_measurement(*ms)),
            download_mbps: None,
            upload_mbps: None,
        }
    }

    /// Attach throughput figures. Negative or non-finite rates are stored as null.
    pub fn with_throughput(mut self, throughput: Throughput) -> Self {
        self.download_mbps = throughput.download_mbps.filter(|v| is_valid_measurement(*v));
        self.upload_mbps = throughput.upload_mbps.filter(|v| is_valid_measurement(*v));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_from_readings_fills_unknown_fields() {
        let link = LinkInfo {
            ssid: "".to_string(),
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            signal: Some(-52),
            frequency: " ".to_string(),
        };

        let sample = Sample::from_readings(ts(), "", link, Some(12.5));

        assert_eq!(sample.location, UNKNOWN);
        assert_eq!(sample.ssid, UNKNOWN);
        assert_eq!(sample.bssid, "aa:bb:cc:dd:ee:ff");
        assert_eq!(sample.frequency, UNKNOWN);
        assert_eq!(sample.signal, Some(-52));
        assert_eq!(sample.download_mbps, None);
        assert_eq!(sample.upload_mbps, None);
    }

    #[test]
    fn test_negative_latency_is_dropped() {
        let sample = Sample::from_readings(ts(), "Hall", LinkInfo::unknown(), Some(-1.0));
        assert_eq!(sample.latency_ms, None);
    }

    #[test]
    fn test_invalid_throughput_is_dropped() {
        let sample = Sample::from_readings(ts(), "Hall", LinkInfo::unknown(), None)
            .with_throughput(Throughput::new(f64::NAN, -1.0));
        assert_eq!(sample.download_mbps, None);
        assert_eq!(sample.upload_mbps, None);

        let sample = Sample::from_readings(ts(), "Hall", LinkInfo::unknown(), None)
            .with_throughput(Throughput::new(f64::INFINITY, 12.5));
        assert_eq!(sample.download_mbps, None);
        assert_eq!(sample.upload_mbps, Some(12.5));
    }
}
