use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `[lon, lat, alt_m, speed_mps]`, serialized as a 4-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint(pub f64, pub f64, pub f64, pub f64);

impl PathPoint {
    pub fn new(lon: f64, lat: f64, alt: f64, speed: f64) -> Self {
        Self(lon, lat, alt, speed)
    }

    pub fn lon(&self) -> f64 { self.0 }
    pub fn lat(&self) -> f64 { self.1 }
    pub fn alt(&self) -> f64 { self.2 }
    pub fn speed(&self) -> f64 { self.3 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathUpdate {
    pub points: Vec<PathPoint>,
}

impl PathUpdate {
    /// The fixed three-point path sent by the companion page.
    pub fn demo() -> Self {
        Self {
            points: vec![
                PathPoint::new(116.39, 39.9, 100.0, 5.0),
                PathPoint::new(116.40, 39.905, 100.0, 5.0),
                PathPoint::new(116.41, 39.91, 100.0, 5.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WsMessage {
    #[serde(rename = "path.update")]
    PathUpdate(PathUpdate),
    #[serde(rename = "ack")]
    Ack { event: String, count: usize },
    #[serde(rename = "echo")]
    Echo { data: Value },
    #[serde(rename = "telemetry")]
    Telemetry {
        pose: Value,
        battery: f64,
        link: Value,
        #[serde(default)]
        alerts: Vec<String>,
    },
}

impl WsMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_demo_path_update_shape() {
        let msg = WsMessage::PathUpdate(PathUpdate::demo());
        let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(v["type"], "path.update");
        assert_eq!(v["points"].as_array().unwrap().len(), 3);
        assert_eq!(v["points"][1], json!([116.40, 39.905, 100.0, 5.0]));

        let first = PathUpdate::demo().points[0];
        assert_eq!((first.lon(), first.lat(), first.alt(), first.speed()), (116.39, 39.9, 100.0, 5.0));
    }

    #[test]
    fn test_parse_ack() {
        let msg: WsMessage =
            serde_json::from_str(r#"{"type":"ack","event":"path.update","count":3}"#).unwrap();
        assert_eq!(msg, WsMessage::Ack { event: "path.update".into(), count: 3 });
    }

    #[test]
    fn test_telemetry_alerts_default_empty() {
        let msg: WsMessage = serde_json::from_str(
            r#"{"type":"telemetry","pose":{"x":1},"battery":88.5,"link":{"rssi":-60}}"#,
        )
        .unwrap();
        match msg {
            WsMessage::Telemetry { battery, alerts, .. } => {
                assert_eq!(battery, 88.5);
                assert!(alerts.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
