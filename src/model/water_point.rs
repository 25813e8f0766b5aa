// 🚰 Water Point - the source the household reports using

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterSourceType {
    Tapstand,
    Handpump,
    Spring,
    Well,
    RiverIntake,
    Other,
}

impl WaterSourceType {
    pub const ALL: [WaterSourceType; 6] = [
        WaterSourceType::Tapstand,
        WaterSourceType::Handpump,
        WaterSourceType::Spring,
        WaterSourceType::Well,
        WaterSourceType::RiverIntake,
        WaterSourceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WaterSourceType::Tapstand => "tapstand",
            WaterSourceType::Handpump => "handpump",
            WaterSourceType::Spring => "spring",
            WaterSourceType::Well => "well",
            WaterSourceType::RiverIntake => "river_intake",
            WaterSourceType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterPoint {
    pub water_point_id: String,
    pub submission_id: String,
    pub ward_id: String,
    pub source_type: WaterSourceType,
    pub functional: bool,

    /// Walking time to the point (2-45 when clean)
    pub distance_minutes: i32,

    /// Submission GPS jittered by at most ±0.005 degrees per axis
    pub gps_lat: f64,
    pub gps_lon: f64,
}
