use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One scheduled train journey. Every field travels as text, including the
/// dates, times and distance.
///
/// Fields missing from a request body decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct TrainTrip {
    #[serde(rename = "trip_Id")]
    #[sqlx(rename = "trip_Id")]
    pub trip_id: String,
    #[serde(rename = "train_No")]
    #[sqlx(rename = "train_No")]
    pub train_no: String,
    #[serde(rename = "train_Type_Name_Th")]
    #[sqlx(rename = "train_Type_Name_Th")]
    pub train_type_name_th: String,
    #[serde(rename = "origin_Station_No")]
    #[sqlx(rename = "origin_Station_No")]
    pub origin_station_no: String,
    #[serde(rename = "dest_Station_No")]
    #[sqlx(rename = "dest_Station_No")]
    pub dest_station_no: String,
    #[serde(rename = "trip_Date")]
    #[sqlx(rename = "trip_Date")]
    pub trip_date: String,
    #[serde(rename = "origin_Time")]
    #[sqlx(rename = "origin_Time")]
    pub origin_time: String,
    #[serde(rename = "dest_Time")]
    #[sqlx(rename = "dest_Time")]
    pub dest_time: String,
    #[serde(rename = "total_Distance")]
    #[sqlx(rename = "total_Distance")]
    pub total_distance: String,
}

/// Body of a successful create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedTrip {
    pub trip_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_wire_field_names() {
        let raw = r#"{"trip_Id":"T1","train_No":"101","train_Type_Name_Th":"ด่วน","origin_Station_No":"A","dest_Station_No":"B","trip_Date":"2024-01-01","origin_Time":"08:00","dest_Time":"10:00","total_Distance":"150"}"#;
        let trip: TrainTrip = serde_json::from_str(raw).expect("decode trip");
        assert_eq!(trip.trip_id, "T1");
        assert_eq!(trip.train_type_name_th, "ด่วน");
        assert_eq!(trip.total_distance, "150");

        let value = serde_json::to_value(&trip).expect("encode trip");
        assert_eq!(value["origin_Station_No"], "A");
        assert_eq!(value.as_object().map(|o| o.len()), Some(9));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let trip: TrainTrip = serde_json::from_str(r#"{"trip_Id":"T9"}"#).expect("decode");
        assert_eq!(trip.trip_id, "T9");
        assert!(trip.train_no.is_empty());
    }
}
