use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tracing::info;

use crate::{
    cors,
    error::AppError,
    models::trip::{CreatedTrip, Message, TrainTrip},
    state::AppState,
};

pub const TRAIN_PATH: &str = "train";

const UPDATE_OK: &str = "อัพเดตขบวนรถไฟสำเร็จ";
const UPDATE_NOT_FOUND: &str = "ไม่พบขบวนรถไฟที่ต้องการแก้ไขข้อมูล";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{TRAIN_PATH}"),
            get(list_trips)
                .post(create_trip)
                .put(update_trip)
                .options(preflight)
                .head(method_not_allowed),
        )
        .route(&format!("/{TRAIN_PATH}/"), any(trip_by_path))
        .route(&format!("/{TRAIN_PATH}/*rest"), any(trip_by_path))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let trip_id = first_trip_id(&params);
    let trips = state.trips.fetch(trip_id).await?;
    let body = serde_json::to_vec(&trips)?;
    Ok(json_body(StatusCode::OK, body))
}

async fn create_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let trip = decode_trip(&body)?;
    // Store failures, duplicates included, are reported as client errors.
    let trip_id = state
        .trips
        .insert(&trip)
        .await
        .map_err(|err| AppError::BadRequest(format!("insert trip {}: {err}", trip.trip_id)))?;
    info!(trip = %trip.trip_id, row = trip_id, "created trip");
    Ok((StatusCode::CREATED, Json(CreatedTrip { trip_id })).into_response())
}

async fn update_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let trip = decode_trip(&body)?;
    let affected = state.trips.update(&trip).await?;
    if affected == 0 {
        return Ok(message(StatusCode::NOT_FOUND, UPDATE_NOT_FOUND));
    }
    info!(trip = %trip.trip_id, "updated trip");
    Ok(message(StatusCode::OK, UPDATE_OK))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn trip_by_path(
    State(state): State<AppState>,
    method: Method,
    rest: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let rest = match rest {
        Ok(Path(rest)) => rest,
        // `/train/` itself has no parameter to extract.
        Err(PathRejection::MissingPathParams(_)) => String::new(),
        Err(err) => return Err(AppError::BadRequest(format!("invalid trip path: {err}"))),
    };
    let trip_id = trip_id_from_path(&rest)?;

    if method != Method::GET {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let trips = state.trips.fetch(Some(trip_id)).await?;
    if trips.is_empty() {
        return Err(AppError::NotFound);
    }
    // Encode failures on this path have always been answered with 400.
    let body = serde_json::to_vec(&trips)
        .map_err(|err| AppError::BadRequest(format!("encode trips: {err}")))?;
    Ok(json_body(StatusCode::OK, body))
}

/// The first `trip_id` query parameter, if it is non-empty. Later repeats
/// are ignored.
fn first_trip_id(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "trip_id")
        .map(|(_, value)| value.as_str())
        .filter(|id| !id.is_empty())
}

/// Extracts the identifier from whatever follows `/api/train/`. Exactly one
/// non-empty segment is accepted.
fn trip_id_from_path(rest: &str) -> Result<&str, AppError> {
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if rest.contains('/') {
        return Err(AppError::BadRequest(format!(
            "unexpected path segments after {TRAIN_PATH}/: {rest}"
        )));
    }
    if rest.is_empty() {
        return Err(AppError::BadRequest("missing trip id".into()));
    }
    Ok(rest)
}

fn decode_trip(body: &[u8]) -> Result<TrainTrip, AppError> {
    serde_json::from_slice(body).map_err(|err| AppError::BadRequest(format!("decode trip: {err}")))
}

fn json_body(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(CONTENT_TYPE, cors::JSON)], body).into_response()
}

fn message(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(Message {
            message: text.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_is_the_trip_id() {
        assert_eq!(trip_id_from_path("T1").ok(), Some("T1"));
        assert_eq!(trip_id_from_path("/T1").ok(), Some("T1"));
    }

    #[test]
    fn extra_segments_are_rejected() {
        assert!(matches!(
            trip_id_from_path("T1/extra"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(trip_id_from_path("T1/"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(trip_id_from_path(""), Err(AppError::BadRequest(_))));
        assert!(matches!(trip_id_from_path("/"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn first_trip_id_wins() {
        let params = vec![
            ("trip_id".to_string(), "T1".to_string()),
            ("trip_id".to_string(), "T2".to_string()),
        ];
        assert_eq!(first_trip_id(&params), Some("T1"));
        assert_eq!(first_trip_id(&[("trip_id".into(), String::new())]), None);
        assert_eq!(first_trip_id(&[("other".into(), "T1".into())]), None);
    }

    #[test]
    fn garbage_body_is_a_bad_request() {
        assert!(matches!(
            decode_trip(b"not json"),
            Err(AppError::BadRequest(_))
        ));
        assert!(decode_trip(br#"{"trip_Id":"T1"}"#).is_ok());
    }
}
