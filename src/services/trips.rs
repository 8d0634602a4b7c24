use std::time::Duration;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use tokio::time::timeout;
use tracing::debug;

use crate::{db::DbPool, error::AppError, models::trip::TrainTrip};

/// Upper bound for a single statement, including waiting for a connection.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

const SELECT_TRIPS: &str = r#"SELECT trip_Id, train_No, train_Type_Name_Th, origin_Station_No,
       dest_Station_No, trip_Date, origin_Time, dest_Time, total_Distance
FROM train_trip"#;

const INSERT_TRIP: &str = r#"INSERT INTO train_trip
    (trip_Id, train_No, train_Type_Name_Th, origin_Station_No, dest_Station_No,
     trip_Date, origin_Time, dest_Time, total_Distance, create_date, update_date)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#;

const UPDATE_TRIP: &str = r#"UPDATE train_trip
SET train_No = ?,
    train_Type_Name_Th = ?,
    origin_Station_No = ?,
    dest_Station_No = ?,
    trip_Date = ?,
    origin_Time = ?,
    dest_Time = ?,
    total_Distance = ?,
    update_date = ?
WHERE trip_Id = ?"#;

/// Data access for the `train_trip` table. Cheap to clone; all clones share
/// the same pool.
#[derive(Clone)]
pub struct TripRepository {
    pool: DbPool,
    deadline: Duration,
}

impl TripRepository {
    pub fn new(pool: DbPool) -> Self {
        Self::with_deadline(pool, QUERY_TIMEOUT)
    }

    /// Same as [`TripRepository::new`] with a custom per-statement deadline.
    pub fn with_deadline(pool: DbPool, deadline: Duration) -> Self {
        Self { pool, deadline }
    }

    /// Returns every trip, or only those whose identifier equals `trip_id`.
    /// Rows come back in whatever order the store yields them.
    pub async fn fetch(&self, trip_id: Option<&str>) -> Result<Vec<TrainTrip>, AppError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_TRIPS);
        if let Some(trip_id) = trip_id {
            query.push(" WHERE trip_Id = ").push_bind(trip_id);
        }

        let trips = timeout(
            self.deadline,
            query.build_query_as::<TrainTrip>().fetch_all(&self.pool),
        )
        .await??;
        debug!(filter = ?trip_id, count = trips.len(), "fetched trips");
        Ok(trips)
    }

    /// Stores a new trip, stamping both timestamps, and returns the row id the
    /// store assigned to it.
    pub async fn insert(&self, trip: &TrainTrip) -> Result<i64, AppError> {
        let now = Utc::now();
        let result = timeout(
            self.deadline,
            sqlx::query(INSERT_TRIP)
                .bind(&trip.trip_id)
                .bind(&trip.train_no)
                .bind(&trip.train_type_name_th)
                .bind(&trip.origin_station_no)
                .bind(&trip.dest_station_no)
                .bind(&trip.trip_date)
                .bind(&trip.origin_time)
                .bind(&trip.dest_time)
                .bind(&trip.total_distance)
                .bind(now)
                .bind(now)
                .execute(&self.pool),
        )
        .await??;
        Ok(result.last_insert_rowid())
    }

    /// Overwrites every field but the identifier and restamps `update_date`.
    /// Returns the number of rows the statement touched; zero means the trip
    /// does not exist.
    pub async fn update(&self, trip: &TrainTrip) -> Result<u64, AppError> {
        let result = timeout(
            self.deadline,
            sqlx::query(UPDATE_TRIP)
                .bind(&trip.train_no)
                .bind(&trip.train_type_name_th)
                .bind(&trip.origin_station_no)
                .bind(&trip.dest_station_no)
                .bind(&trip.trip_date)
                .bind(&trip.origin_time)
                .bind(&trip.dest_time)
                .bind(&trip.total_distance)
                .bind(Utc::now())
                .bind(&trip.trip_id)
                .execute(&self.pool),
        )
        .await??;
        Ok(result.rows_affected())
    }
}
