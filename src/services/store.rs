use tracing::debug;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        item::{ItemFields, ItineraryItem},
        trip::{Trip, TripFields},
    },
};

const TRIP_COLUMNS: &str = "trip_id, trip_name, start_date, end_date";
const ITEM_COLUMNS: &str =
    "item_id, trip_id, park_code, item_date, start_time, end_time, title, notes, sort_order";

/// Persistence for trips and their itinerary items. Every operation is a
/// single statement; deleting a trip relies on `ON DELETE CASCADE` to drop
/// its items in the same statement.
#[derive(Clone)]
pub struct ItineraryStore {
    pool: DbPool,
}

impl ItineraryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create_trip(&self, fields: &TripFields) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            "INSERT INTO trips (trip_name, start_date, end_date) VALUES (?1, ?2, ?3) RETURNING {TRIP_COLUMNS}"
        ))
        .bind(&fields.trip_name)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        debug!(trip_id = trip.trip_id, "trip created");
        Ok(trip)
    }

    /// Ordered by start date; ties keep insertion order.
    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips ORDER BY start_date, trip_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(trips)
    }

    pub async fn update_trip(&self, trip_id: i64, fields: &TripFields) -> Result<Trip, AppError> {
        sqlx::query_as::<_, Trip>(&format!(
            "UPDATE trips SET trip_name = ?1, start_date = ?2, end_date = ?3 WHERE trip_id = ?4 RETURNING {TRIP_COLUMNS}"
        ))
        .bind(&fields.trip_name)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(AppError::NotFound("trip"))
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("trip"));
        }
        debug!(trip_id, "trip deleted with its items");
        Ok(())
    }

    /// Ordered by date, then start time with untimed items last, then
    /// `sort_order`, then `item_id`.
    pub async fn list_items(&self, trip_id: i64) -> Result<Vec<ItineraryItem>, AppError> {
        let items = sqlx::query_as::<_, ItineraryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM itinerary_items WHERE trip_id = ?1 \
             ORDER BY item_date, start_time IS NULL, start_time, sort_order, item_id"
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Fails with `NotFound("trip")` when the trip does not exist.
    pub async fn create_item(
        &self,
        trip_id: i64,
        fields: &ItemFields,
    ) -> Result<ItineraryItem, AppError> {
        let item = sqlx::query_as::<_, ItineraryItem>(&format!(
            "INSERT INTO itinerary_items \
             (trip_id, park_code, item_date, start_time, end_time, title, notes, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(trip_id)
        .bind(&fields.park_code)
        .bind(fields.item_date)
        .bind(fields.start_time)
        .bind(fields.end_time)
        .bind(&fields.title)
        .bind(&fields.notes)
        .bind(fields.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        debug!(trip_id, item_id = item.item_id, "itinerary item created");
        Ok(item)
    }

    /// Scoped by both keys: an item id belonging to another trip is not found.
    pub async fn update_item(
        &self,
        trip_id: i64,
        item_id: i64,
        fields: &ItemFields,
    ) -> Result<ItineraryItem, AppError> {
        sqlx::query_as::<_, ItineraryItem>(&format!(
            "UPDATE itinerary_items \
             SET park_code = ?1, item_date = ?2, start_time = ?3, end_time = ?4, \
                 title = ?5, notes = ?6, sort_order = ?7 \
             WHERE trip_id = ?8 AND item_id = ?9 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&fields.park_code)
        .bind(fields.item_date)
        .bind(fields.start_time)
        .bind(fields.end_time)
        .bind(&fields.title)
        .bind(&fields.notes)
        .bind(fields.sort_order)
        .bind(trip_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(AppError::NotFound("item"))
    }

    pub async fn delete_item(&self, trip_id: i64, item_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM itinerary_items WHERE trip_id = ?1 AND item_id = ?2")
            .bind(trip_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("item"));
        }
        Ok(())
    }
}

/// Maps constraint violations on writes to caller-facing errors.
fn classify(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("trip");
        }
        if db_err.is_check_violation() {
            return AppError::Validation("required text fields must not be empty".into());
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    use super::*;
    use crate::db::{init_pool, run_migrations};

    async fn store() -> (ItineraryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("store.sqlite").display());
        let pool = init_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (ItineraryStore::new(pool), dir)
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn trip_fields(name: &str, start: &str, end: &str) -> TripFields {
        TripFields {
            trip_name: name.into(),
            start_date: date(start),
            end_date: date(end),
        }
    }

    fn item_fields(day: &str, start: Option<(u32, u32)>, title: &str) -> ItemFields {
        ItemFields {
            item_date: date(day),
            start_time: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            end_time: None,
            title: title.into(),
            park_code: None,
            notes: None,
            sort_order: 0,
        }
    }

    #[tokio::test]
    async fn trips_list_by_start_date() {
        let (store, _dir) = store().await;
        store
            .create_trip(&trip_fields("Late", "2024-09-01", "2024-09-05"))
            .await
            .unwrap();
        store
            .create_trip(&trip_fields("Early", "2024-05-01", "2024-05-03"))
            .await
            .unwrap();

        let names: Vec<_> = store
            .list_trips()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.trip_name)
            .collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_reports_missing_trip() {
        let (store, _dir) = store().await;
        let trip = store
            .create_trip(&trip_fields("Draft", "2024-05-01", "2024-05-03"))
            .await
            .unwrap();

        let updated = store
            .update_trip(trip.trip_id, &trip_fields("Final", "2024-06-01", "2024-06-04"))
            .await
            .unwrap();
        assert_eq!(updated.trip_id, trip.trip_id);
        assert_eq!(updated.trip_name, "Final");
        assert_eq!(updated.start_date, date("2024-06-01"));

        let missing = store
            .update_trip(trip.trip_id + 100, &trip_fields("X", "2024-06-01", "2024-06-01"))
            .await;
        assert!(matches!(missing, Err(AppError::NotFound("trip"))));
    }

    #[tokio::test]
    async fn empty_trip_name_violates_schema() {
        let (store, _dir) = store().await;
        let result = store
            .create_trip(&trip_fields("", "2024-05-01", "2024-05-03"))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.list_trips().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn items_follow_four_key_order() {
        let (store, _dir) = store().await;
        let trip = store
            .create_trip(&trip_fields("Order", "2024-06-01", "2024-06-02"))
            .await
            .unwrap();

        let untimed = store
            .create_item(trip.trip_id, &item_fields("2024-06-01", None, "untimed"))
            .await
            .unwrap();
        let morning = store
            .create_item(trip.trip_id, &item_fields("2024-06-01", Some((9, 0)), "nine"))
            .await
            .unwrap();
        let next_day = store
            .create_item(trip.trip_id, &item_fields("2024-06-02", Some((8, 0)), "next day"))
            .await
            .unwrap();

        let mut low_sort = item_fields("2024-06-01", Some((9, 0)), "nine, first");
        low_sort.sort_order = -1;
        let first_at_nine = store.create_item(trip.trip_id, &low_sort).await.unwrap();

        let ids: Vec<_> = store
            .list_items(trip.trip_id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.item_id)
            .collect();
        assert_eq!(
            ids,
            vec![
                first_at_nine.item_id,
                morning.item_id,
                untimed.item_id,
                next_day.item_id
            ]
        );
    }

    #[tokio::test]
    async fn identical_keys_fall_back_to_item_id() {
        let (store, _dir) = store().await;
        let trip = store
            .create_trip(&trip_fields("Ties", "2024-06-01", "2024-06-01"))
            .await
            .unwrap();
        let a = store
            .create_item(trip.trip_id, &item_fields("2024-06-01", None, "a"))
            .await
            .unwrap();
        let b = store
            .create_item(trip.trip_id, &item_fields("2024-06-01", None, "b"))
            .await
            .unwrap();

        let first = store.list_items(trip.trip_id).await.unwrap();
        let second = store.list_items(trip.trip_id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|i| i.item_id).collect::<Vec<_>>(),
            vec![a.item_id, b.item_id]
        );
    }

    #[tokio::test]
    async fn item_for_unknown_trip_is_not_found() {
        let (store, _dir) = store().await;
        let result = store
            .create_item(42, &item_fields("2024-06-01", None, "orphan"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound("trip"))));
    }

    #[tokio::test]
    async fn item_updates_are_scoped_to_their_trip() {
        let (store, _dir) = store().await;
        let a = store
            .create_trip(&trip_fields("A", "2024-06-01", "2024-06-02"))
            .await
            .unwrap();
        let b = store
            .create_trip(&trip_fields("B", "2024-07-01", "2024-07-02"))
            .await
            .unwrap();
        let item = store
            .create_item(b.trip_id, &item_fields("2024-07-01", None, "belongs to B"))
            .await
            .unwrap();

        let cross = store
            .update_item(a.trip_id, item.item_id, &item_fields("2024-06-01", None, "hijack"))
            .await;
        assert!(matches!(cross, Err(AppError::NotFound("item"))));
        let cross_delete = store.delete_item(a.trip_id, item.item_id).await;
        assert!(matches!(cross_delete, Err(AppError::NotFound("item"))));

        let untouched = store.list_items(b.trip_id).await.unwrap();
        assert_eq!(untouched, vec![item.clone()]);

        let mut fields = item_fields("2024-07-02", Some((14, 30)), "renamed");
        fields.notes = Some("late lunch".into());
        let updated = store
            .update_item(b.trip_id, item.item_id, &fields)
            .await
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.start_time, NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(updated.notes.as_deref(), Some("late lunch"));
    }

    #[tokio::test]
    async fn deleting_a_trip_cascades_to_items() {
        let (store, _dir) = store().await;
        let trip = store
            .create_trip(&trip_fields("Gone", "2024-06-01", "2024-06-02"))
            .await
            .unwrap();
        let item = store
            .create_item(trip.trip_id, &item_fields("2024-06-01", None, "stale"))
            .await
            .unwrap();

        store.delete_trip(trip.trip_id).await.unwrap();

        assert!(store.list_items(trip.trip_id).await.unwrap().is_empty());
        let update = store
            .update_item(trip.trip_id, item.item_id, &item_fields("2024-06-01", None, "x"))
            .await;
        assert!(matches!(update, Err(AppError::NotFound("item"))));
        let delete = store.delete_item(trip.trip_id, item.item_id).await;
        assert!(matches!(delete, Err(AppError::NotFound("item"))));
        assert!(matches!(
            store.delete_trip(trip.trip_id).await,
            Err(AppError::NotFound("trip"))
        ));

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM itinerary_items")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
