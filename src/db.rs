use crate::error::AppError;
use crate::models::item::{Item, ItemId};
use crate::models::review::{Review, ReviewId, ReviewStatus};
use chrono::Utc;
use leptos::logging;
use leptos::logging::log;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Error, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

const ITEM_COLUMNS: &str = "id, title, created_at";
const REVIEW_COLUMNS: &str = "id, item_id, author, review, status, created_at";

impl ToSql for ReviewStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ReviewStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        created_at: Some(row.get(2)?),
    })
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: Some(row.get(0)?),
        item_id: row.get(1)?,
        author: row.get(2)?,
        review: row.get(3)?,
        status: row.get(4)?,
        created_at: Some(row.get(5)?),
    })
}

// Define a struct to represent a database connection
#[derive(Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    // Create a new database connection
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let conn = Connection::open(db_path)?;
        logging::log!("Database connection established at: {}", db_path);
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // Create the database schema
    pub async fn create_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().await;

        // 1. Items table
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );",
        )
        .map_err(|e| {
            logging::error!("Failed creating items table: {}", e);
            e
        })?;

        // 2. Reviews table. item_id is a plain column: deleting an item leaves its reviews alone
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER,
                author TEXT NOT NULL,
                review TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'draft'
                    CHECK (status IN ('draft', 'published')),
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS reviews_item_id ON reviews (item_id);",
        )
        .map_err(|e| {
            logging::error!("Failed creating reviews table: {}", e);
            e
        })?;
        Ok(())
    }

    // Insert a new item, or update the title of an already saved one
    pub async fn save_item(&self, item: &mut Item) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        match item.id {
            Some(id) => {
                conn.execute(
                    "UPDATE items SET title = ? WHERE id = ?",
                    params![item.title, id],
                )?;
                log!("[DB] Item {} updated", id);
            }
            None => {
                let created_at = Utc::now();
                conn.execute(
                    "INSERT INTO items (title, created_at) VALUES (?, ?)",
                    params![item.title, created_at],
                )?;
                let id = conn.last_insert_rowid();
                item.id = Some(id);
                item.created_at = Some(created_at);
                log!("[DB] Item {} inserted", id);
            }
        }
        Ok(())
    }

    pub async fn create_item(&self, title: &str) -> Result<Item, Error> {
        let mut item = Item::new(title);
        self.save_item(&mut item).await?;
        Ok(item)
    }

    pub async fn find_item(&self, id: ItemId) -> Result<Item, AppError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            &format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS),
            [id],
            item_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::item_not_found(id))
    }

    // Retrieve all items, oldest first
    pub async fn list_items(&self) -> Result<Vec<Item>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM items ORDER BY id ASC", ITEM_COLUMNS))?;
        let items = stmt
            .query_map([], item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log!("[DB] Fetched {} items", items.len());
        Ok(items)
    }

    // Reviews are not touched; see create_schema
    pub async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM items WHERE id = ?", [id])?;
        logging::log!("Item deleted: {}", id);
        Ok(())
    }

    /// Validates and stores the review. Returns `Ok(false)` without touching
    /// the database when validation fails; `Err` is reserved for storage errors.
    pub async fn save_review(&self, review: &mut Review) -> Result<bool, Error> {
        if let Err(err) = review.validate() {
            log!("[DB] Review rejected: {}", err);
            return Ok(false);
        }

        let conn = self.conn.lock().await;
        match review.id {
            Some(id) => {
                conn.execute(
                    "UPDATE reviews SET item_id = ?, author = ?, review = ?, status = ? WHERE id = ?",
                    params![review.item_id, review.author, review.review, review.status, id],
                )?;
                log!("[DB] Review {} updated", id);
            }
            None => {
                let created_at = Utc::now();
                conn.execute(
                    "INSERT INTO reviews (item_id, author, review, status, created_at)
                    VALUES (?, ?, ?, ?, ?)",
                    params![
                        review.item_id,
                        review.author,
                        review.review,
                        review.status,
                        created_at
                    ],
                )?;
                let id = conn.last_insert_rowid();
                review.id = Some(id);
                review.created_at = Some(created_at);
                log!("[DB] Review {} inserted for item {:?}", id, review.item_id);
            }
        }
        Ok(true)
    }

    // Attach the review to an item and save it
    pub async fn add_review(&self, item_id: ItemId, review: &mut Review) -> Result<bool, Error> {
        review.item_id = Some(item_id);
        self.save_review(review).await
    }

    pub async fn delete_review(&self, id: ReviewId) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM reviews WHERE id = ?", [id])?;
        logging::log!("Review deleted: {}", id);
        Ok(())
    }

    /// Changes the publication status. Returns `false` if no such review exists.
    pub async fn set_review_status(&self, id: ReviewId, status: ReviewStatus) -> Result<bool, Error> {
        let conn = self.conn.lock().await;
        let updated = conn.execute(
            "UPDATE reviews SET status = ? WHERE id = ?",
            params![status, id],
        )?;
        log!("[DB] Review {} status set to {}", id, status);
        Ok(updated > 0)
    }

    // All reviews of an item in insertion order, drafts included
    pub async fn reviews_of(&self, item_id: ItemId) -> Result<Vec<Review>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM reviews WHERE item_id = ? ORDER BY id ASC",
            REVIEW_COLUMNS
        ))?;
        let reviews = stmt
            .query_map([item_id], review_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    pub async fn count_reviews(&self) -> Result<i64, Error> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
    }

    pub async fn count_item_reviews(&self, item_id: ItemId) -> Result<i64, Error> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT COUNT(*) FROM reviews WHERE item_id = ?",
            [item_id],
            |row| row.get(0),
        )
    }

    pub async fn first_item_review(&self, item_id: ItemId) -> Result<Option<Review>, Error> {
        let conn = self.conn.lock().await;
        conn.query_row(
            &format!(
                "SELECT {} FROM reviews WHERE item_id = ? ORDER BY id ASC LIMIT 1",
                REVIEW_COLUMNS
            ),
            [item_id],
            review_from_row,
        )
        .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function to create test database
    async fn create_test_db() -> Database {
        log!("[TEST] Creating in-memory test database");
        let db = Database::new(":memory:").unwrap();
        db.create_schema().await.unwrap();
        log!("[TEST] Database schema created");
        db
    }

    #[tokio::test]
    async fn test_schema_creation() {
        let db = create_test_db().await;

        // Running it twice must be harmless
        db.create_schema().await.unwrap();

        let conn = db.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"items".to_string()));
        assert!(tables.contains(&"reviews".to_string()));
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        log!("[TEST] Starting test_item_lifecycle");
        let db = create_test_db().await;

        let mut item = Item::new("Первый товар");
        db.save_item(&mut item).await.unwrap();
        let id = item.id.expect("id assigned on save");
        assert!(item.created_at.is_some());

        let stored = db.find_item(id).await.unwrap();
        assert_eq!(stored.title, "Первый товар");

        item.title = "Второй товар".into();
        db.save_item(&mut item).await.unwrap();
        assert_eq!(item.id, Some(id));
        assert_eq!(db.find_item(id).await.unwrap().title, "Второй товар");

        db.delete_item(id).await.unwrap();
        assert!(db.find_item(id).await.unwrap_err().is_not_found());
        assert!(db.list_items().await.unwrap().is_empty());
        log!("[TEST] test_item_lifecycle completed successfully");
    }

    #[tokio::test]
    async fn test_find_missing_item_is_not_found() {
        let db = create_test_db().await;
        let err = db.find_item(12345).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_item_has_many_reviews() {
        let db = create_test_db().await;
        let item = db.create_item("Первый товар").await.unwrap();
        let item_id = item.id.unwrap();

        let mut review = Review::new("Slava", "А че, хороший товар!");
        assert!(db.add_review(item_id, &mut review).await.unwrap());
        assert_eq!(review.item_id, Some(item_id));

        assert_eq!(db.count_item_reviews(item_id).await.unwrap(), 1);

        let first = db.first_item_review(item_id).await.unwrap().unwrap();
        assert_eq!(first.author, "Slava");
        assert_eq!(first.review, "А че, хороший товар!");
        assert_eq!(first.status, ReviewStatus::Draft);

        db.delete_item(item_id).await.unwrap();
        db.delete_review(review.id.unwrap()).await.unwrap();
        assert_eq!(db.count_reviews().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cannot_save_review_without_author() {
        let db = create_test_db().await;

        let mut review = Review::default();
        assert!(!db.save_review(&mut review).await.unwrap());
        assert_eq!(review.id, None);
        assert_eq!(db.count_reviews().await.unwrap(), 0);

        let mut review = Review::new("test", "");
        assert!(db.save_review(&mut review).await.unwrap());
        assert!(review.id.is_some());
        assert_eq!(db.count_reviews().await.unwrap(), 1);

        db.delete_review(review.id.unwrap()).await.unwrap();
        assert_eq!(db.count_reviews().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reviews_keep_insertion_order_and_drafts() {
        let db = create_test_db().await;
        let item_id = db.create_item("Товар").await.unwrap().id.unwrap();
        let other_id = db.create_item("Другой").await.unwrap().id.unwrap();

        for (author, status) in [
            ("first", ReviewStatus::Published),
            ("second", ReviewStatus::Draft),
            ("third", ReviewStatus::Published),
        ] {
            let mut review = Review::new(author, "text").with_status(status);
            assert!(db.add_review(item_id, &mut review).await.unwrap());
        }
        let mut foreign = Review::new("elsewhere", "text");
        db.add_review(other_id, &mut foreign).await.unwrap();

        let reviews = db.reviews_of(item_id).await.unwrap();
        let authors: Vec<&str> = reviews.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, ["first", "second", "third"]);
        assert_eq!(reviews[1].status, ReviewStatus::Draft);
        assert_eq!(db.count_reviews().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_item_does_not_cascade() {
        let db = create_test_db().await;
        let item_id = db.create_item("Товар").await.unwrap().id.unwrap();
        let mut review = Review::new("Slava", "text");
        db.add_review(item_id, &mut review).await.unwrap();

        db.delete_item(item_id).await.unwrap();

        assert_eq!(db.count_reviews().await.unwrap(), 1);
        assert_eq!(db.reviews_of(item_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_review_status() {
        let db = create_test_db().await;
        let item_id = db.create_item("Товар").await.unwrap().id.unwrap();
        let mut review = Review::new("Slava", "text");
        db.add_review(item_id, &mut review).await.unwrap();
        let review_id = review.id.unwrap();

        assert!(db.set_review_status(review_id, ReviewStatus::Published).await.unwrap());
        assert!(!db.set_review_status(review_id + 100, ReviewStatus::Published).await.unwrap());

        let stored = db.first_item_review(item_id).await.unwrap().unwrap();
        assert!(stored.is_published());

        let conn = db.conn.lock().await;
        let raw: String = conn
            .query_row("SELECT status FROM reviews WHERE id = ?", [review_id], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, "published");
    }

    #[tokio::test]
    async fn test_unknown_status_in_storage_is_an_error() {
        let db = create_test_db().await;
        let item_id = db.create_item("Товар").await.unwrap().id.unwrap();
        {
            let conn = db.conn.lock().await;
            conn.execute_batch("DROP TABLE reviews;").unwrap();
            conn.execute_batch(
                "CREATE TABLE reviews (
                    id INTEGER PRIMARY KEY, item_id INTEGER, author TEXT NOT NULL,
                    review TEXT NOT NULL, status TEXT NOT NULL, created_at TEXT NOT NULL
                );",
            )
            .unwrap();
            conn.execute(
                "INSERT INTO reviews (item_id, author, review, status, created_at)
                VALUES (?, 'x', 'y', 'archived', '2024-01-01 00:00:00+00:00')",
                [item_id],
            )
            .unwrap();
        }
        assert!(db.reviews_of(item_id).await.is_err());
    }
}
