use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use sqlx::{Row, SqlitePool};

use crate::error::{Error, Result};

/// A record kind stored in its own keyed table.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin {
    const TABLE: &'static str;

    fn id(&self) -> &str;
}

/// Keyed document table: one row per record, the record itself stored as
/// JSON and decoded at the boundary. All five entity tables share this
/// access path; there is no cross-table transaction support.
#[derive(Clone)]
pub struct Table<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Table<T> {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// All records, in no guaranteed order.
    pub async fn get_all(&self) -> Result<Vec<T>> {
        let rows = sqlx::query(&format!("SELECT data FROM {}", T::TABLE))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| {
                let data: String = row.try_get("data")?;
                decode_stored(&data)
            })
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let row = sqlx::query(&format!("SELECT data FROM {} WHERE id = ?1", T::TABLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let data: String = row.try_get("data")?;
                Ok(Some(decode_stored(&data)?))
            }
            None => Ok(None),
        }
    }

    pub async fn insert(&self, record: &T) -> Result<()> {
        let id = record.id().to_string();
        let data = serde_json::to_string(record)?;
        sqlx::query(&format!(
            "INSERT INTO {} (id, data) VALUES (?1, ?2)",
            T::TABLE
        ))
        .bind(&id)
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::DuplicateKey(id.clone()),
            _ => Error::from(e),
        })?;
        Ok(())
    }

    /// Inserts the whole batch inside one transaction; a failure partway
    /// rolls everything back so the caller can retry from a clean slate.
    pub async fn bulk_insert(&self, records: &[T]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            let id = record.id().to_string();
            let data = serde_json::to_string(record)?;
            sqlx::query(&format!(
                "INSERT INTO {} (id, data) VALUES (?1, ?2)",
                T::TABLE
            ))
            .bind(&id)
            .bind(&data)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    Error::DuplicateKey(id.clone())
                }
                _ => Error::from(e),
            })?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Merges the fields of `patch` into the stored record and returns the
    /// updated record. The merged document must still decode as `T`; the id
    /// field is never overwritten.
    pub async fn update(&self, id: &str, patch: &JsonValue) -> Result<T> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!("SELECT data FROM {} WHERE id = ?1", T::TABLE))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Err(Error::NotFound(format!(
                "{} record {} not found",
                T::TABLE,
                id
            )));
        };
        let data: String = row.try_get("data")?;
        let mut doc: JsonValue = decode_stored(&data)?;
        if let (Some(target), Some(fields)) = (doc.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                if key == "id" {
                    continue;
                }
                target.insert(key.clone(), value.clone());
            }
        }
        let record: T = serde_json::from_value(doc.clone())?;
        sqlx::query(&format!("UPDATE {} SET data = ?1 WHERE id = ?2", T::TABLE))
            .bind(doc.to_string())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Idempotent: deleting an absent id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", T::TABLE))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {}", T::TABLE))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", T::TABLE))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// A stored row that no longer parses is store corruption, not a bad
/// request; it surfaces as an internal failure rather than a 400.
fn decode_stored<D: serde::de::DeserializeOwned>(data: &str) -> Result<D> {
    serde_json::from_str(data).map_err(|e| Error::Store(sqlx::Error::Decode(Box::new(e))))
}
