//! SQLite-backed storage for portal records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cortex_domain::{Portal, PortalId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::infrastructure::ports::{PortalRepo, RepoError};

/// Expiry is stored as integer milliseconds so purges compare numbers.
pub struct SqlitePortalRepo {
    pool: SqlitePool,
}

impl SqlitePortalRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("open", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS portals (
                id TEXT PRIMARY KEY,
                from_zone TEXT NOT NULL,
                to_zone TEXT NOT NULL,
                expires_at_ms INTEGER NOT NULL,
                submitter TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("open", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_portals_expiry ON portals (expires_at_ms)")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("open", e))?;

        Ok(Self { pool })
    }

    fn row_to_portal(row: &SqliteRow) -> Result<Portal, RepoError> {
        let id: String = row.get("id");
        let expires_at_ms: i64 = row.get("expires_at_ms");
        let submitted_at: String = row.get("submitted_at");

        let id = Uuid::parse_str(&id).map_err(|e| RepoError::corrupt("id", e))?;
        let expires_at = DateTime::from_timestamp_millis(expires_at_ms)
            .ok_or_else(|| RepoError::corrupt("expires_at_ms", expires_at_ms))?;
        let submitted_at = DateTime::parse_from_rfc3339(&submitted_at)
            .map_err(|e| RepoError::corrupt("submitted_at", e))?
            .with_timezone(&Utc);

        Ok(Portal::from_storage(
            PortalId::from_uuid(id),
            row.get("from_zone"),
            row.get("to_zone"),
            expires_at,
            row.get("submitter"),
            submitted_at,
        ))
    }

    async fn find_directed(&self, from: &str, to: &str) -> Result<Option<Portal>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM portals WHERE from_zone = ? AND to_zone = ? ORDER BY expires_at_ms DESC LIMIT 1",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("find_between", e))?;

        row.as_ref().map(Self::row_to_portal).transpose()
    }
}

#[async_trait]
impl PortalRepo for SqlitePortalRepo {
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        let cutoff = now.timestamp_millis();

        let expired = sqlx::query("SELECT * FROM portals WHERE expires_at_ms < ?")
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("remove_expired", e))?;
        for row in &expired {
            let portal = Self::row_to_portal(row)?;
            info!(portal_id = %portal.id, portal = %portal, "Removing expired portal");
        }

        let result = sqlx::query("DELETE FROM portals WHERE expires_at_ms < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("remove_expired", e))?;

        Ok(result.rows_affected())
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Portal>, RepoError> {
        self.remove_expired(now).await?;

        let rows = sqlx::query("SELECT * FROM portals ORDER BY expires_at_ms, submitted_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_active", e))?;

        rows.iter().map(Self::row_to_portal).collect()
    }

    async fn find_between(&self, a: &str, b: &str) -> Result<Option<Portal>, RepoError> {
        match self.find_directed(a, b).await? {
            Some(portal) => Ok(Some(portal)),
            None => self.find_directed(b, a).await,
        }
    }

    async fn save(&self, portal: &Portal) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO portals (id, from_zone, to_zone, expires_at_ms, submitter, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                from_zone = excluded.from_zone,
                to_zone = excluded.to_zone,
                expires_at_ms = excluded.expires_at_ms,
                submitter = excluded.submitter,
                submitted_at = excluded.submitted_at
            "#,
        )
        .bind(portal.id.to_string())
        .bind(&portal.from_zone)
        .bind(&portal.to_zone)
        .bind(portal.expires_at.timestamp_millis())
        .bind(&portal.submitter)
        .bind(portal.submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save", e))?;

        Ok(())
    }

    async fn delete(&self, id: PortalId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM portals WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Portal", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).single().expect("valid timestamp")
    }

    fn portal(from: &str, to: &str, minutes: i64) -> Portal {
        Portal::new(from, to, now() + Duration::minutes(minutes), "@scout", now())
            .expect("valid portal")
    }

    async fn repo(dir: &tempfile::TempDir) -> SqlitePortalRepo {
        let path = dir.path().join("portals.db");
        SqlitePortalRepo::new(&path.to_string_lossy())
            .await
            .expect("open repo")
    }

    #[tokio::test]
    async fn saved_portals_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let saved = portal("Scuttlesink Marsh", "Qiient-Al-Nusom", 90);
        repo(&dir).await.save(&saved).await.expect("save");

        let active = repo(&dir).await.list_active(now()).await.expect("list");

        assert_eq!(active, vec![saved]);
    }

    #[tokio::test]
    async fn list_active_purges_expired_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let short = portal("Scuttlesink Marsh", "Qiient-Al-Nusom", 10);
        let long = portal("Lymhurst", "Qiient-Al-Nusom", 120);
        repo.save(&long).await.expect("save");
        repo.save(&short).await.expect("save");

        let later = now() + Duration::minutes(30);
        let active = repo.list_active(later).await.expect("list");

        assert_eq!(active, vec![long]);
        assert_eq!(repo.remove_expired(later).await.expect("purge"), 0);
    }

    #[tokio::test]
    async fn list_active_orders_by_expiry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let late = portal("Lymhurst", "Qiient-Al-Nusom", 120);
        let soon = portal("Scuttlesink Marsh", "Qiient-Al-Nusom", 10);
        repo.save(&late).await.expect("save");
        repo.save(&soon).await.expect("save");

        let active = repo.list_active(now()).await.expect("list");

        assert_eq!(active, vec![soon, late]);
    }

    #[tokio::test]
    async fn find_between_matches_either_direction() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let saved = portal("Scuttlesink Marsh", "Qiient-Al-Nusom", 60);
        repo.save(&saved).await.expect("save");

        let forward = repo
            .find_between("Scuttlesink Marsh", "Qiient-Al-Nusom")
            .await
            .expect("find");
        let backward = repo
            .find_between("Qiient-Al-Nusom", "Scuttlesink Marsh")
            .await
            .expect("find");
        let missing = repo
            .find_between("Lymhurst", "Qiient-Al-Nusom")
            .await
            .expect("find");

        assert_eq!(forward.as_ref(), Some(&saved));
        assert_eq!(backward, Some(saved));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let saved = portal("Scuttlesink Marsh", "Qiient-Al-Nusom", 60);
        repo.save(&saved).await.expect("save");

        repo.delete(saved.id).await.expect("delete");
        let err = repo.delete(saved.id).await.expect_err("second delete");

        assert!(err.is_not_found());
        assert!(repo.list_active(now()).await.expect("list").is_empty());
    }
}
