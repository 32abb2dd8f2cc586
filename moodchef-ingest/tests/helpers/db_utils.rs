//! Database test utilities

use anyhow::Result;
use moodchef_common::db::init_database;
use moodchef_ingest::models::Category;
use sqlx::{Row, SqlitePool};
use tempfile::TempDir;

/// Create an on-disk test database with tables applied
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_test_db() -> Result<(TempDir, SqlitePool)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("moodchef_test.db");
    let pool = init_database(&db_path.to_string_lossy()).await?;
    Ok((temp_dir, pool))
}

/// Insert `count` approved recipes for `category`
pub async fn seed_approved(pool: &SqlitePool, category: Category, count: usize) -> Result<()> {
    for i in 0..count {
        sqlx::query(
            r#"
            INSERT INTO recipes (title, ingredients, instructions, cooking_time, emotions, status)
            VALUES (?, '[]', '[]', 10, ?, 'approved')
            "#,
        )
        .bind(format!("Seeded {} {}", category, i))
        .bind(format!("[\"{}\"]", category))
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// (title, emotions JSON) for every stored recipe, ordered by title
pub async fn stored_emotions(pool: &SqlitePool) -> Result<Vec<(String, String)>> {
    let rows = sqlx::query("SELECT title, emotions FROM recipes ORDER BY title")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.get("title"), row.get("emotions")))
        .collect())
}
