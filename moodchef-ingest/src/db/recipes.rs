//! Recipe persistence (SQLite)

use super::RecipeStore;
use crate::models::{Category, ProcessedRecipe, RecipeStatus};
use async_trait::async_trait;
use moodchef_common::Result;
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;

/// SQLite-backed recipe store
#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

impl SqliteRecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn approved_counts(&self) -> Result<BTreeMap<Category, usize>> {
        let rows = sqlx::query(
            r#"
            SELECT je.value AS emotion, COUNT(*) AS total
            FROM recipes, json_each(recipes.emotions) AS je
            WHERE recipes.status = ?
            GROUP BY je.value
            "#,
        )
        .bind(RecipeStatus::Approved.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();

        for row in rows {
            let emotion: String = row.get("emotion");
            let total: i64 = row.get("total");
            match emotion.parse::<Category>() {
                Ok(category) => *counts.entry(category).or_insert(0) += total.max(0) as usize,
                Err(e) => tracing::warn!(emotion = %emotion, "Ignoring stored emotion: {}", e),
            }
        }

        Ok(counts)
    }

    async fn upsert_batch(&self, recipes: &[ProcessedRecipe]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for recipe in recipes {
            let ingredients = serde_json::to_string(&recipe.ingredients)?;
            let instructions = serde_json::to_string(&recipe.instructions)?;
            let emotions = serde_json::to_string(&recipe.emotions())?;

            sqlx::query(
                r#"
                INSERT INTO recipes (
                    title, description, ingredients, instructions, cooking_time,
                    emotions, image_url, status, is_premium, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
                ON CONFLICT(title) DO UPDATE SET
                    description = excluded.description,
                    ingredients = excluded.ingredients,
                    instructions = excluded.instructions,
                    cooking_time = excluded.cooking_time,
                    emotions = excluded.emotions,
                    image_url = excluded.image_url,
                    status = excluded.status,
                    is_premium = excluded.is_premium,
                    updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(&recipe.title)
            .bind(&recipe.description)
            .bind(&ingredients)
            .bind(&instructions)
            .bind(recipe.cooking_time as i64)
            .bind(&emotions)
            .bind(&recipe.image_url)
            .bind(recipe.status.as_str())
            .bind(recipe.is_premium)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = recipes.len(), "Upserted recipe batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodchef_common::db::init_database;

    fn recipe(title: &str, emotion: Category, description: &str) -> ProcessedRecipe {
        ProcessedRecipe {
            title: title.to_string(),
            description: description.to_string(),
            ingredients: vec!["1 egg".to_string()],
            instructions: vec!["Cook.".to_string()],
            cooking_time: 20,
            emotion,
            image_url: String::new(),
            status: RecipeStatus::Approved,
            is_premium: false,
        }
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_by_title() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let store = SqliteRecipeStore::new(pool.clone());

        store
            .upsert_batch(&[recipe("Chili", Category::Angry, "v1")])
            .await
            .unwrap();
        store
            .upsert_batch(&[recipe("Chili", Category::Angry, "v2")])
            .await
            .unwrap();

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT title, description FROM recipes")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(rows, vec![("Chili".to_string(), "v2".to_string())]);
    }

    #[tokio::test]
    async fn test_approved_counts_per_category() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let store = SqliteRecipeStore::new(pool.clone());

        store
            .upsert_batch(&[
                recipe("Chili", Category::Angry, ""),
                recipe("Wings", Category::Angry, ""),
                recipe("Cake", Category::Happy, ""),
            ])
            .await
            .unwrap();

        // Pending rows and unknown labels are not counted
        for (title, emotions, status) in [
            ("Draft", r#"["Angry"]"#, "pending"),
            ("Odd", r#"["hangry"]"#, "approved"),
        ] {
            sqlx::query("INSERT INTO recipes (title, emotions, status) VALUES (?, ?, ?)")
                .bind(title)
                .bind(emotions)
                .bind(status)
                .execute(&pool)
                .await
                .unwrap();
        }

        let counts = store.approved_counts().await.unwrap();
        assert_eq!(counts[&Category::Angry], 2);
        assert_eq!(counts[&Category::Happy], 1);
        assert_eq!(counts[&Category::Calm], 0);
        assert_eq!(counts.len(), Category::ALL.len());
    }

    #[tokio::test]
    async fn test_stored_columns() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let store = SqliteRecipeStore::new(pool.clone());

        let mut premium = recipe("Tart", Category::Happy, "Sweet");
        premium.is_premium = true;
        store.upsert_batch(&[premium]).await.unwrap();

        let row = sqlx::query(
            r#"
            SELECT ingredients, instructions, emotions, status, is_premium, cooking_time
            FROM recipes
            WHERE title = 'Tart'
            "#,
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(row.get::<String, _>("ingredients"), r#"["1 egg"]"#);
        assert_eq!(row.get::<String, _>("instructions"), r#"["Cook."]"#);
        assert_eq!(row.get::<String, _>("emotions"), r#"["Happy"]"#);
        assert_eq!(row.get::<String, _>("status"), "approved");
        assert!(row.get::<bool, _>("is_premium"));
        assert_eq!(row.get::<i64, _>("cooking_time"), 20);
    }
}
