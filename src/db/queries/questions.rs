use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// instr() sidesteps LIKE wildcard escaping; lower() keeps the match
// case-insensitive for ASCII.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE instr(lower(question), lower(?1)) > 0 ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn pool_with_schema() -> SqlitePool {
        let pool = db::connect_in_memory().await.expect("in-memory pool");
        db::run_migrations(&pool).await.expect("migrations");
        sqlx::query("INSERT INTO categories (id, type) VALUES (1, 'Science')")
            .execute(&pool)
            .await
            .expect("seed category");
        pool
    }

    #[tokio::test]
    async fn search_matches_regardless_of_case() {
        let pool = pool_with_schema().await;
        create_question(&pool, "What is the heaviest noble gas?", "Radon", 1, 2)
            .await
            .unwrap();
        create_question(&pool, "Who painted the Mona Lisa?", "Da Vinci", 1, 1)
            .await
            .unwrap();

        let hits = search_questions(&pool, "NOBLE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].answer, "Radon");

        assert!(search_questions(&pool, "volleyball")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = pool_with_schema().await;
        let id = create_question(&pool, "First?", "Yes", 1, 1).await.unwrap();

        assert!(get_question_by_id(&pool, id).await.unwrap().is_some());
        delete_question(&pool, id).await.unwrap();
        assert!(get_question_by_id(&pool, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_with_unknown_category_is_rejected_by_the_schema() {
        let pool = pool_with_schema().await;
        assert!(create_question(&pool, "Orphan?", "No", 99, 1).await.is_err());
    }
}
