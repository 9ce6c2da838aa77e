use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

/// Fields of a question about to be inserted. Missing values are bound as NULL
/// and left for the table constraints to reject.
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i64>,
    pub category: Option<i64>,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions WHERE questions.id = ?1
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
        SELECT id, question, answer, difficulty, category FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over the question text.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions
        WHERE questions.question LIKE '%' || ?1 || '%'
        ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, new_question: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(new_question.question.as_deref())
    .bind(new_question.answer.as_deref())
    .bind(new_question.difficulty)
    .bind(new_question.category)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

/// Upserts questions by id. Existing rows not present in `questions` are left alone.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO questions (id, question, answer, difficulty, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.difficulty)
        .bind(question.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn new_question(question: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: Some(question.to_owned()),
            answer: Some("answer".to_owned()),
            difficulty: Some(1),
            category: Some(category),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let pool = pool().await;
        let id = create_question(&pool, &new_question("What is 2 + 2?", 1))
            .await
            .unwrap();

        let question = get_question(&pool, id).await.unwrap().unwrap();
        assert_eq!(question.question, "What is 2 + 2?");
        assert_eq!(question.category, 1);
    }

    #[tokio::test]
    async fn missing_fields_violate_constraints() {
        let pool = pool().await;
        let result = create_question(&pool, &NewQuestion::default()).await;
        assert!(result.is_err());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = pool().await;
        create_question(&pool, &new_question("Whose autobiography is entitled X?", 4))
            .await
            .unwrap();
        create_question(&pool, &new_question("Which TITLE won in 1990?", 5))
            .await
            .unwrap();
        create_question(&pool, &new_question("Who painted Mona Lisa?", 2))
            .await
            .unwrap();

        let found = search_questions(&pool, "title").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(search_questions(&pool, "zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filters_by_category_in_id_order() {
        let pool = pool().await;
        let first = create_question(&pool, &new_question("a", 3)).await.unwrap();
        create_question(&pool, &new_question("b", 1)).await.unwrap();
        let third = create_question(&pool, &new_question("c", 3)).await.unwrap();

        let ids: Vec<i64> = get_questions_for_category(&pool, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[tokio::test]
    async fn delete_missing_question_is_row_not_found() {
        let pool = pool().await;
        let id = create_question(&pool, &new_question("a", 1)).await.unwrap();

        delete_question(&pool, id).await.unwrap();
        assert!(matches!(
            delete_question(&pool, id).await,
            Err(sqlx::Error::RowNotFound)
        ));
    }
}
