use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Number of questions per listing page.
pub const PAGE_SIZE: i64 = 10;

#[derive(Serialize, Deserialize, sqlx::FromRow, Clone, Debug)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// One page of the question listing, ordered by ascending id. `page` is
/// one-based; an out-of-range page comes back empty, including pages so
/// large the offset would overflow.
pub async fn get_questions_page(
    pool: &SqlitePool,
    page: i64,
    category: Option<i64>,
) -> sqlx::Result<Vec<Question>> {
    let offset = match page.checked_sub(1).and_then(|p| p.checked_mul(PAGE_SIZE)) {
        Some(offset) if offset >= 0 => offset,
        _ => return Ok(vec![]),
    };
    match category {
        Some(category) => {
            sqlx::query_as::<_, Question>(
                r#"
                SELECT id, question, answer, category, difficulty FROM questions
                WHERE category = ?1 ORDER BY id LIMIT ?2 OFFSET ?3
                "#,
            )
            .bind(category)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Question>(
                r#"
                SELECT id, question, answer, category, difficulty FROM questions
                ORDER BY id LIMIT ?1 OFFSET ?2
                "#,
            )
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn count_questions(pool: &SqlitePool, category: Option<i64>) -> sqlx::Result<i64> {
    match category {
        Some(category) => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions WHERE category = ?1")
                .bind(category)
                .fetch_one(pool)
                .await
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
                .fetch_one(pool)
                .await
        }
    }
}

/// `%` and `_` in a search term are literal characters, not LIKE wildcards.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case-insensitive substring match on question text. An empty term matches
/// every question.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE lower(question) LIKE '%' || ?1 || '%' ESCAPE '\' ORDER BY id
        "#,
    )
    .bind(escape_like(&term.to_lowercase()))
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: Option<i64>,
) -> sqlx::Result<Vec<Question>> {
    match category {
        Some(category) => {
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
        None => {
            sqlx::query_as::<_, Question>(
                r#"
                SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
                "#,
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> anyhow::Result<i64> {
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

/// Returns the number of rows removed (0 when the id is unknown).
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(q.id)
        .bind(&q.question)
        .bind(&q.answer)
        .bind(q.category)
        .bind(q.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
