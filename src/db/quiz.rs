use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Quiz>, String> {
    tracing::info!("Fetch quiz {}", id);
    sqlx::query_as::<_, models::Quiz>("SELECT * FROM quiz WHERE id=$1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch quiz, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_course(pool: &PgPool, course_id: i32) -> Result<Vec<models::Quiz>, String> {
    let query_span = tracing::info_span!("Fetch quizzes by course.");
    sqlx::query_as::<_, models::Quiz>(
        r#"
        SELECT *
        FROM quiz
        WHERE course_id=$1
        ORDER BY id
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch quizzes, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_questions(pool: &PgPool, quiz_id: i32) -> Result<Vec<models::QuizQuestion>, String> {
    let query_span = tracing::info_span!("Fetch quiz questions.");
    sqlx::query_as::<_, models::QuizQuestion>(
        r#"
        SELECT *
        FROM quiz_question
        WHERE quiz_id=$1
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch quiz questions, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Stores the quiz and its questions in one transaction.
pub async fn insert(
    pool: &PgPool,
    mut quiz: models::Quiz,
    mut questions: Vec<models::QuizQuestion>,
) -> Result<(models::Quiz, Vec<models::QuizQuestion>), String> {
    let query_span = tracing::info_span!("Saving new quiz into the database");
    async {
        let mut tx = pool.begin().await?;

        quiz.id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO quiz (course_id, title, pass_percentage, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id;
            "#,
        )
        .bind(quiz.course_id)
        .bind(&quiz.title)
        .bind(quiz.pass_percentage)
        .bind(quiz.created_at)
        .bind(quiz.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        for question in questions.iter_mut() {
            question.quiz_id = quiz.id;
            question.id = sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO quiz_question (quiz_id, prompt, options, correct_option, position)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id;
                "#,
            )
            .bind(question.quiz_id)
            .bind(&question.prompt)
            .bind(&question.options)
            .bind(question.correct_option)
            .bind(question.position)
            .fetch_one(&mut *tx)
            .await?;
        }

        tx.commit().await
    }
    .instrument(query_span)
    .await
    .map(|_| (quiz, questions))
    .map_err(|err: sqlx::Error| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn insert_attempt(pool: &PgPool, mut attempt: models::QuizAttempt) -> Result<models::QuizAttempt, String> {
    let query_span = tracing::info_span!("Saving quiz attempt into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO quiz_attempt (quiz_id, user_id, score, total, passed, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id;
        "#,
    )
    .bind(attempt.quiz_id)
    .bind(attempt.user_id)
    .bind(attempt.score)
    .bind(attempt.total)
    .bind(attempt.passed)
    .bind(attempt.created_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        attempt.id = id;
        attempt
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn fetch_attempts(pool: &PgPool, quiz_id: i32, user_id: i32) -> Result<Vec<models::QuizAttempt>, String> {
    let query_span = tracing::info_span!("Fetch quiz attempts.");
    sqlx::query_as::<_, models::QuizAttempt>(
        r#"
        SELECT *
        FROM quiz_attempt
        WHERE quiz_id=$1
        AND user_id=$2
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(quiz_id)
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch quiz attempts, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
