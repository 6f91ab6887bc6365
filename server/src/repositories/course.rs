//! CourseRepository - Repository per corsi e iscrizioni

use crate::entities::Course;
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

// COURSE REPOSITORY
#[derive(Clone)]
pub struct CourseRepository {
    connection_pool: SqlitePool,
}

impl CourseRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Corsi visibili a cui l'utente è iscritto: delimitano ogni query successiva del feed
    #[instrument(skip(self))]
    pub async fn find_enrolled(&self, user_id: &i64) -> Result<Vec<Course>, Error> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT c.id, c.shortname, c.fullname, c.visible
            FROM courses c
            INNER JOIN enrolments e ON e.course_id = c.id
            WHERE e.user_id = ? AND c.visible = 1
            ORDER BY c.fullname
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("User is enrolled in {} visible courses", courses.len());
        Ok(courses)
    }
}
