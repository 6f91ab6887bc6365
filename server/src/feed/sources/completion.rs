//! CompletionSource - Date di completamento attese delle attività

use crate::entities::ModuleAccess;
use crate::feed::source::tables_exist;
use crate::feed::{CompletionEvent, Event, EventKind, EventSource, FetchScope};
use crate::repositories::push_id_list;
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

#[derive(Debug, FromRow)]
struct CompletionRow {
    cmid: i64,
    course_id: i64,
    modname: String,
    instance: i64,
    name: String,
    visible: i64,
    available_from: Option<i64>,
    available_until: Option<i64>,
    completion_expected: i64,
    author_id: Option<i64>,
    completionstate: Option<i64>,
}

impl CompletionRow {
    fn is_completed(&self) -> bool {
        self.completionstate.is_some_and(|state| state > 0)
    }

    fn access(&self) -> ModuleAccess {
        ModuleAccess {
            visible: self.visible,
            available_from: self.available_from,
            available_until: self.available_until,
        }
    }

    fn into_event(self) -> Event {
        Event {
            courseid: self.course_id,
            modulename: self.modname,
            kind: EventKind::ExpectCompletionOn(CompletionEvent {
                cmid: self.cmid,
                instance: self.instance,
                name: self.name,
                authorid: self.author_id,
                timestart: self.completion_expected,
            }),
        }
    }
}

pub struct CompletionSource {
    connection_pool: SqlitePool,
}

impl CompletionSource {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl EventSource for CompletionSource {
    fn name(&self) -> &'static str {
        "completion"
    }

    async fn is_available(&self) -> Result<bool, sqlx::Error> {
        tables_exist(&self.connection_pool, &["course_modules", "module_completions"]).await
    }

    #[instrument(skip(self, scope), fields(userid = scope.userid))]
    async fn fetch(&self, scope: &FetchScope) -> Result<Vec<Event>, sqlx::Error> {
        if scope.courseids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT cm.id AS cmid, cm.course_id, cm.modname, cm.instance, cm.name, cm.visible,
                   cm.available_from, cm.available_until, cm.completion_expected, cm.author_id,
                   mc.completionstate
            FROM course_modules cm
            LEFT JOIN module_completions mc ON mc.cm_id = cm.id AND mc.user_id = "#,
        );
        query.push_bind(scope.userid);
        query.push(" WHERE cm.completion_expected IS NOT NULL AND cm.completion_expected BETWEEN ");
        query.push_bind(scope.window.from);
        query.push(" AND ");
        query.push_bind(scope.window.to);
        query.push(" AND cm.course_id IN ");
        push_id_list(&mut query, &scope.courseids);
        query.push(" ORDER BY cm.completion_expected DESC, cm.id");

        let rows = query
            .build_query_as::<CompletionRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        let total = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .filter(|row| row.access().is_accessible(scope.now))
            .filter(|row| !row.is_completed())
            .map(CompletionRow::into_event)
            .collect();
        debug!("Completion: {} of {} activities pending", events.len(), total);
        Ok(events)
    }
}
