//! CalendarSource - Eventi del calendario e scadenze delle attività

use crate::entities::ModuleAccess;
use crate::feed::source::tables_exist;
use crate::feed::{CalendarEvent, Event, EventKind, EventSource, FetchScope};
use crate::repositories::push_id_list;
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

#[derive(Debug, FromRow)]
struct CalendarRow {
    id: i64,
    name: String,
    course_id: i64,
    modulename: String,
    eventtype: String,
    timestart: i64,
    cmid: Option<i64>,
    cmvisible: Option<i64>,
    available_from: Option<i64>,
    available_until: Option<i64>,
}

impl CalendarRow {
    /// Gli eventi di corso non hanno un'attività; quelli di modulo seguono le regole di accesso
    fn is_visible(&self, now: i64) -> bool {
        if self.modulename.is_empty() {
            return true;
        }
        match (self.cmid, self.cmvisible) {
            (Some(_), Some(visible)) => ModuleAccess {
                visible,
                available_from: self.available_from,
                available_until: self.available_until,
            }
            .is_accessible(now),
            // modulo cancellato: riferimento orfano
            _ => false,
        }
    }

    fn into_event(self) -> Event {
        Event {
            courseid: self.course_id,
            modulename: self.modulename,
            kind: EventKind::Calendar(CalendarEvent {
                eventid: self.id,
                name: self.name,
                eventtype: self.eventtype,
                cmid: self.cmid,
                timestart: self.timestart,
            }),
        }
    }
}

pub struct CalendarSource {
    connection_pool: SqlitePool,
}

impl CalendarSource {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl EventSource for CalendarSource {
    fn name(&self) -> &'static str {
        "calendar"
    }

    async fn is_available(&self) -> Result<bool, sqlx::Error> {
        tables_exist(&self.connection_pool, &["calendar_events", "course_modules"]).await
    }

    #[instrument(skip(self, scope), fields(userid = scope.userid))]
    async fn fetch(&self, scope: &FetchScope) -> Result<Vec<Event>, sqlx::Error> {
        if scope.courseids.is_empty() {
            return Ok(Vec::new());
        }
        // Le attese di completamento arrivano dalla sorgente dedicata
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT e.id, e.name, e.course_id, e.modulename, e.eventtype, e.timestart,
                   cm.id AS cmid, cm.visible AS cmvisible, cm.available_from, cm.available_until
            FROM calendar_events e
            LEFT JOIN course_modules cm
                ON cm.course_id = e.course_id AND cm.modname = e.modulename AND cm.instance = e.instance
            WHERE e.eventtype <> 'expectcompletionon'
              AND e.timestart BETWEEN "#,
        );
        query.push_bind(scope.window.from);
        query.push(" AND ");
        query.push_bind(scope.window.to);
        query.push(" AND e.course_id IN ");
        push_id_list(&mut query, &scope.courseids);
        query.push(" ORDER BY e.timestart DESC, e.id");

        let rows = query
            .build_query_as::<CalendarRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        let total = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .filter(|row| row.is_visible(scope.now))
            .map(CalendarRow::into_event)
            .collect();
        debug!("Calendar: {} of {} events visible", events.len(), total);
        Ok(events)
    }
}
