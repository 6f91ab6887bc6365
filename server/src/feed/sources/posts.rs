//! PostSource - Post delle discussioni di forum e moodleoverflow
//!
//! Le due implementazioni di forum condividono la forma delle righe; cambiano
//! le tabelle e il fatto che solo moodleoverflow conosce l'anonimato.

use crate::entities::{AnonymityLevel, ModuleAccess, PostModule};
use crate::feed::source::tables_exist;
use crate::feed::{Event, EventKind, EventSource, FetchScope, PostEvent};
use crate::repositories::push_id_list;
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

const FORUM_POSTS_SQL: &str = r#"
    SELECT p.id AS postid, p.discussion_id, p.parent, p.userid AS authorid, p.created,
           p.subject, p.message, d.name AS discussionname, d.course_id,
           i.id AS instanceid, 0 AS anonymous,
           cm.id AS cmid, cm.visible AS cmvisible, cm.available_from, cm.available_until
    FROM forum_posts p
    INNER JOIN forum_discussions d ON d.id = p.discussion_id
    INNER JOIN forum i ON i.id = d.instance_id
    LEFT JOIN course_modules cm
        ON cm.modname = 'forum' AND cm.instance = i.id AND cm.course_id = d.course_id
    WHERE p.created BETWEEN "#;

const MOODLEOVERFLOW_POSTS_SQL: &str = r#"
    SELECT p.id AS postid, p.discussion_id, p.parent, p.userid AS authorid, p.created,
           d.name AS subject, p.message, d.name AS discussionname, d.course_id,
           i.id AS instanceid, i.anonymous,
           cm.id AS cmid, cm.visible AS cmvisible, cm.available_from, cm.available_until
    FROM moodleoverflow_posts p
    INNER JOIN moodleoverflow_discussions d ON d.id = p.discussion_id
    INNER JOIN moodleoverflow i ON i.id = d.instance_id
    LEFT JOIN course_modules cm
        ON cm.modname = 'moodleoverflow' AND cm.instance = i.id AND cm.course_id = d.course_id
    WHERE p.created BETWEEN "#;

#[derive(Debug, FromRow)]
struct PostRow {
    postid: i64,
    discussion_id: i64,
    parent: i64,
    authorid: i64,
    created: i64,
    subject: String,
    message: String,
    discussionname: String,
    course_id: i64,
    instanceid: i64,
    anonymous: i64,
    cmid: Option<i64>,
    cmvisible: Option<i64>,
    available_from: Option<i64>,
    available_until: Option<i64>,
}

impl PostRow {
    fn is_visible(&self, now: i64) -> bool {
        match (self.cmid, self.cmvisible) {
            (Some(_), Some(visible)) => ModuleAccess {
                visible,
                available_from: self.available_from,
                available_until: self.available_until,
            }
            .is_accessible(now),
            _ => false,
        }
    }

    fn into_event(self, module: PostModule) -> Option<Event> {
        let cmid = self.cmid?;
        Some(Event {
            courseid: self.course_id,
            modulename: module.modname().to_string(),
            kind: EventKind::Post(PostEvent {
                postid: self.postid,
                discussionid: self.discussion_id,
                discussionname: self.discussionname,
                instanceid: self.instanceid,
                cmid,
                authorid: self.authorid,
                subject: self.subject,
                message: self.message,
                postcreated: self.created,
                anonymity: AnonymityLevel::from_setting(self.anonymous),
                first_post: self.parent == 0,
            }),
        })
    }
}

pub struct PostSource {
    connection_pool: SqlitePool,
    module: PostModule,
}

impl PostSource {
    pub fn new(connection_pool: SqlitePool, module: PostModule) -> Self {
        Self {
            connection_pool,
            module,
        }
    }

    fn tables(&self) -> [&'static str; 3] {
        match self.module {
            PostModule::Forum => ["forum", "forum_discussions", "forum_posts"],
            PostModule::Moodleoverflow => [
                "moodleoverflow",
                "moodleoverflow_discussions",
                "moodleoverflow_posts",
            ],
        }
    }

    fn base_query(&self) -> &'static str {
        match self.module {
            PostModule::Forum => FORUM_POSTS_SQL,
            PostModule::Moodleoverflow => MOODLEOVERFLOW_POSTS_SQL,
        }
    }
}

#[async_trait]
impl EventSource for PostSource {
    fn name(&self) -> &'static str {
        self.module.modname()
    }

    async fn is_available(&self) -> Result<bool, sqlx::Error> {
        tables_exist(&self.connection_pool, &self.tables()).await
    }

    #[instrument(skip(self, scope), fields(module = self.module.modname(), userid = scope.userid))]
    async fn fetch(&self, scope: &FetchScope) -> Result<Vec<Event>, sqlx::Error> {
        if scope.courseids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = QueryBuilder::<Sqlite>::new(self.base_query());
        query.push_bind(scope.window.from);
        query.push(" AND ");
        query.push_bind(scope.window.to);
        query.push(" AND d.course_id IN ");
        push_id_list(&mut query, &scope.courseids);
        query.push(" ORDER BY p.created DESC, p.id");

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        let total = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .filter(|row| row.is_visible(scope.now))
            .filter_map(|row| row.into_event(self.module))
            .collect();
        debug!("{}: {} of {} posts visible", self.module.modname(), events.len(), total);
        Ok(events)
    }
}
