//! Aggregator - Raccoglie gli eventi di tutte le sorgenti in un'unica sequenza ordinata

use super::sort::{merge_desc, merge_sort_desc};
use super::sources::{CalendarSource, CompletionSource, PostSource};
use super::{Event, EventSource, FeedError, FeedSettings, FetchScope, TimeWindow};
use crate::entities::{Course, PostModule};
use crate::repositories::CourseRepository;
use futures::future::join_all;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Risultato di una richiesta: i corsi che hanno delimitato le query e gli eventi ordinati
#[derive(Debug)]
pub struct Aggregation {
    pub courses: Vec<Course>,
    pub events: Vec<Event>,
}

pub struct Aggregator {
    courses: CourseRepository,
    /// Sorgenti in ordine di registrazione: a parità di chiave vince la prima
    sources: Vec<Arc<dyn EventSource>>,
    lookback_secs: i64,
    lookahead_secs: i64,
}

impl Aggregator {
    pub fn new(courses: CourseRepository, settings: &FeedSettings) -> Self {
        Self {
            courses,
            sources: Vec::new(),
            lookback_secs: settings.lookback_secs,
            lookahead_secs: settings.lookahead_secs,
        }
    }

    /// Calendario, completamento, forum e moodleoverflow, in quest'ordine
    pub fn with_default_sources(
        pool: SqlitePool,
        courses: CourseRepository,
        settings: &FeedSettings,
    ) -> Self {
        Self::new(courses, settings)
            .with_source(Arc::new(CalendarSource::new(pool.clone())))
            .with_source(Arc::new(CompletionSource::new(pool.clone())))
            .with_source(Arc::new(PostSource::new(pool.clone(), PostModule::Forum)))
            .with_source(Arc::new(PostSource::new(pool, PostModule::Moodleoverflow)))
    }

    pub fn with_source(mut self, source: Arc<dyn EventSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Corsi iscritti dell'utente ed eventi visibili, dal più recente al meno recente.
    ///
    /// Solo la risoluzione dei corsi iscritti può fallire; ogni sorgente è opzionale.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, userid: i64, now: i64) -> Result<Aggregation, FeedError> {
        let courses = self.courses.find_enrolled(&userid).await?;
        if courses.is_empty() {
            info!("User has no visible enrolments, empty feed");
            return Ok(Aggregation {
                courses,
                events: Vec::new(),
            });
        }

        let scope = FetchScope {
            userid,
            courseids: courses.iter().map(|course| course.id).collect(),
            window: TimeWindow::around(now, self.lookback_secs, self.lookahead_secs),
            now,
        };
        let events = self.collect(&scope).await;
        Ok(Aggregation { courses, events })
    }

    /// Interroga le sorgenti in parallelo e le fonde in ordine di registrazione
    pub async fn collect(&self, scope: &FetchScope) -> Vec<Event> {
        let per_source = join_all(
            self.sources
                .iter()
                .map(|source| fetch_optional(source.as_ref(), scope)),
        )
        .await;

        let events = per_source
            .into_iter()
            .map(|events| merge_sort_desc(events, &Event::ordering_key))
            .fold(Vec::new(), |merged, events| {
                merge_desc(merged, events, &Event::ordering_key)
            });

        info!("Aggregated {} events", events.len());
        events
    }
}

/// Una sorgente assente o in errore contribuisce una lista vuota.
/// I record fuori dai corsi iscritti o dalla finestra vengono scartati comunque.
async fn fetch_optional(source: &dyn EventSource, scope: &FetchScope) -> Vec<Event> {
    match source.is_available().await {
        Ok(true) => {}
        Ok(false) => {
            debug!("Source {} not installed, skipping", source.name());
            return Vec::new();
        }
        Err(e) => {
            warn!("Source {} availability check failed: {}", source.name(), e);
            return Vec::new();
        }
    }

    let events = match source.fetch(scope).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Source {} failed, omitting it: {}", source.name(), e);
            return Vec::new();
        }
    };

    let enrolled: HashSet<i64> = scope.courseids.iter().copied().collect();
    let fetched = events.len();
    let events: Vec<Event> = events
        .into_iter()
        .filter(|event| enrolled.contains(&event.courseid))
        .filter(|event| scope.window.contains(event.ordering_key()))
        .collect();
    if events.len() < fetched {
        warn!(
            "Source {} returned {} events outside the requested scope",
            source.name(),
            fetched - events.len()
        );
    }
    events
}
