//! LetterBuilder - Conversione degli eventi ordinati in lettere renderizzabili
//!
//! Un solo passaggio sugli eventi: prima del primo evento con chiave <= now
//! viene inserito (una volta sola) il marcatore di orientamento.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use super::LetterError;
use super::event::{CalendarEvent, CompletionEvent, Event, EventKind, PostEvent};
use super::letter::{
    AuthorRef, BasicLetter, CompletionLetter, CourseRef, Letter, OrientationMarker, PostAuthor,
    PostLetter,
};
use crate::entities::{Course, PostModule, User};

/// Dati di lookup necessari alla costruzione: corsi, utenti e radice dei link
pub struct LetterContext {
    wwwroot: String,
    courses: HashMap<i64, Course>,
    users: HashMap<i64, User>,
}

impl LetterContext {
    pub fn new(wwwroot: &str, courses: Vec<Course>, users: Vec<User>) -> Self {
        Self {
            wwwroot: wwwroot.trim_end_matches('/').to_string(),
            courses: courses.into_iter().map(|c| (c.id, c)).collect(),
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    fn course(&self, courseid: i64) -> Option<CourseRef> {
        self.courses.get(&courseid).map(|course| CourseRef {
            id: course.id,
            name: course.fullname.clone(),
            link: format!("{}/course/view.php?id={}", self.wwwroot, course.id),
        })
    }

    fn author(&self, userid: i64, courseid: i64) -> Option<AuthorRef> {
        let user = self.users.get(&userid)?;
        Some(AuthorRef {
            id: user.id,
            name: user.fullname(),
            link: format!(
                "{}/user/view.php?id={}&course={}",
                self.wwwroot, user.id, courseid
            ),
            picture: user
                .has_picture()
                .then(|| format!("{}/user/pix.php/{}/f1.jpg", self.wwwroot, user.id)),
        })
    }

    fn module_link(&self, modulename: &str, cmid: i64) -> String {
        format!("{}/mod/{}/view.php?id={}", self.wwwroot, modulename, cmid)
    }

    fn discussion_link(&self, module: PostModule, discussionid: i64) -> String {
        match module {
            PostModule::Forum => format!("{}/mod/forum/discuss.php?d={}", self.wwwroot, discussionid),
            PostModule::Moodleoverflow => format!(
                "{}/mod/moodleoverflow/discussion.php?d={}",
                self.wwwroot, discussionid
            ),
        }
    }
}

pub struct LetterBuilder<'a> {
    ctx: &'a LetterContext,
}

impl<'a> LetterBuilder<'a> {
    pub fn new(ctx: &'a LetterContext) -> Self {
        Self { ctx }
    }

    /// Converte gli eventi (gia' ordinati, piu' recente prima) in lettere.
    ///
    /// Il `contentid` di ogni lettera e' la sua posizione nell'output finale,
    /// marcatore compreso. I record orfani (corso o autore non piu' presenti)
    /// vengono esclusi; un modulo sconosciuto su un post e' un errore.
    #[instrument(skip(self, events), fields(events = events.len()))]
    pub fn build(&self, events: Vec<Event>, now: i64) -> Result<Vec<Letter>, LetterError> {
        let mut letters = Vec::with_capacity(events.len() + 1);
        let mut marker_placed = false;

        for event in &events {
            let needs_marker = !marker_placed && event.ordering_key() <= now;
            let contentid = letters.len() + usize::from(needs_marker);

            let Some(letter) = self.letter_for(event, contentid)? else {
                continue;
            };

            if needs_marker {
                letters.push(Letter::OrientationMarker(OrientationMarker {
                    contentid: letters.len(),
                    timestamp: now,
                }));
                marker_placed = true;
            }
            letters.push(letter);
        }

        debug!(letters = letters.len(), marker_placed, "Letters built");
        Ok(letters)
    }

    fn letter_for(&self, event: &Event, contentid: usize) -> Result<Option<Letter>, LetterError> {
        // Il modulo di un post va verificato prima di qualsiasi altro controllo
        let post_module = match &event.kind {
            EventKind::Post(_) => Some(PostModule::from_modname(&event.modulename).ok_or_else(
                || LetterError::UnknownModule {
                    module: event.modulename.clone(),
                },
            )?),
            _ => None,
        };

        let Some(course) = self.ctx.course(event.courseid) else {
            warn!(courseid = event.courseid, "Course no longer available, skipping event");
            return Ok(None);
        };

        let letter = match (&event.kind, post_module) {
            (EventKind::Post(post), Some(module)) => {
                self.post_letter(event, post, module, course, contentid)
            }
            (EventKind::ExpectCompletionOn(completion), _) => Some(
                self.completion_letter(event, completion, course, contentid),
            ),
            (EventKind::Calendar(calendar), _) => {
                Some(basic_letter(event, calendar, course, contentid))
            }
            (EventKind::Post(_), None) => None,
        };
        Ok(letter)
    }

    fn post_letter(
        &self,
        event: &Event,
        post: &PostEvent,
        module: PostModule,
        course: CourseRef,
        contentid: usize,
    ) -> Option<Letter> {
        let author = if post.is_anonymous() {
            PostAuthor::Anonymous
        } else {
            match self.ctx.author(post.authorid, event.courseid) {
                Some(author) => PostAuthor::Visible(author),
                None => {
                    warn!(postid = post.postid, authorid = post.authorid, "Post author not found, skipping");
                    return None;
                }
            }
        };

        let discussionlink = self.ctx.discussion_link(module, post.discussionid);
        Some(Letter::Post(PostLetter {
            contentid,
            timestamp: post.postcreated,
            course,
            modulename: event.modulename.clone(),
            postid: post.postid,
            discussionid: post.discussionid,
            discussionname: post.discussionname.clone(),
            postlink: format!("{}#p{}", discussionlink, post.postid),
            discussionlink,
            modulelink: self.ctx.module_link(module.modname(), post.cmid),
            subject: post.subject.clone(),
            message: post.message.clone(),
            author,
        }))
    }

    fn completion_letter(
        &self,
        event: &Event,
        completion: &CompletionEvent,
        course: CourseRef,
        contentid: usize,
    ) -> Letter {
        let author = completion
            .authorid
            .and_then(|id| self.ctx.author(id, event.courseid));

        Letter::ActivityCompletion(CompletionLetter {
            contentid,
            timestamp: completion.timestart,
            course,
            modulename: event.modulename.clone(),
            name: completion.name.clone(),
            activitylink: self.ctx.module_link(&event.modulename, completion.cmid),
            author,
        })
    }
}

fn basic_letter(event: &Event, calendar: &CalendarEvent, course: CourseRef, contentid: usize) -> Letter {
    Letter::Basic(BasicLetter {
        contentid,
        timestamp: calendar.timestart,
        course,
        modulename: event.modulename.clone(),
        name: calendar.name.clone(),
        eventtype: calendar.eventtype.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AnonymityLevel;
    use crate::feed::event::fixtures::{completion, deadline, post};
    use crate::feed::letter::{ANONYMOUS_AUTHOR, LetterType};
    use crate::feed::sort::merge_sort_desc;
    use proptest::prelude::*;

    fn user(id: i64, firstname: &str, picture: i64) -> User {
        User {
            id,
            username: firstname.to_lowercase(),
            firstname: firstname.to_string(),
            lastname: "Rossi".to_string(),
            picture,
            deleted: 0,
        }
    }

    fn context() -> LetterContext {
        LetterContext::new(
            "http://localhost/",
            vec![Course {
                id: 1,
                shortname: "MATH101".to_string(),
                fullname: "Mathematics 101".to_string(),
                visible: 1,
            }],
            vec![user(1, "Alice", 1), user(2, "Bob", 0)],
        )
    }

    fn types(letters: &[Letter]) -> Vec<(LetterType, i64)> {
        letters.iter().map(|l| (l.lettertype(), l.timestamp())).collect()
    }

    fn anonymous(mut event: Event, level: AnonymityLevel, first_post: bool) -> Event {
        if let EventKind::Post(post) = &mut event.kind {
            post.anonymity = level;
            post.first_post = first_post;
        }
        event
    }

    #[test]
    fn test_marker_between_future_and_past() {
        let ctx = context();
        let events = vec![
            post(1, "forum", 1, 1, 100),
            deadline(1, 1, 50),
            post(1, "forum", 2, 2, 200),
        ];
        let sorted = merge_sort_desc(events, &Event::ordering_key);

        let letters = LetterBuilder::new(&ctx).build(sorted, 75).unwrap();

        assert_eq!(
            types(&letters),
            vec![
                (LetterType::Post, 200),
                (LetterType::Post, 100),
                (LetterType::OrientationMarker, 75),
                (LetterType::Basic, 50),
            ]
        );
        let ids: Vec<usize> = letters.iter().map(Letter::contentid).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_no_marker_when_everything_is_in_the_future() {
        let ctx = context();
        let events = vec![post(1, "forum", 1, 1, 300), deadline(1, 1, 200)];

        let letters = LetterBuilder::new(&ctx).build(events, 75).unwrap();

        assert_eq!(letters.len(), 2);
        assert!(
            letters
                .iter()
                .all(|l| l.lettertype() != LetterType::OrientationMarker)
        );
    }

    #[test]
    fn test_marker_first_when_everything_is_past() {
        let ctx = context();
        let events = vec![post(1, "forum", 1, 1, 70), deadline(1, 1, 10)];

        let letters = LetterBuilder::new(&ctx).build(events, 75).unwrap();

        assert_eq!(letters[0].lettertype(), LetterType::OrientationMarker);
        assert_eq!(letters[0].timestamp(), 75);
        assert_eq!(letters.len(), 3);
    }

    #[test]
    fn test_event_at_now_counts_as_past() {
        let ctx = context();
        let letters = LetterBuilder::new(&ctx)
            .build(vec![deadline(1, 1, 75)], 75)
            .unwrap();
        assert_eq!(letters[0].lettertype(), LetterType::OrientationMarker);
    }

    #[test]
    fn test_empty_feed_has_no_marker() {
        let ctx = context();
        assert!(LetterBuilder::new(&ctx).build(vec![], 75).unwrap().is_empty());
    }

    #[test]
    fn test_fully_anonymous_moodleoverflow_redacts_every_author() {
        let ctx = context();
        let events = vec![
            anonymous(post(1, "moodleoverflow", 1, 1, 100), AnonymityLevel::Everything, true),
            anonymous(post(1, "moodleoverflow", 2, 2, 90), AnonymityLevel::Everything, false),
        ];

        let letters = LetterBuilder::new(&ctx).build(events, 500).unwrap();

        // marcatore + due post
        for export in letters.iter().skip(1).map(Letter::export) {
            assert_eq!(export["authorname"], ANONYMOUS_AUTHOR);
            assert!(!export.contains_key("authorpicture"));
            assert!(!export.contains_key("authorid"));
        }
    }

    #[test]
    fn test_topic_starter_anonymity_redacts_only_first_post() {
        let ctx = context();
        let events = vec![
            anonymous(post(1, "moodleoverflow", 2, 2, 90), AnonymityLevel::TopicStarter, false),
            anonymous(post(1, "moodleoverflow", 1, 1, 80), AnonymityLevel::TopicStarter, true),
        ];

        let letters = LetterBuilder::new(&ctx).build(events, 10).unwrap();

        assert_eq!(letters[0].export()["authorname"], "Bob Rossi");
        assert_eq!(letters[1].export()["authorname"], ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_post_links_and_picture() {
        let ctx = context();
        let letters = LetterBuilder::new(&ctx)
            .build(vec![post(1, "forum", 7, 1, 100)], 10)
            .unwrap();
        let export = letters[0].export();

        assert_eq!(export["discussionlink"], "http://localhost/mod/forum/discuss.php?d=10");
        assert_eq!(export["postlink"], "http://localhost/mod/forum/discuss.php?d=10#p7");
        assert_eq!(export["modulelink"], "http://localhost/mod/forum/view.php?id=100");
        assert_eq!(export["courselink"], "http://localhost/course/view.php?id=1");
        assert_eq!(export["authorpicture"], "http://localhost/user/pix.php/1/f1.jpg");
        assert_eq!(export["authorlink"], "http://localhost/user/view.php?id=1&course=1");
    }

    #[test]
    fn test_unknown_post_module_is_an_error() {
        let ctx = context();
        // il corso 99 non esiste: l'errore sul modulo ha comunque la precedenza
        let events = vec![post(1, "forum", 1, 1, 100), post(99, "hsuforum", 2, 1, 90)];

        let result = LetterBuilder::new(&ctx).build(events, 10);

        assert_eq!(
            result,
            Err(LetterError::UnknownModule {
                module: "hsuforum".to_string()
            })
        );
    }

    #[test]
    fn test_orphaned_records_are_skipped() {
        let ctx = context();
        let events = vec![
            deadline(42, 1, 100),
            post(1, "forum", 1, 999, 90),
            deadline(1, 2, 20),
        ];

        let letters = LetterBuilder::new(&ctx).build(events, 50).unwrap();

        assert_eq!(
            types(&letters),
            vec![(LetterType::OrientationMarker, 50), (LetterType::Basic, 20)]
        );
        assert_eq!(letters[1].contentid(), 1);
    }

    #[test]
    fn test_completion_without_author_omits_author_keys() {
        let ctx = context();
        let letters = LetterBuilder::new(&ctx)
            .build(vec![completion(1, 5, None, 100), completion(1, 6, Some(2), 90)], 10)
            .unwrap();

        let first = letters[0].export();
        assert!(!first.contains_key("authorname"));
        assert_eq!(first["activitylink"], "http://localhost/mod/quiz/view.php?id=5");
        assert_eq!(letters[1].export()["authorname"], "Bob Rossi");
    }

    proptest! {
        #[test]
        fn prop_marker_splits_future_from_past(
            keys in proptest::collection::vec(-1000i64..1000, 0..40),
            now in -1000i64..1000,
        ) {
            let ctx = context();
            let events: Vec<Event> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| deadline(1, i as i64, *k))
                .collect();
            let sorted = merge_sort_desc(events, &Event::ordering_key);

            let letters = LetterBuilder::new(&ctx).build(sorted, now).unwrap();

            let markers: Vec<usize> = letters
                .iter()
                .enumerate()
                .filter(|(_, l)| l.lettertype() == LetterType::OrientationMarker)
                .map(|(i, _)| i)
                .collect();
            let any_past = keys.iter().any(|k| *k <= now);
            prop_assert_eq!(markers.len(), usize::from(any_past));

            if let Some(&at) = markers.first() {
                prop_assert!(letters[..at].iter().all(|l| l.timestamp() > now));
                prop_assert!(letters[at + 1..].iter().all(|l| l.timestamp() <= now));
            }
            for (i, letter) in letters.iter().enumerate() {
                prop_assert_eq!(letter.contentid(), i);
            }
        }
    }
}
