use std::collections::VecDeque;

use super::*;
use crate::generate::{generate, GenerateOptions};
use crate::memory::MemoryHost;
use crate::model::{NewPost, User, UserId, TRASH};
use crate::progress::NullProgress;
use crate::prompt::{AssumeYes, Decline};

/// Answers questions from a script and records them.
#[derive(Default)]
struct Script {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl Script {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for Script {
    fn confirm(&mut self, question: &str) -> bool {
        self.asked.push(question.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }
}

fn seeded_host(featured_image: bool) -> MemoryHost {
    let mut host = MemoryHost::default();
    let options = GenerateOptions {
        count: 4,
        taxonomies: vec!["category".into()],
        term_count: 3,
        featured_image,
        seed: Some(5),
        ..GenerateOptions::default()
    };
    generate(&mut host, &options, &mut AssumeYes, &mut NullProgress).unwrap();

    host.insert_post(NewPost {
        post_type: "post".into(),
        title: "Hand written".into(),
        content: "<p>Keep me.</p>".into(),
        status: "publish".into(),
        author: UserId(1),
        parent: None,
        meta: Vec::new(),
    })
    .unwrap();
    host.insert_term("Handmade", "category").unwrap();
    host
}

fn marked_posts(host: &MemoryHost) -> usize {
    host.posts()
        .filter(|post| post.is_marked(DEFAULT_MARKER_KEY) && post.status != TRASH)
        .count()
}

fn marked_terms(host: &MemoryHost) -> usize {
    host.terms()
        .filter(|term| term.is_marked(DEFAULT_MARKER_KEY))
        .count()
}

fn forced() -> CleanupOptions {
    CleanupOptions {
        force_delete: true,
        taxonomies: vec!["category".into()],
        ..CleanupOptions::default()
    }
}

#[test]
fn removes_exactly_the_marked_content() {
    let mut host = seeded_host(false);
    let terms_before = host.terms().count();
    assert!(marked_terms(&host) > 0);

    let report = cleanup(&mut host, &forced(), &mut AssumeYes, &mut NullProgress).unwrap();

    assert_eq!(report.posts.len(), 4);
    assert_eq!(report.terms.len(), terms_before - 1);
    assert_eq!(marked_posts(&host), 0);
    assert_eq!(marked_terms(&host), 0);
    assert_eq!(host.posts().count(), 1);
    assert_eq!(host.posts().next().unwrap().title, "Hand written");
    assert_eq!(host.terms().next().unwrap().name, "Handmade");
}

#[test]
fn without_force_posts_are_trashed() {
    let mut host = seeded_host(false);
    let options = CleanupOptions::default();
    let report = cleanup(&mut host, &options, &mut Decline, &mut NullProgress).unwrap();

    assert_eq!(report.posts.len(), 4);
    for id in &report.posts {
        assert_eq!(host.post(*id).unwrap().status, TRASH);
    }
    assert_eq!(marked_posts(&host), 0);

    let again = cleanup(&mut host, &options, &mut Decline, &mut NullProgress).unwrap();
    assert!(again.posts.is_empty());
}

#[test]
fn force_delete_must_be_confirmed() {
    let mut host = seeded_host(false);
    let mut script = Script::new(&[false]);
    let err = cleanup(&mut host, &forced(), &mut script, &mut NullProgress).unwrap_err();

    assert!(matches!(err, Error::Aborted(_)));
    assert_eq!(script.asked.len(), 1);
    assert_eq!(marked_posts(&host), 4);
    assert!(marked_terms(&host) > 0);
}

#[test]
fn deleting_terms_without_force_is_confirmed() {
    let mut host = seeded_host(false);
    let options = CleanupOptions {
        taxonomies: vec!["category".into()],
        ..CleanupOptions::default()
    };

    let mut script = Script::new(&[false]);
    let err = cleanup(&mut host, &options, &mut script, &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::Aborted(_)));
    assert_eq!(script.asked, ["Do you want to continue?"]);
    assert!(marked_terms(&host) > 0);

    let mut script = Script::new(&[true]);
    let report = cleanup(&mut host, &options, &mut script, &mut NullProgress).unwrap();
    assert!(!report.terms.is_empty());
    assert_eq!(marked_terms(&host), 0);
}

#[test]
fn unknown_taxonomies_are_confirmed_first() {
    let mut host = seeded_host(false);
    let options = CleanupOptions {
        taxonomies: vec!["genre".into(), "category".into()],
        ..forced()
    };

    let mut script = Script::new(&[true, true]);
    cleanup(&mut host, &options, &mut script, &mut NullProgress).unwrap();
    insta::assert_snapshot!(script.asked.join("\n"), @r"
    You have elected to completely remove the test posts, this cannot be undone, are you sure?
    Would you like to ignore those and continue?
    ");
}

#[test]
fn media_flag_removes_attachments() {
    let mut host = seeded_host(true);
    let attachments = |host: &MemoryHost| {
        host.posts()
            .filter(|post| post.post_type == ATTACHMENT)
            .count()
    };
    assert_eq!(attachments(&host), 4);

    cleanup(&mut host, &forced(), &mut AssumeYes, &mut NullProgress).unwrap();
    assert_eq!(attachments(&host), 4);

    let options = CleanupOptions {
        media: true,
        ..forced()
    };
    let report = cleanup(&mut host, &options, &mut AssumeYes, &mut NullProgress).unwrap();
    assert_eq!(report.posts.len(), 4);
    assert_eq!(attachments(&host), 0);
}

#[test]
fn other_authors_are_left_alone() {
    let mut host = seeded_host(false).with_user(User {
        id: UserId(2),
        login: "editor".into(),
        email: "editor@example.org".into(),
    });
    let options = CleanupOptions {
        author: "editor".parse().unwrap(),
        ..forced()
    };
    let report = cleanup(&mut host, &options, &mut AssumeYes, &mut NullProgress).unwrap();

    assert!(report.posts.is_empty());
    assert_eq!(marked_posts(&host), 4);
}

#[test]
fn missing_author_or_post_type_stops_the_run() {
    let mut host = seeded_host(false);

    let options = CleanupOptions {
        author: AuthorRef::Id(UserId(9)),
        ..CleanupOptions::default()
    };
    let err = cleanup(&mut host, &options, &mut AssumeYes, &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::UnknownAuthor(_)));

    let options = CleanupOptions {
        post_type: "product".into(),
        ..CleanupOptions::default()
    };
    let err = cleanup(&mut host, &options, &mut AssumeYes, &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::UnknownPostType(_)));
    assert_eq!(marked_posts(&host), 4);
}
