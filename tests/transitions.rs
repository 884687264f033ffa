mod common;

use std::time::Duration;

use common::{animated_config, app, fast_animation};
use pageshell::animator::{Animator, SettleOutcome};
use pageshell::dom::{Document, Platform, ViewNode};
use pageshell::lifecycle::Lifetime;

#[tokio::test]
async fn every_class_toggle_gets_a_completion_event() {
    let mut app = app(animated_config());
    for location in ["/dashboard", "/about", "/userprofile/alice", "/dashboard/bob"] {
        app.navigate(location);
        app.settle().await;
    }

    let stats = app.dispatcher().animator().stats();
    assert_eq!(stats.timed_out, 0, "a transition never completed: {stats:?}");
    assert!(stats.completed >= 4);
    assert_eq!(app.document().mount().len(), 1);
    let view = app.document().mount().first().unwrap();
    assert_eq!(view.listener_count(), 0);
    assert!(!view.has_class("page-in"));
    assert!(!view.has_class("page-out"));
}

#[tokio::test]
async fn enter_removes_stale_sibling_on_completion() {
    let config = fast_animation();
    let document = Document::new(Platform::from_config(&config), "m-view");
    let animator = Animator::new(&config, document.platform());
    let lifetime = Lifetime::new();

    let old = ViewNode::new("div").with_text("old");
    document.mount().insert_front(&old);
    let new = ViewNode::new("div").with_text("new");
    document.mount().insert_front(&new);
    assert_eq!(new.next_sibling(), Some(old.clone()));

    let render = animator.animate(Some(&old), &new, &lifetime.handle());
    // Still both mounted until the transition completes.
    assert_eq!(document.mount().len(), 2);
    render.settled().await;
    assert_eq!(document.mount().children(), vec![new]);
    assert_eq!(document.engine().transitions_started(), 2);
}

#[tokio::test]
async fn rapid_navigation_leaves_only_latest_view() {
    let mut app = app(animated_config());
    app.navigate("/dashboard");
    app.navigate("/about");
    app.navigate("/userprofile/carol");
    app.settle().await;

    let views = app.document().mount().children();
    assert_eq!(views.len(), 1);
    assert!(views[0].text().contains(&"Username: carol".to_string()));
    assert_eq!(views[0].listener_count(), 0);
    assert_eq!(app.dispatcher().animator().stats().timed_out, 0);
}

#[tokio::test]
async fn zero_duration_is_reported_and_cleaned_up() {
    let mut config = animated_config();
    config.animation.duration_ms = 0;
    config.animation.settle_timeout_ms = 40;
    let mut app = app(config);

    app.navigate("/dashboard");
    app.navigate("/about");
    let started = tokio::time::Instant::now();
    let outcomes = app.settle().await;

    assert!(outcomes.contains(&SettleOutcome::TimedOut));
    assert!(started.elapsed() >= Duration::from_millis(40));
    assert!(app.dispatcher().animator().stats().timed_out >= 1);
    assert_eq!(app.document().mount().len(), 1);
}
