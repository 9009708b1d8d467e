//! Integration tests for the panel's manual clear.

use cookie_clearer::infrastructure::mocks::{
    BadgeCall, MockClock, RecordingBadge, RecordingNotifier, ScriptedCookieStore,
};
use cookie_clearer::{AlertStyle, CompletedRequest, Cookie, CookieClearer, StatusLevel};
use std::sync::Arc;
use std::time::Duration;

fn clearer(store: Arc<ScriptedCookieStore>, badge: Arc<RecordingBadge>) -> CookieClearer {
    CookieClearer::builder()
        .with_cookie_store(store)
        .with_clock(Arc::new(MockClock::new()))
        .with_badge_surface(badge)
        .with_notification_surface(Arc::new(RecordingNotifier::new()))
        .build()
        .unwrap()
}

fn tenant_cookies() -> Arc<ScriptedCookieStore> {
    Arc::new(ScriptedCookieStore::with_cookies([
        Cookie::new("sid", "acme.domo.com", "0"),
        Cookie::new("csrf", "acme.domo.com", "0"),
        Cookie::new("theme", ".domo.com", "0"),
        Cookie::new("sid", "other.domo.com", "0"),
    ]))
}

#[tokio::test]
async fn test_alert_then_manual_clear() {
    let store = tenant_cookies();
    let badge = Arc::new(RecordingBadge::new());
    let clearer = clearer(store.clone(), badge.clone());

    clearer
        .on_request_completed(&CompletedRequest::new(431, "https://acme.domo.com/"))
        .await;
    assert_eq!(badge.text().as_deref(), Some("!"));

    let status = clearer
        .clear_active_tab(Some("https://acme.domo.com/dashboard?id=3"))
        .await;

    assert_eq!(status.level, StatusLevel::Success);
    assert_eq!(status.message, "Cleared 3 cookies for\nacme.domo.com");
    assert_eq!(status.auto_hide, Some(Duration::from_secs(3)));
    assert_eq!(badge.text().as_deref(), Some(""));

    let remaining = store.snapshot();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].domain, "other.domo.com");
}

#[tokio::test]
async fn test_opening_panel_clears_badge() {
    let badge = Arc::new(RecordingBadge::new());
    let clearer = clearer(tenant_cookies(), badge.clone());

    clearer.panel_opened().await;

    assert_eq!(badge.calls(), vec![BadgeCall::Text(String::new())]);
}

#[tokio::test]
async fn test_partial_failure_lists_first_three_errors() {
    let store = Arc::new(ScriptedCookieStore::with_cookies(
        ["a", "b", "c", "d", "e"].map(|name| Cookie::new(name, "acme.domo.com", "0")),
    ));
    for name in ["a", "b", "c", "d"] {
        store.fail_removal_of(name, "locked");
    }
    let badge = Arc::new(RecordingBadge::new());
    let clearer = clearer(store, badge.clone());

    let status = clearer
        .clear_active_tab(Some("https://acme.domo.com/"))
        .await;

    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.message.starts_with("Cleared 1, 4 errors:\n"));
    assert_eq!(status.message.lines().count(), 4);
    assert_eq!(status.auto_hide, Some(Duration::from_secs(5)));
    // Badge stays up so the user knows the problem persists
    assert!(badge.calls().is_empty());
}

#[tokio::test]
async fn test_non_tenant_tab() {
    let store = tenant_cookies();
    let clearer = clearer(store.clone(), Arc::new(RecordingBadge::new()));

    let status = clearer
        .clear_active_tab(Some("https://www.google.com/"))
        .await;

    assert_eq!(status.level, StatusLevel::Error);
    assert_eq!(
        status.message,
        "X Current tab is not a Domo instance\n(www.google.com)"
    );
    assert_eq!(status.auto_hide, Some(Duration::from_secs(5)));
    assert!(store.queries().is_empty());
}

#[tokio::test]
async fn test_app_name_from_alert_style() {
    let clearer = CookieClearer::builder()
        .with_cookie_store(tenant_cookies())
        .with_alert_style(AlertStyle {
            app_name: "Acme Cloud".to_string(),
            ..AlertStyle::default()
        })
        .build()
        .unwrap();

    let status = clearer.clear_active_tab(Some("https://domo.com/")).await;
    assert_eq!(status.message, "X Current tab is not a Acme Cloud instance\n(domo.com)");
}

#[tokio::test]
async fn test_missing_tab_and_bad_url() {
    let clearer = clearer(tenant_cookies(), Arc::new(RecordingBadge::new()));

    let status = clearer.clear_active_tab(None).await;
    assert_eq!(status.message, "X Could not get active tab");
    assert_eq!(status.auto_hide, Some(Duration::from_secs(5)));

    let status = clearer.clear_active_tab(Some("about:blank")).await;
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.message.starts_with("X Error: "));
    assert_eq!(status.auto_hide, Some(Duration::from_secs(5)));
}

#[tokio::test]
async fn test_store_outage_reported_to_user() {
    let store = tenant_cookies();
    store.fail_queries("cookie API unavailable");
    let clearer = clearer(store, Arc::new(RecordingBadge::new()));

    let status = clearer
        .clear_active_tab(Some("https://acme.domo.com/"))
        .await;

    assert_eq!(status.level, StatusLevel::Error);
    assert_eq!(
        status.message,
        "X Error: cookie store query failed: cookie API unavailable"
    );
    assert_eq!(status.auto_hide, Some(Duration::from_secs(5)));
}
