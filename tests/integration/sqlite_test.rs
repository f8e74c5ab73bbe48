//! End-to-end suggestion tests against an in-memory SQLite database.
//!
//! Uses the same seeded `people` table as `dbsuggest --demo`, so these
//! exercise the real statement text, bind parameters and row conversion.

use db_suggest::db::{DatabaseClient, SqliteClient};
use db_suggest::suggest::{AutoSuggest, SuggestBinding, SUGGESTION_LIMIT};
use db_suggest::tui::app::InputState;
use std::sync::Arc;
use std::time::{Duration, Instant};

async fn demo_component() -> AutoSuggest {
    let client = SqliteClient::connect_in_memory().await.unwrap();
    client.seed_demo().await.unwrap();

    let db: Arc<dyn DatabaseClient> = Arc::new(client);
    AutoSuggest::new(
        db,
        SuggestBinding::new(
            "people",
            vec!["name".to_string(), "email".to_string()],
            "id",
        ),
    )
}

/// Replaces the input text and runs one full debounce cycle.
async fn search(suggest: &mut AutoSuggest, input: &mut InputState, term: &str) {
    input.replace(term);
    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(input, start + Duration::from_millis(300)).await;
}

#[tokio::test]
async fn test_typing_jo_finds_john_and_joanne() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    search(&mut suggest, &mut input, "jo").await;

    assert!(suggest.is_visible());
    let labels: Vec<&str> = suggest
        .dropdown()
        .items()
        .iter()
        .map(|s| s.label.as_str())
        .collect();

    assert!(labels.contains(&"John Doe | john@example.com"));
    assert!(labels.contains(&"Joanne Smith | joanne@example.com"));
    // People without "jo" in name or email stay out.
    assert!(!labels.iter().any(|l| l.starts_with("Alice Brown")));
    assert!(!labels.iter().any(|l| l.starts_with("Pedro Alvarez")));

    assert_eq!(suggest.dropdown().selected(), 0);
}

#[tokio::test]
async fn test_null_email_renders_empty_segment() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    search(&mut suggest, &mut input, "Bob Jones").await;

    assert_eq!(suggest.dropdown().len(), 1);
    assert_eq!(suggest.dropdown().items()[0].label, "Bob Jones | ");
}

#[tokio::test]
async fn test_results_cap_at_limit() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    // Every seeded row matches "o" through its name or email.
    search(&mut suggest, &mut input, "o").await;

    assert!(suggest.is_visible());
    assert_eq!(suggest.dropdown().len(), SUGGESTION_LIMIT);
}

#[tokio::test]
async fn test_unmatched_term_hides_popup() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    search(&mut suggest, &mut input, "jo").await;
    assert!(suggest.is_visible());

    search(&mut suggest, &mut input, "zzzz").await;
    assert!(!suggest.is_visible());
    assert!(suggest.dropdown().is_empty());
}

#[tokio::test]
async fn test_hostile_input_stays_parameterized() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    search(&mut suggest, &mut input, "'; DROP TABLE people; --").await;
    assert!(!suggest.is_visible());

    // The table survived; normal searches still work.
    search(&mut suggest, &mut input, "Joanne").await;
    assert!(suggest.is_visible());
    assert_eq!(
        suggest.dropdown().items()[0].label,
        "Joanne Smith | joanne@example.com"
    );
}

#[tokio::test]
async fn test_commit_writes_label_and_reports_id() {
    let mut suggest = demo_component().await;
    let mut input = InputState::new();

    search(&mut suggest, &mut input, "Joanne").await;
    assert_eq!(suggest.dropdown().len(), 1);

    let applied = suggest
        .commit_selection(&mut input, Instant::now())
        .unwrap();

    assert_eq!(applied.id, Some("2".to_string()));
    assert_eq!(applied.label, "Joanne Smith | joanne@example.com");
    assert_eq!(input.text, "Joanne Smith | joanne@example.com");
    assert!(!suggest.is_visible());
}
