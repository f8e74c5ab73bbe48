//! Component-level suggestion tests.
//!
//! Drives full notify/poll/commit cycles against mock database clients.
//! Tests never sleep; the debounce clock is advanced by passing explicit
//! instants.

use async_trait::async_trait;
use db_suggest::db::{
    ColumnInfo, DatabaseClient, FailingDatabaseClient, MockDatabaseClient, ParamStyle,
    QueryResult, Row, Value,
};
use db_suggest::error::{Result, SuggestError};
use db_suggest::suggest::{AutoSuggest, SuggestBinding};
use db_suggest::tui::app::InputState;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn people_binding() -> SuggestBinding {
    SuggestBinding::new(
        "people",
        vec!["name".to_string(), "email".to_string()],
        "id",
    )
}

fn people_columns() -> Vec<ColumnInfo> {
    vec![
        ColumnInfo::new("id", "INTEGER"),
        ColumnInfo::new("name", "TEXT"),
        ColumnInfo::new("email", "TEXT"),
    ]
}

fn person(id: i64, name: &str, email: Option<&str>) -> Row {
    vec![
        Value::Int(id),
        Value::from(name),
        Value::from(email.map(str::to_string)),
    ]
}

/// Types `term` one character at a time with 40ms between keystrokes.
/// Returns the instant of the last mutation.
fn type_term(
    suggest: &mut AutoSuggest,
    input: &mut InputState,
    term: &str,
    start: Instant,
) -> Instant {
    let mut at = start;
    for ch in term.chars() {
        input.insert(ch);
        suggest.notify_text_changed(at);
        at += Duration::from_millis(40);
    }
    at - Duration::from_millis(40)
}

#[tokio::test]
async fn test_rapid_typing_collapses_to_one_query() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![person(1, "Joanne Smith", Some("joanne@example.com"))],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();

    let start = Instant::now();
    let last = type_term(&mut suggest, &mut input, "joanne", start);

    // Mid-typing the quiet period never elapses.
    suggest.poll(&input, last + Duration::from_millis(100)).await;
    assert_eq!(mock.call_count(), 0);

    // One quiet period after the final keystroke, exactly one query fires,
    // carrying the final text.
    suggest.poll(&input, last + Duration::from_millis(300)).await;
    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.calls()[0].1,
        vec!["%joanne%".to_string(), "%joanne%".to_string()]
    );

    suggest.poll(&input, last + Duration::from_millis(900)).await;
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_dropdown_lists_rows_in_order() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![
            person(1, "John Doe", Some("john@example.com")),
            person(2, "Joanne Smith", Some("joanne@example.com")),
            person(3, "Bob Jones", None),
        ],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;

    assert!(suggest.is_visible());
    let labels: Vec<&str> = suggest
        .dropdown()
        .items()
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec![
            "John Doe | john@example.com",
            "Joanne Smith | joanne@example.com",
            // NULL email renders as an empty segment.
            "Bob Jones | ",
        ]
    );
    assert_eq!(suggest.dropdown().selected(), 0);
}

#[tokio::test]
async fn test_placeholders_follow_client_style() {
    let mock = Arc::new(
        MockDatabaseClient::with_rows(people_columns(), Vec::new())
            .with_param_style(ParamStyle::Dollar),
    );
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;

    assert_eq!(
        mock.calls()[0].0,
        "SELECT id, name, email FROM people WHERE name LIKE $1 OR email LIKE $2 LIMIT 10"
    );
}

#[tokio::test]
async fn test_commit_round_trip() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![
            person(1, "John Doe", Some("john@example.com")),
            person(2, "Joanne Smith", Some("joanne@example.com")),
        ],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();

    let start = Instant::now();
    let last = type_term(&mut suggest, &mut input, "jo", start);
    suggest.poll(&input, last + Duration::from_millis(300)).await;
    assert!(suggest.is_visible());

    suggest.select_next();
    let applied = suggest
        .commit_selection(&mut input, last + Duration::from_millis(400))
        .unwrap();

    assert_eq!(applied.id, Some("2".to_string()));
    assert_eq!(applied.label, "Joanne Smith | joanne@example.com");
    assert_eq!(input.text, "Joanne Smith | joanne@example.com");
    assert!(!suggest.is_visible());
    // The write-back counts as a mutation, so the debounce re-arms.
    assert!(suggest.debounce().is_armed());
}

#[tokio::test]
async fn test_duplicate_labels_commit_last_row_id() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![
            person(4, "Jo Smith", Some("jo@example.com")),
            person(9, "Jo Smith", Some("jo@example.com")),
        ],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;

    // Both rows carry the same label; committing the first resolves to the
    // id captured last.
    assert_eq!(suggest.dropdown().selected(), 0);
    let applied = suggest
        .commit_selection(&mut input, start + Duration::from_millis(400))
        .unwrap();
    assert_eq!(applied.id, Some("9".to_string()));
}

#[tokio::test]
async fn test_clearing_input_hides_without_query() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![person(1, "John Doe", Some("john@example.com"))],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();

    let start = Instant::now();
    let last = type_term(&mut suggest, &mut input, "jo", start);
    suggest.poll(&input, last + Duration::from_millis(300)).await;
    assert!(suggest.is_visible());
    assert_eq!(mock.call_count(), 1);

    // Delete everything; the pending fetch finds a blank input and skips
    // the query entirely.
    input.backspace();
    input.backspace();
    let cleared = last + Duration::from_millis(500);
    suggest.notify_text_changed(cleared);
    suggest.poll(&input, cleared + Duration::from_millis(300)).await;

    assert!(!suggest.is_visible());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_failing_query_keeps_popup_hidden() {
    let db: Arc<dyn DatabaseClient> = Arc::new(FailingDatabaseClient::with_message("no table"));
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;

    assert!(!suggest.is_visible());
    // The input is untouched and the component stays usable.
    assert_eq!(input.text, "jo");
    assert_eq!(suggest.commit_selection(&mut input, start), None);
}

/// Succeeds a fixed number of times, then fails every query.
struct ExhaustibleClient {
    remaining: Mutex<u32>,
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
}

impl ExhaustibleClient {
    fn new(successes: u32, columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            remaining: Mutex::new(successes),
            columns,
            rows,
        }
    }
}

#[async_trait]
impl DatabaseClient for ExhaustibleClient {
    fn param_style(&self) -> ParamStyle {
        ParamStyle::Question
    }

    async fn query_with_params(&self, _sql: &str, _params: &[String]) -> Result<QueryResult> {
        let mut remaining = self.remaining.lock().unwrap();
        if *remaining == 0 {
            return Err(SuggestError::query("connection lost"));
        }
        *remaining -= 1;

        Ok(QueryResult {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            execution_time: Duration::from_millis(1),
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_query_failure_hides_open_popup() {
    let db: Arc<dyn DatabaseClient> = Arc::new(ExhaustibleClient::new(
        1,
        people_columns(),
        vec![person(1, "John Doe", Some("john@example.com"))],
    ));
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;
    assert!(suggest.is_visible());

    // The next fetch fails; the stale popup comes down rather than keep
    // showing results for older text.
    input.insert('h');
    let edited = start + Duration::from_millis(400);
    suggest.notify_text_changed(edited);
    suggest.poll(&input, edited + Duration::from_millis(300)).await;

    assert!(!suggest.is_visible());
    assert!(suggest.dropdown().is_empty());
}

#[tokio::test]
async fn test_resizing_settings_leaves_open_popup_alone() {
    let mock = Arc::new(MockDatabaseClient::with_rows(
        people_columns(),
        vec![
            person(1, "John Doe", Some("john@example.com")),
            person(2, "Joanne Smith", Some("joanne@example.com")),
        ],
    ));
    let db: Arc<dyn DatabaseClient> = mock.clone();
    let mut suggest = AutoSuggest::new(db, people_binding());
    let mut input = InputState::new();
    input.replace("jo");

    let start = Instant::now();
    suggest.notify_text_changed(start);
    suggest.poll(&input, start + Duration::from_millis(300)).await;
    suggest.select_next();

    suggest.set_popup_size(60, 12);

    // Contents and highlight survive; only the next render uses the new
    // geometry.
    assert!(suggest.is_visible());
    assert_eq!(suggest.dropdown().len(), 2);
    assert_eq!(suggest.dropdown().selected(), 1);
    assert_eq!(suggest.settings().width, 60);
    assert_eq!(suggest.settings().height, 12);
}
