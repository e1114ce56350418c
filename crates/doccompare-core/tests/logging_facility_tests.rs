#![allow(clippy::unwrap_used, clippy::expect_used)]

use doccompare_core::errors::DocCompareError;
use doccompare_core::logging_facility::test_capture::init_test_capture;
use doccompare_core::logging_facility::Profile;
use doccompare_core::model::DocumentSide;
use doccompare_core::{log_op_end, log_op_error, log_op_start};
use doccompare_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.find(op_name, EVENT_START);
    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
    assert!(start_events[0]
        .component
        .as_deref()
        .is_some_and(|c| c.contains("logging_facility_tests")));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.find(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_end_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_3";

    log_op_end!(op_name, duration_ms = 7, changes_len = 5usize);

    let end_events = capture.find(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].field("changes_len"), Some("5"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = DocCompareError::EmptyDocument {
        side: DocumentSide::Original,
        document: "v1.pdf".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1);

    let event = &error_events[0];
    assert_eq!(event.field("err.code"), Some("ERR_EMPTY_DOCUMENT"));
    assert_eq!(event.field("err.kind"), Some("EmptyDocument"));
    assert!(event.field("message").is_some_and(|m| m.contains("v1.pdf")));
}

#[test]
fn test_assert_and_count_helpers() {
    let capture = init_test_capture();
    let op_name = "test_count_helpers_unique_5";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)),
        2
    );
}

#[test]
fn test_profile_parsing() {
    assert_eq!("dev".parse::<Profile>().unwrap(), Profile::Development);
    assert_eq!("Production".parse::<Profile>().unwrap(), Profile::Production);
    assert_eq!("test".parse::<Profile>().unwrap(), Profile::Test);
    assert!("verbose".parse::<Profile>().is_err());
}
