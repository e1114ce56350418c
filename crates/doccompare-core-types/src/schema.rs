//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the engine, the
//! kernel and the log capture used in tests.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_COMPARISON_ID: &str = "comparison_id";
pub const FIELD_CHANGE_ID: &str = "change_id";
pub const FIELD_DOCUMENT: &str = "document";
pub const FIELD_SIDE: &str = "side";
pub const FIELD_GENERATION: &str = "generation";

// Collection sizes
pub const FIELD_OPS_LEN: &str = "ops_len";
pub const FIELD_CHANGES_LEN: &str = "changes_len";
pub const FIELD_FRAGMENTS_LEN: &str = "fragments_len";
pub const FIELD_HIGHLIGHTS_LEN: &str = "highlights_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SUPERSEDED: &str = "superseded";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_COMPARISON_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR, EVENT_SUPERSEDED];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
