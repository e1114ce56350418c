use serde::{Deserialize, Serialize};

/// One step of an edit script.
///
/// Payloads are never empty in scripts produced by the diff engine.
/// Concatenating the old-side steps ([`EditOp::old_side`]) in order yields the
/// original text; concatenating the new-side steps yields the updated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "text", rename_all = "snake_case")]
pub enum EditOp {
    /// Text present in both documents
    Equal(String),
    /// Text only present in the updated document
    Insert(String),
    /// Text only present in the original document
    Delete(String),
}

impl EditOp {
    /// The literal payload of this step
    pub fn text(&self) -> &str {
        match self {
            EditOp::Equal(t) | EditOp::Insert(t) | EditOp::Delete(t) => t,
        }
    }

    /// Payload length in chars (not bytes)
    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// Payload contributed to the original text, if any
    pub fn old_side(&self) -> Option<&str> {
        match self {
            EditOp::Equal(t) | EditOp::Delete(t) => Some(t),
            EditOp::Insert(_) => None,
        }
    }

    /// Payload contributed to the updated text, if any
    pub fn new_side(&self) -> Option<&str> {
        match self {
            EditOp::Equal(t) | EditOp::Insert(t) => Some(t),
            EditOp::Delete(_) => None,
        }
    }
}

/// Rebuild the original text from an edit script
pub fn reconstruct_old(ops: &[EditOp]) -> String {
    ops.iter().filter_map(EditOp::old_side).collect()
}

/// Rebuild the updated text from an edit script
pub fn reconstruct_new(ops: &[EditOp]) -> String {
    ops.iter().filter_map(EditOp::new_side).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_reconstruct() {
        let ops = vec![
            EditOp::Equal("The fee is $".into()),
            EditOp::Delete("100".into()),
            EditOp::Insert("150".into()),
            EditOp::Equal(".".into()),
        ];
        assert_eq!(reconstruct_old(&ops), "The fee is $100.");
        assert_eq!(reconstruct_new(&ops), "The fee is $150.");
    }

    #[test]
    fn test_char_len_counts_chars_not_bytes() {
        assert_eq!(EditOp::Insert("我不".into()).char_len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&EditOp::Delete("x".into())).unwrap();
        assert_eq!(json, r#"{"op":"delete","text":"x"}"#);
    }
}
