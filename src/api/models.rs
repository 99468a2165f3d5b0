use serde::{Deserialize, Serialize};

use crate::form::SubmissionInput;

/// The document written to the `"stories"` collection. `tel` carries the
/// submitted phone number verbatim; `timestamp` is Unix epoch seconds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoryRecord {
    pub name: String,
    pub tel: String,
    pub email: String,
    pub address: String,
    pub message: String,
    pub timestamp: i64,
}

impl StoryRecord {
    pub fn from_input(input: &SubmissionInput, timestamp: i64) -> Self {
        Self {
            name: input.name.clone(),
            tel: input.number.clone(),
            email: input.email.clone(),
            address: input.address.clone(),
            message: input.message.clone(),
            timestamp,
        }
    }
}

/// What the server hands back for a created story.
#[derive(Debug, Clone)]
pub struct StoryReceipt {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_renames_number_to_tel_verbatim() {
        let input = SubmissionInput {
            name: "A".into(),
            number: " +234 8142 995114 ".into(),
            email: "a@b.com".into(),
            address: "X".into(),
            message: "hi".into(),
        };
        let record = StoryRecord::from_input(&input, 1_700_000_000);
        assert_eq!(record.tel, " +234 8142 995114 ");
        assert_eq!(record.timestamp, 1_700_000_000);
    }

    #[test]
    fn record_serializes_with_the_wire_field_names() {
        let input = SubmissionInput {
            name: "A".into(),
            number: "123".into(),
            email: "a@b.com".into(),
            address: "X".into(),
            message: "hi".into(),
        };
        let json = serde_json::to_value(StoryRecord::from_input(&input, 42)).unwrap();
        assert_eq!(json["tel"], "123");
        assert_eq!(json["timestamp"], 42);
        assert!(json.get("number").is_none());
    }
}
