//! Operation markers for `logging.googleapis.com/operation`
//!
//! See <https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry#LogEntryOperation>.

use super::keys;
use super::value::Attr;

/// Where a record sits within an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    /// The record that starts the operation.
    First,
    /// A record logged inside the operation.
    Within,
    /// The record that ends the operation.
    Last,
}

/// Identifies a group of related records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    pub id: String,
    pub producer: String,
}

impl Operation {
    pub fn new(id: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            producer: producer.into(),
        }
    }

    /// The `operation` group for a record in the given phase.
    pub fn to_attr(&self, phase: OperationPhase) -> Attr {
        let mut attrs = vec![
            Attr::new("id", &self.id),
            Attr::new("producer", &self.producer),
        ];
        match phase {
            OperationPhase::First => attrs.push(Attr::new("first", true)),
            OperationPhase::Last => attrs.push(Attr::new("last", true)),
            OperationPhase::Within => {}
        }
        Attr::group(keys::OPERATION, attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let op = Operation::new("id", "producer");

        let json = |phase| op.to_attr(phase).value.to_json_value();
        assert_eq!(
            json(OperationPhase::First),
            serde_json::json!({"id": "id", "producer": "producer", "first": true})
        );
        assert_eq!(
            json(OperationPhase::Within),
            serde_json::json!({"id": "id", "producer": "producer"})
        );
        assert_eq!(
            json(OperationPhase::Last),
            serde_json::json!({"id": "id", "producer": "producer", "last": true})
        );
    }
}
