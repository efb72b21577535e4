//! Output assembly.
//!
//! Per-item results arrive either as a JSON array (listing operations)
//! or a single object. The assembler flattens them into one ordered
//! list: array elements are spliced in, objects appended, and results
//! are never deduplicated or reordered relative to arrival.

use serde_json::Value;

/// Accumulates per-input-item results into a flat ordered list.
#[derive(Debug, Default)]
pub struct OutputAssembler {
    items: Vec<Value>,
}

impl OutputAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one per-item result.
    ///
    /// Arrays contribute each element in order; `null` results (a
    /// listing helper that produced nothing) contribute no item at
    /// all; anything else is appended as a single item.
    pub fn push(&mut self, result: Value) {
        match result {
            Value::Array(values) => self.items.extend(values),
            Value::Null => {}
            other => self.items.push(other),
        }
    }

    /// Finish assembly, yielding the flat output list.
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Number of items accumulated so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arrays_are_spliced_in_order() {
        let mut assembler = OutputAssembler::new();
        assembler.push(json!([{"id": 1}, {"id": 2}]));
        assembler.push(json!({"id": 3}));
        assembler.push(json!([{"id": 4}]));

        let items = assembler.into_items();
        let ids: Vec<i64> = items.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_null_result_contributes_nothing() {
        let mut assembler = OutputAssembler::new();
        assembler.push(Value::Null);
        assert!(assembler.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut assembler = OutputAssembler::new();
        assembler.push(json!({"id": 1}));
        assembler.push(json!({"id": 1}));
        assert_eq!(assembler.len(), 2);
    }

    #[test]
    fn test_empty_array_contributes_nothing() {
        let mut assembler = OutputAssembler::new();
        assembler.push(json!([]));
        assert!(assembler.is_empty());
    }
}
