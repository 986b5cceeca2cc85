use serde_json::Value;
use thiserror::Error;

/// Logical tables. Each declares the item attributes that form its key, the
/// way a document store would; items carry their own key fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Grades,
    Periods,
    Students,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Grades => "grades",
            Table::Periods => "periods",
            Table::Students => "students",
        }
    }

    pub fn partition_attr(self) -> &'static str {
        match self {
            Table::Grades => "studentId",
            Table::Periods => "gradeId",
            Table::Students => "studentId",
        }
    }

    pub fn sort_attr(self) -> Option<&'static str> {
        match self {
            Table::Grades => Some("gradeId"),
            Table::Periods | Table::Students => None,
        }
    }
}

/// Full primary key of one item. `sort` is empty for tables keyed by the
/// partition attribute alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub partition: String,
    pub sort: Option<String>,
}

impl Key {
    pub fn partition(partition: impl Into<String>) -> Self {
        Key {
            partition: partition.into(),
            sort: None,
        }
    }

    pub fn composite(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Key {
            partition: partition.into(),
            sort: Some(sort.into()),
        }
    }
}

/// A stored item: a JSON object including its own key attributes.
pub type Item = Value;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("corrupt stored item: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("item is missing key attribute {0}")]
    MissingKeyAttribute(&'static str),
}

/// Key-value persistence with per-item atomicity. Puts are unconditional
/// overwrites; `batch_put` is a single atomicity boundary; nothing here
/// retries. Handed into each operation explicitly so tests can substitute
/// an in-memory double.
pub trait RecordStore {
    fn get(&self, table: Table, key: &Key) -> Result<Option<Item>, StoreError>;

    /// All items sharing a partition key, in sort-key order.
    fn query(&self, table: Table, partition: &str) -> Result<Vec<Item>, StoreError>;

    fn scan(&self, table: Table) -> Result<Vec<Item>, StoreError>;

    fn put(&self, table: Table, item: Item) -> Result<(), StoreError>;

    /// Removes one item and returns it, or `None` when nothing matched.
    fn delete(&self, table: Table, key: &Key) -> Result<Option<Item>, StoreError>;

    fn batch_put(&self, table: Table, items: Vec<Item>) -> Result<(), StoreError>;
}

/// Pulls the key attributes out of an item about to be written.
pub fn item_key(table: Table, item: &Item) -> Result<Key, StoreError> {
    let partition = item
        .get(table.partition_attr())
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingKeyAttribute(table.partition_attr()))?
        .to_string();
    let sort = match table.sort_attr() {
        Some(attr) => Some(
            item.get(attr)
                .and_then(Value::as_str)
                .ok_or(StoreError::MissingKeyAttribute(attr))?
                .to_string(),
        ),
        None => None,
    };
    Ok(Key { partition, sort })
}
