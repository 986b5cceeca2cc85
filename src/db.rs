use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::store::{item_key, Item, Key, RecordStore, StoreError, Table};

/// SQLite-backed record store. Each logical table is one backing table of
/// (pk, sk, item) with the item kept as a JSON blob; sk is '' for tables
/// keyed by the partition attribute alone.
pub struct SqliteStore {
    conn: Connection,
}

pub fn open_store(workspace: &Path) -> anyhow::Result<SqliteStore> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("gradebook.sqlite3");
    let conn = Connection::open(db_path)?;

    for table in [Table::Grades, Table::Periods, Table::Students] {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {}(
                    pk TEXT NOT NULL,
                    sk TEXT NOT NULL DEFAULT '',
                    item TEXT NOT NULL,
                    PRIMARY KEY(pk, sk)
                )",
                table.name()
            ),
            [],
        )?;
    }

    Ok(SqliteStore { conn })
}

fn sort_or_empty(key: &Key) -> String {
    key.sort.clone().unwrap_or_default()
}

fn decode_item(raw: String) -> Result<Item, StoreError> {
    Ok(serde_json::from_str(&raw)?)
}

impl RecordStore for SqliteStore {
    fn get(&self, table: Table, key: &Key) -> Result<Option<Item>, StoreError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT item FROM {} WHERE pk = ? AND sk = ?", table.name()),
                (&key.partition, &sort_or_empty(key)),
                |r| r.get(0),
            )
            .optional()?;
        raw.map(decode_item).transpose()
    }

    fn query(&self, table: Table, partition: &str) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT item FROM {} WHERE pk = ? ORDER BY sk",
            table.name()
        ))?;
        let raws = stmt
            .query_map([partition], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(decode_item).collect()
    }

    fn scan(&self, table: Table) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT item FROM {} ORDER BY pk, sk", table.name()))?;
        let raws = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(decode_item).collect()
    }

    fn put(&self, table: Table, item: Item) -> Result<(), StoreError> {
        let key = item_key(table, &item)?;
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {}(pk, sk, item) VALUES(?, ?, ?)",
                table.name()
            ),
            (&key.partition, &sort_or_empty(&key), &item.to_string()),
        )?;
        Ok(())
    }

    fn delete(&self, table: Table, key: &Key) -> Result<Option<Item>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let raw: Option<String> = tx
            .query_row(
                &format!("SELECT item FROM {} WHERE pk = ? AND sk = ?", table.name()),
                (&key.partition, &sort_or_empty(key)),
                |r| r.get(0),
            )
            .optional()?;
        if raw.is_some() {
            tx.execute(
                &format!("DELETE FROM {} WHERE pk = ? AND sk = ?", table.name()),
                (&key.partition, &sort_or_empty(key)),
            )?;
        }
        tx.commit()?;
        raw.map(decode_item).transpose()
    }

    fn batch_put(&self, table: Table, items: Vec<Item>) -> Result<(), StoreError> {
        // One transaction per batch; the batch is the atomicity boundary.
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO {}(pk, sk, item) VALUES(?, ?, ?)",
                table.name()
            ))?;
            for item in &items {
                let key = item_key(table, item)?;
                stmt.execute((&key.partition, &sort_or_empty(&key), &item.to_string()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
