use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::AppInMemoryDbCfg;
use crate::error::AppErrorCode;

// one table maps a string primary key to a row of stringified columns,
// repositories in each service decide the column layout
pub type AppInMemFetchedSingleRow = Vec<String>;
pub type AppInMemFetchedSingleTable = HashMap<String, AppInMemFetchedSingleRow>;
pub type AppInMemFetchedData = HashMap<String, AppInMemFetchedSingleTable>;
pub type AppInMemFetchKeys = HashMap<String, Vec<String>>;
pub type AppInMemUpdateData = AppInMemFetchedData;
pub type AppInMemDeleteInfo = AppInMemFetchKeys;

type DStoreError = (AppErrorCode, String);

// the store instance is shared across request-handling tasks, the futures
// created by app callers must be safe to move between threads, hence the
// `Send` / `Sync` super-traits
#[async_trait]
pub trait AbstInMemoryDStore: Send + Sync {
    async fn create_table(&self, label: &str) -> Result<(), DStoreError>;
    // upsert all given rows, returns number of rows written
    async fn save(&self, data: AppInMemUpdateData) -> Result<usize, DStoreError>;
    // fetch rows of the given keys, keys without a row are left out of
    // the result instead of raising an error
    async fn fetch(&self, keys: AppInMemFetchKeys) -> Result<AppInMemFetchedData, DStoreError>;
    async fn fetch_all(&self, label: &str) -> Result<AppInMemFetchedSingleTable, DStoreError>;
    // remove rows of the given keys, absent keys are skipped silently,
    // returns number of rows actually removed
    async fn delete(&self, info: AppInMemDeleteInfo) -> Result<usize, DStoreError>;
}

pub struct AppInMemoryDStore {
    max_items_per_table: u32,
    tables: Mutex<HashMap<String, AppInMemFetchedSingleTable>>,
}

impl AppInMemoryDStore {
    pub fn new(cfg: &AppInMemoryDbCfg) -> Self {
        Self {
            max_items_per_table: cfg.max_items,
            tables: Mutex::new(HashMap::new()),
        }
    }

    fn table_missing_error(label: &str) -> DStoreError {
        (
            AppErrorCode::DataTableNotExist,
            format!("table: {}", label),
        )
    }
}

#[async_trait]
impl AbstInMemoryDStore for AppInMemoryDStore {
    async fn create_table(&self, label: &str) -> Result<(), DStoreError> {
        let mut guard = self.tables.lock().await;
        if !guard.contains_key(label) {
            guard.insert(label.to_string(), HashMap::new());
        }
        Ok(())
    }

    async fn save(&self, data: AppInMemUpdateData) -> Result<usize, DStoreError> {
        let mut guard = self.tables.lock().await;
        // reject the whole operation before mutating any table
        for (label, rows) in data.iter() {
            let t = guard
                .get(label)
                .ok_or_else(|| Self::table_missing_error(label))?;
            let num_new = rows.keys().filter(|k| !t.contains_key(*k)).count();
            let total = t.len() + num_new;
            if total > self.max_items_per_table as usize {
                let detail = format!("table: {}, limit: {}", label, self.max_items_per_table);
                return Err((AppErrorCode::ExceedingMaxLimit, detail));
            }
        }
        let mut num_saved = 0;
        for (label, rows) in data {
            if let Some(t) = guard.get_mut(label.as_str()) {
                num_saved += rows.len();
                t.extend(rows);
            }
        }
        Ok(num_saved)
    } // end of fn save

    async fn fetch(&self, keys: AppInMemFetchKeys) -> Result<AppInMemFetchedData, DStoreError> {
        let guard = self.tables.lock().await;
        let mut out = HashMap::new();
        for (label, pkeys) in keys {
            let t = guard
                .get(label.as_str())
                .ok_or_else(|| Self::table_missing_error(label.as_str()))?;
            let found = pkeys
                .into_iter()
                .filter_map(|k| t.get(&k).map(|row| (k, row.clone())))
                .collect::<AppInMemFetchedSingleTable>();
            out.insert(label, found);
        }
        Ok(out)
    }

    async fn fetch_all(&self, label: &str) -> Result<AppInMemFetchedSingleTable, DStoreError> {
        let guard = self.tables.lock().await;
        let t = guard
            .get(label)
            .ok_or_else(|| Self::table_missing_error(label))?;
        Ok(t.clone())
    }

    async fn delete(&self, info: AppInMemDeleteInfo) -> Result<usize, DStoreError> {
        let mut guard = self.tables.lock().await;
        let mut num_removed = 0;
        for (label, pkeys) in info {
            let t = guard
                .get_mut(label.as_str())
                .ok_or_else(|| Self::table_missing_error(label.as_str()))?;
            num_removed += pkeys.into_iter().filter(|k| t.remove(k).is_some()).count();
        }
        Ok(num_removed)
    }
} // end of impl AbstInMemoryDStore
