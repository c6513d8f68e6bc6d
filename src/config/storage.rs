use std::path::PathBuf;

/// File name of the order document inside the data directory
pub const ORDERS_FILE: &str = "orders.json";

/// Where the order store keeps its document
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        StorageConfig {
            data_dir: super::var(lookup, "DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
        }
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_FILE)
    }
}
