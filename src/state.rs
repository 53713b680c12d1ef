use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Runs a mutation under the lock and writes the document back if it succeeded.
    pub async fn mutate<T, E>(
        &self,
        op: impl FnOnce(&mut AppData) -> Result<T, E>,
    ) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        let mut data = self.data.lock().await;
        let result = op(&mut *data)?;
        persist_data(&self.data_path, &data).await?;
        debug!("state saved to {}", self.data_path.display());
        Ok(result)
    }
}
