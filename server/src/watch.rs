//! Parameter file watcher: edits to a JSON snapshot drive the session

use anyhow::{Context, Result};
use coil_field::{CoilParams, ControlEvent};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::session::AppState;

/// Read a `CoilParams` JSON file; every control must be valid and in range
pub async fn read_params_file(path: &Path) -> Result<CoilParams> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read params file: {:?}", path))?;
    let params: CoilParams = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse params file: {:?}", path))?;
    params.validate()?;
    params.check_ranges()?;
    Ok(params)
}

/// Read a `CoilParams` JSON file and load it into the session
pub async fn load_params_file(state: &AppState, path: &Path) -> Result<CoilParams> {
    let params = read_params_file(path).await?;
    Ok(state.apply(ControlEvent::Load { params }).await?)
}

pub async fn watch_params_file(path: PathBuf, state: Arc<AppState>) -> Result<()> {
    let (notify_tx, mut notify_rx) = mpsc::channel::<PathBuf>(10);

    let mut debouncer = new_debouncer(Duration::from_millis(200), move |res: DebounceEventResult| {
        if let Ok(events) = res {
            for event in events {
                let _ = notify_tx.blocking_send(event.path);
            }
        }
    })?;

    let watch_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    debouncer.watcher().watch(watch_dir, RecursiveMode::NonRecursive)?;

    info!("Watching directory: {:?}", watch_dir);

    while let Some(changed) = notify_rx.recv().await {
        if changed == path || changed.file_name() == path.file_name() {
            info!("Params file changed, recomputing field...");
            if let Err(e) = load_params_file(&state, &path).await {
                error!("{:#}", e);
            }
        }
    }

    Ok(())
}
