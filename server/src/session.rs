//! Shared session state: one controller, broadcast to every viewer

use anyhow::Result;
use coil_field::{render_panel, CoilParams, ControlEvent, Controller, FieldError, SessionConfig};
use tokio::sync::{broadcast, RwLock};
use tracing::info;

/// One outgoing WebSocket frame
#[derive(Clone, Debug)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

pub struct AppState {
    controller: RwLock<Controller>,
    frame_tx: broadcast::Sender<Frame>,
    panel: String,
}

fn params_message(params: &CoilParams) -> String {
    serde_json::json!({ "type": "params", "params": params }).to_string()
}

impl AppState {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let (frame_tx, _) = broadcast::channel::<Frame>(16);
        Ok(Self {
            controller: RwLock::new(Controller::new(config)),
            frame_tx,
            panel: render_panel()?,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.frame_tx.subscribe()
    }

    pub fn panel(&self) -> &str {
        &self.panel
    }

    pub fn panel_message(&self) -> String {
        serde_json::json!({ "type": "panel", "text": self.panel }).to_string()
    }

    /// Frames describing the current state: parameters, then the curve
    pub async fn snapshot(&self) -> Vec<Frame> {
        let controller = self.controller.read().await;
        vec![
            Frame::Text(params_message(controller.params())),
            Frame::Binary(controller.curve().to_binary()),
        ]
    }

    pub async fn params(&self) -> CoilParams {
        *self.controller.read().await.params()
    }

    pub async fn curve_json(&self) -> serde_json::Value {
        self.controller.read().await.curve().to_json()
    }

    /// Apply an event, recompute, and push the new state to all viewers
    pub async fn apply(&self, event: ControlEvent) -> Result<CoilParams, FieldError> {
        let mut controller = self.controller.write().await;
        let (binary, samples) = {
            let curve = controller.apply(event)?;
            (curve.to_binary(), curve.len())
        };
        let params = *controller.params();

        info!("Generated curve: {} samples, {} bytes, {}", samples, binary.len(), params);

        // No receivers is fine: nobody is watching yet
        let _ = self.frame_tx.send(Frame::Text(params_message(&params)));
        let _ = self.frame_tx.send(Frame::Binary(binary));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coil_field::Param;

    #[tokio::test]
    async fn test_apply_broadcasts_params_then_curve() {
        let state = AppState::new(&SessionConfig::default()).unwrap();
        let mut rx = state.subscribe();

        let params = state
            .apply(ControlEvent::Set { param: Param::Current, value: 4.0 })
            .await
            .unwrap();
        assert_eq!(params.current, 4.0);

        match rx.recv().await.unwrap() {
            Frame::Text(text) => assert!(text.contains("\"current\":4.0")),
            other => panic!("expected params text, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            Frame::Binary(data) => assert_eq!(&data[0..8], b"CURVE\0\0\0"),
            other => panic!("expected curve binary, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_load_is_not_broadcast() {
        let state = AppState::new(&SessionConfig::default()).unwrap();
        let mut rx = state.subscribe();

        let bad = CoilParams { turns: 0, ..Default::default() };
        assert!(state.apply(ControlEvent::Load { params: bad }).await.is_err());
        assert!(rx.try_recv().is_err());
        assert_eq!(state.params().await, CoilParams::default());
    }
}
