//! Wire protocol between the rendered page and the host.
//!
//! The page posts JSON text; the host decodes it on its own loop. Messages
//! from one surface are delivered in the order they were posted.

use serde::{Deserialize, Serialize};
use taskdeck_core::{TaskdeckError, TaskdeckResult};
use taskdeck_domain::TaskKey;
use tokio::sync::mpsc;

/// Calls made by the rendered page into the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    UpdateTaskStatus {
        subject: String,
        branch_number: u32,
        completed: bool,
    },
    #[serde(rename_all = "camelCase")]
    UpdateSubTaskStatus {
        subject: String,
        branch_number: u32,
        item_name: String,
        completed: bool,
    },
}

impl InboundMessage {
    pub fn decode(text: &str) -> TaskdeckResult<Self> {
        serde_json::from_str(text).map_err(|e| TaskdeckError::Bridge(e.to_string()))
    }

    pub fn encode(&self) -> TaskdeckResult<String> {
        serde_json::to_string(self).map_err(|e| TaskdeckError::Bridge(e.to_string()))
    }

    pub fn key(&self) -> TaskKey {
        match self {
            Self::UpdateTaskStatus {
                subject,
                branch_number,
                ..
            }
            | Self::UpdateSubTaskStatus {
                subject,
                branch_number,
                ..
            } => TaskKey::new(subject.clone(), *branch_number),
        }
    }
}

/// Script invocations made by the host on the rendered page. None return a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCall {
    ExpandAllTasks,
    CollapseAllTasks,
    /// Swap one card's markup, keeping expanded branches expanded.
    PatchGroup { subject: String, html: String },
    /// Swap the whole card list, keeping expanded branches expanded.
    ReplaceContent { html: String },
}

impl OutboundCall {
    /// JavaScript source for this call. Arguments are JSON-encoded, which
    /// makes them valid JS string literals.
    pub fn to_script(&self) -> String {
        match self {
            Self::ExpandAllTasks => "expandAllTasks();".to_string(),
            Self::CollapseAllTasks => "collapseAllTasks();".to_string(),
            Self::PatchGroup { subject, html } => {
                format!("patchGroup({}, {});", js_string(subject), js_string(html))
            }
            Self::ReplaceContent { html } => format!("replaceContent({});", js_string(html)),
        }
    }
}

fn js_string(value: &str) -> String {
    // U+2028/U+2029 are valid in JSON strings but end lines in older JS engines.
    serde_json::Value::from(value)
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Surface side of the channel: what a page's `postMessage` hook feeds.
#[derive(Debug, Clone)]
pub struct BridgeSender {
    tx: mpsc::UnboundedSender<String>,
}

impl BridgeSender {
    /// Posts raw message text. Fails only when the host has gone away.
    pub fn post_raw(&self, text: impl Into<String>) -> TaskdeckResult<()> {
        self.tx
            .send(text.into())
            .map_err(|_| TaskdeckError::Bridge("host is no longer listening".to_string()))
    }

    pub fn post(&self, message: &InboundMessage) -> TaskdeckResult<()> {
        self.post_raw(message.encode()?)
    }
}

/// Host side of the channel.
#[derive(Debug)]
pub struct BridgeReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

impl BridgeReceiver {
    /// Waits for the next decodable message. Undecodable text is logged and
    /// skipped. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<InboundMessage> {
        loop {
            let text = self.rx.recv().await?;
            if let Some(message) = decode_or_log(&text) {
                return Some(message);
            }
        }
    }

    /// Drains everything already queued, in posting order.
    pub fn drain(&mut self) -> Vec<InboundMessage> {
        let mut messages = Vec::new();
        while let Ok(text) = self.rx.try_recv() {
            if let Some(message) = decode_or_log(&text) {
                messages.push(message);
            }
        }
        messages
    }
}

fn decode_or_log(text: &str) -> Option<InboundMessage> {
    match InboundMessage::decode(text) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!("Dropping undecodable card view message {:?}: {}", text, e);
            None
        }
    }
}

pub fn bridge_channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BridgeSender { tx }, BridgeReceiver { rx })
}
