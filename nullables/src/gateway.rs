//! Nullable gateway: scripted responses per action.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use nano_mcp_gateway::{check_node_error, Gateway, GatewayError};
use serde_json::Value;

use crate::lock;

/// One call seen by a nullable gateway.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub action: String,
    pub params: Value,
}

type Reply = Result<Value, GatewayError>;

/// A gateway that answers from a script instead of a node.
///
/// Each action has a queue of replies. Queued replies are consumed in order;
/// the last one is sticky and answers every later call. Unscripted actions
/// fail with a node error naming the action.
pub struct NullGateway {
    script: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl NullGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful body for `action`. An `error` field in the body is
    /// surfaced the same way a real node's would be.
    pub fn respond(&self, action: &str, body: Value) -> &Self {
        self.push(action, check_node_error(body))
    }

    /// Queue a failure for `action`.
    pub fn fail(&self, action: &str, error: GatewayError) -> &Self {
        self.push(action, Err(error))
    }

    fn push(&self, action: &str, reply: Reply) -> &Self {
        lock(&self.script)
            .entry(action.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls made for one action.
    pub fn call_count(&self, action: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.action == action).count()
    }
}

impl Default for NullGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for NullGateway {
    async fn call(&self, action: &str, params: Value) -> Result<Value, GatewayError> {
        lock(&self.calls).push(RecordedCall {
            action: action.to_string(),
            params,
        });

        let mut script = lock(&self.script);
        match script.get_mut(action) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Node(format!("no reply for {action}")))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(GatewayError::Node(format!("no reply for {action}")))),
            None => Err(GatewayError::Node(format!("unscripted action {action}"))),
        }
    }
}
