//! Prometheus metrics for the dispatcher.
//!
//! [`RpcMetrics`] owns a dedicated [`Registry`] that the HTTP `/metrics`
//! endpoint encodes into the Prometheus text exposition format.

use prometheus::{register_int_counter_with_registry, Encoder, IntCounter, Opts, Registry, TextEncoder};

use crate::error::RpcError;

pub struct RpcMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    /// Requests dispatched, whatever their outcome.
    pub requests: IntCounter,
    /// Requests answered with an error envelope.
    pub request_errors: IntCounter,
    /// Pending blocks received by `receiveAll`.
    pub blocks_received: IntCounter,
    /// Pending blocks `receiveAll` recorded as failed.
    pub blocks_failed: IntCounter,
    /// Send blocks accepted by the node.
    pub blocks_sent: IntCounter,
}

impl RpcMetrics {
    pub fn new() -> Result<Self, RpcError> {
        let registry = Registry::new();

        let requests = register_int_counter_with_registry!(
            Opts::new("nano_mcp_requests_total", "Total requests dispatched"),
            registry
        )?;
        let request_errors = register_int_counter_with_registry!(
            Opts::new(
                "nano_mcp_request_errors_total",
                "Total requests answered with an error envelope"
            ),
            registry
        )?;
        let blocks_received = register_int_counter_with_registry!(
            Opts::new("nano_mcp_blocks_received_total", "Total pending blocks received"),
            registry
        )?;
        let blocks_failed = register_int_counter_with_registry!(
            Opts::new(
                "nano_mcp_blocks_failed_total",
                "Total pending blocks that failed to be received"
            ),
            registry
        )?;
        let blocks_sent = register_int_counter_with_registry!(
            Opts::new("nano_mcp_blocks_sent_total", "Total send blocks processed"),
            registry
        )?;

        Ok(Self {
            registry,
            requests,
            request_errors,
            blocks_received,
            blocks_failed,
            blocks_sent,
        })
    }

    /// Encode all metrics in the Prometheus text format.
    pub fn encode(&self) -> Result<String, RpcError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| RpcError::Server(e.to_string()))
    }
}
