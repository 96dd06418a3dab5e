//! Method dispatch.
//!
//! The dispatcher maps a method name onto the closed [`Method`] set, runs the
//! handler, and turns the outcome into an envelope. Nothing a handler does
//! escapes as anything but a [`Response`].

use std::sync::Arc;

use nano_mcp_wallet::{generate_wallet, SendRequest, SigningAccount, Wallet};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::envelope::{parse_request, Request, Response};
use crate::error::RpcError;
use crate::methods::Method;
use crate::metrics::RpcMetrics;
use crate::params::{AmountUnit, Params};

pub const SERVER_NAME: &str = "nano-mcp";

pub struct Dispatcher {
    wallet: Wallet,
    registered: Vec<Method>,
    metrics: Arc<RpcMetrics>,
}

impl Dispatcher {
    /// Register every method, or only the non-mutating ones when `read_only`.
    pub fn new(wallet: Wallet, read_only: bool, metrics: Arc<RpcMetrics>) -> Self {
        let registered = Method::ALL
            .into_iter()
            .filter(|m| !(read_only && m.is_mutating()))
            .collect();
        Self {
            wallet,
            registered,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<RpcMetrics> {
        &self.metrics
    }

    /// Names of the registered methods, in registration order.
    pub fn method_names(&self) -> Vec<&'static str> {
        self.registered.iter().map(Method::name).collect()
    }

    fn lookup(&self, name: &str) -> Option<Method> {
        Method::parse(name).filter(|m| self.registered.contains(m))
    }

    /// Handle one raw request body as it arrived on a transport. A body that
    /// does not parse still counts as a request.
    pub async fn handle_raw(&self, raw: &[u8]) -> Response {
        match parse_request(raw) {
            Ok(request) => self.handle_request(&request).await,
            Err(e) => {
                self.metrics.requests.inc();
                self.metrics.request_errors.inc();
                Response::failure(&e)
            }
        }
    }

    /// Handle one envelope, echoing its `id`.
    pub async fn handle_request(&self, request: &Request) -> Response {
        let response = Response::from_result(self.handle(&request.method, &request.params).await);
        if response.is_error() {
            self.metrics.request_errors.inc();
        }
        response.for_request(request)
    }

    /// Run `method` with `params`.
    pub async fn handle(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        self.metrics.requests.inc();
        let Some(method) = self.lookup(method) else {
            debug!(method, "unknown method");
            return Err(RpcError::MethodNotFound {
                method: method.to_string(),
                available: self.method_names(),
            });
        };
        if method.is_mutating() {
            info!(%method, "dispatching");
        } else {
            debug!(%method, "dispatching");
        }

        let params = Params::new(params)?;
        match method {
            Method::Initialize => Ok(json!({
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "methods": self.method_names(),
            })),
            Method::GenerateWallet => to_value(generate_wallet()),
            Method::GetBalance => {
                let address = params.required_str("address", 0)?;
                to_value(self.wallet.get_balance(address).await?)
            }
            Method::GetAccountInfo => {
                let address = params.required_str("address", 0)?;
                Ok(self.wallet.get_account_info(address).await?)
            }
            Method::GetPendingBlocks => {
                let address = params.required_str("address", 0)?;
                let count = params.optional_u64("count", 1)?;
                let threshold = params.raw_amount("threshold", 2)?;
                to_value(self.wallet.get_pending_blocks(address, count, threshold).await?)
            }
            Method::ConvertToDisplayUnit => {
                let raw = params.required_raw_amount("amount", 0)?;
                Ok(Value::String(raw.to_display()))
            }
            Method::ConvertFromDisplayUnit => {
                let raw = params.required_display_amount("amount", 0)?;
                Ok(Value::String(raw.to_string()))
            }
            Method::Send => self.send(&params).await,
            Method::ReceiveAll => self.receive_all(&params).await,
        }
    }

    async fn send(&self, params: &Params<'_>) -> Result<Value, RpcError> {
        let from = params.required_str("fromAddress", 0)?;
        let private_key = params.required_str("privateKey", 1)?;
        let to = params.required_str("toAddress", 2)?;
        let amount = match AmountUnit::parse(params.optional_str("unit", 4)?)? {
            AmountUnit::Raw => params.required_raw_amount("amount", 3)?,
            AmountUnit::Nano => params.required_display_amount("amount", 3)?,
        };
        let request = SendRequest::new(from, private_key, to, amount)?;

        let result = self.wallet.send(&request).await;
        if result.success {
            self.metrics.blocks_sent.inc();
        }
        to_value(result)
    }

    async fn receive_all(&self, params: &Params<'_>) -> Result<Value, RpcError> {
        let address = params.required_str("address", 0)?;
        let private_key = params.required_str("privateKey", 1)?;
        let signer = SigningAccount::new(address, private_key)?;

        let result = self.wallet.receive_all(&signer).await;
        self.metrics.blocks_received.inc_by(result.received_count as u64);
        self.metrics.blocks_failed.inc_by(result.failed.len() as u64);
        to_value(result)
    }
}

fn to_value(value: impl Serialize) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::Internal(e.to_string()))
}
