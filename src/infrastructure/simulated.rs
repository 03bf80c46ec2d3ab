use crate::domain::config::GatewayEnvironment;
use crate::domain::ports::{NativeGateway, Settlement, UiContext};
use crate::domain::results::{
    ArchiveRequest, EmbeddedModuleRequest, EmbeddedModuleResult, InitRequest, LeadGenRequest,
    NativeError, TransactionRequest, TransactionResponse,
};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const LOCK: &str = "simulated gateway lock poisoned";

/// Scripted outcome for one native operation.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    /// Fire the success callback with this payload.
    Succeed(T),
    /// Fire the failure callback with this error.
    Fail(NativeError),
    /// Keep the listener alive without ever firing it, like a native layer
    /// that stalls mid-flow.
    Park,
}

impl<T: Default> Default for Scripted<T> {
    fn default() -> Self {
        Self::Succeed(T::default())
    }
}

/// Everything the simulated native SDK was asked to do, in call order.
#[derive(Debug, Default)]
pub struct Recorded {
    pub identity: Vec<(String, String)>,
    pub environments: Vec<GatewayEnvironment>,
    pub sessions: Vec<InitRequest>,
    pub transactions: Vec<TransactionRequest>,
    pub embedded_launches: Vec<EmbeddedModuleRequest>,
    pub archive_requests: Vec<ArchiveRequest>,
    pub logouts: usize,
    pub orders_shown: usize,
    pub lead_gen_calls: Vec<LeadGenRequest>,
    pub lead_status_calls: Vec<HashMap<String, String>>,
}

#[derive(Default)]
struct Scripts {
    setup: Scripted<()>,
    init: Scripted<()>,
    transaction: Scripted<TransactionResponse>,
    embedded: Scripted<EmbeddedModuleResult>,
    archive: Scripted<Value>,
    logout: Scripted<()>,
    orders: Scripted<()>,
    lead_status: Scripted<String>,
}

/// In-process stand-in for the native brokerage SDK.
///
/// Mirrors the listener-driven calling convention of the real SDK: every
/// call is recorded, then the currently scripted outcome is delivered
/// through the one-shot settlement, either inline or from a background task
/// when a latency is set. Latency delivery needs a tokio runtime.
pub struct SimulatedGateway {
    native_version: String,
    latency: Mutex<Option<Duration>>,
    recorded: Mutex<Recorded>,
    scripts: Mutex<Scripts>,
    parked: Mutex<Vec<Box<dyn Any + Send>>>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::with_version("0.0.0-sim")
    }

    pub fn with_version(native_version: impl Into<String>) -> Self {
        Self {
            native_version: native_version.into(),
            latency: Mutex::new(None),
            recorded: Mutex::new(Recorded::default()),
            scripts: Mutex::new(Scripts::default()),
            parked: Mutex::new(Vec::new()),
        }
    }

    /// Delivers all later outcomes from a background task after this delay.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().expect(LOCK) = Some(latency);
    }

    pub fn script_setup(&self, outcome: Scripted<()>) {
        self.scripts.lock().expect(LOCK).setup = outcome;
    }

    pub fn script_init(&self, outcome: Scripted<()>) {
        self.scripts.lock().expect(LOCK).init = outcome;
    }

    pub fn script_transaction(&self, outcome: Scripted<TransactionResponse>) {
        self.scripts.lock().expect(LOCK).transaction = outcome;
    }

    pub fn script_embedded_module(&self, outcome: Scripted<EmbeddedModuleResult>) {
        self.scripts.lock().expect(LOCK).embedded = outcome;
    }

    pub fn script_archive(&self, outcome: Scripted<Value>) {
        self.scripts.lock().expect(LOCK).archive = outcome;
    }

    pub fn script_logout(&self, outcome: Scripted<()>) {
        self.scripts.lock().expect(LOCK).logout = outcome;
    }

    pub fn script_show_orders(&self, outcome: Scripted<()>) {
        self.scripts.lock().expect(LOCK).orders = outcome;
    }

    pub fn script_lead_status(&self, outcome: Scripted<String>) {
        self.scripts.lock().expect(LOCK).lead_status = outcome;
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().expect(LOCK)
    }

    /// Listeners held alive by `Scripted::Park`.
    pub fn parked_listeners(&self) -> usize {
        self.parked.lock().expect(LOCK).len()
    }

    fn fire<T: Send + 'static>(&self, outcome: Scripted<T>, done: Settlement<T>) {
        let outcome = match outcome {
            Scripted::Park => {
                self.parked.lock().expect(LOCK).push(Box::new(done));
                return;
            }
            Scripted::Succeed(value) => Ok(value),
            Scripted::Fail(error) => Err(error),
        };

        let deliver = move || match outcome {
            Ok(value) => done.succeed(value),
            Err(error) => done.fail(error),
        };

        match *self.latency.lock().expect(LOCK) {
            Some(wait) => {
                tokio::spawn(async move {
                    tokio::time::sleep(wait).await;
                    deliver();
                });
            }
            None => deliver(),
        }
    }
}

impl NativeGateway for SimulatedGateway {
    fn set_sdk_identity(&self, sdk_type: &str, hybrid_version: &str) {
        self.recorded()
            .identity
            .push((sdk_type.to_owned(), hybrid_version.to_owned()));
    }

    fn sdk_version(&self) -> String {
        self.native_version.clone()
    }

    fn setup(&self, environment: GatewayEnvironment, done: Settlement<()>) {
        self.recorded().environments.push(environment);
        let outcome = self.scripts.lock().expect(LOCK).setup.clone();
        self.fire(outcome, done);
    }

    fn init_session(&self, request: InitRequest, done: Settlement<()>) {
        self.recorded().sessions.push(request);
        let outcome = self.scripts.lock().expect(LOCK).init.clone();
        self.fire(outcome, done);
    }

    fn trigger_transaction(
        &self,
        _ui: UiContext,
        request: TransactionRequest,
        done: Settlement<TransactionResponse>,
    ) {
        self.recorded().transactions.push(request);
        let outcome = self.scripts.lock().expect(LOCK).transaction.clone();
        self.fire(outcome, done);
    }

    fn launch_embedded_module(
        &self,
        _ui: UiContext,
        request: EmbeddedModuleRequest,
        done: Settlement<EmbeddedModuleResult>,
    ) {
        self.recorded().embedded_launches.push(request);
        let outcome = self.scripts.lock().expect(LOCK).embedded.clone();
        self.fire(outcome, done);
    }

    fn archive_item(&self, request: ArchiveRequest, done: Settlement<Value>) {
        self.recorded().archive_requests.push(request);
        let outcome = self.scripts.lock().expect(LOCK).archive.clone();
        self.fire(outcome, done);
    }

    fn logout(&self, _ui: UiContext, done: Settlement<()>) {
        self.recorded().logouts += 1;
        let outcome = self.scripts.lock().expect(LOCK).logout.clone();
        self.fire(outcome, done);
    }

    fn show_orders(&self, _ui: UiContext, done: Settlement<()>) {
        self.recorded().orders_shown += 1;
        let outcome = self.scripts.lock().expect(LOCK).orders.clone();
        self.fire(outcome, done);
    }

    fn trigger_lead_gen(&self, _ui: UiContext, request: LeadGenRequest) {
        self.recorded().lead_gen_calls.push(request);
    }

    fn trigger_lead_gen_with_status(
        &self,
        _ui: UiContext,
        user_details: HashMap<String, String>,
        done: Settlement<String>,
    ) {
        self.recorded().lead_status_calls.push(user_details);
        let outcome = self.scripts.lock().expect(LOCK).lead_status.clone();
        self.fire(outcome, done);
    }
}
