use crate::domain::config::GatewayEnvironment;
use crate::domain::results::{
    ArchiveRequest, EmbeddedModuleRequest, EmbeddedModuleResult, InitRequest, LeadGenRequest,
    NativeError, TransactionRequest, TransactionResponse,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type NativeGatewayRef = Arc<dyn NativeGateway>;
pub type UiContextProviderRef = Arc<dyn UiContextProvider>;

/// Handle to a foreground-capable surface the native SDK can present its
/// screens on. Absence at call time is a precondition failure for several
/// bridge operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiContext {
    surface: String,
}

impl UiContext {
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }
}

/// Accessor for whatever surface is currently in the foreground, if any.
pub trait UiContextProvider: Send + Sync {
    fn current(&self) -> Option<UiContext>;
}

pub type SettledReceiver<T> = oneshot::Receiver<Result<T, NativeError>>;

/// One-shot listener handed to the native SDK.
///
/// The native contract promises exactly one terminal callback per call;
/// this guards defensively anyway: the first `succeed` or `fail` wins and
/// later invocations are ignored with a warning.
pub struct Settlement<T> {
    sender: Mutex<Option<oneshot::Sender<Result<T, NativeError>>>>,
}

impl<T> Settlement<T> {
    pub fn channel() -> (Self, SettledReceiver<T>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(sender)),
            },
            receiver,
        )
    }

    pub fn succeed(&self, value: T) {
        self.settle(Ok(value));
    }

    pub fn fail(&self, error: NativeError) {
        self.settle(Err(error));
    }

    pub fn is_settled(&self) -> bool {
        self.sender.lock().expect("settlement lock poisoned").is_none()
    }

    fn settle(&self, outcome: Result<T, NativeError>) {
        let Some(sender) = self
            .sender
            .lock()
            .expect("settlement lock poisoned")
            .take()
        else {
            tracing::warn!("settlement already consumed, ignoring late callback");
            return;
        };

        // The receiver may be gone if the caller abandoned the future.
        let _ = sender.send(outcome);
    }
}

/// Outbound port to the native brokerage SDK.
///
/// Every method with a `Settlement` parameter is a synchronous registration:
/// the native side performs its work on its own schedule and fires the
/// settlement exactly once when done. The port owns transaction execution,
/// session lifecycle, broker connectivity, lead-gen backend calls, and
/// version reporting; the bridge only marshals.
pub trait NativeGateway: Send + Sync {
    /// Tags the caller as a hybrid SDK of the given type and version.
    fn set_sdk_identity(&self, sdk_type: &str, hybrid_version: &str);

    /// The native SDK's own version string.
    fn sdk_version(&self) -> String;

    fn setup(&self, environment: GatewayEnvironment, done: Settlement<()>);

    fn init_session(&self, request: InitRequest, done: Settlement<()>);

    fn trigger_transaction(
        &self,
        ui: UiContext,
        request: TransactionRequest,
        done: Settlement<TransactionResponse>,
    );

    fn launch_embedded_module(
        &self,
        ui: UiContext,
        request: EmbeddedModuleRequest,
        done: Settlement<EmbeddedModuleResult>,
    );

    /// Archive response payloads are passed back to the caller unmodified,
    /// hence the untyped value.
    fn archive_item(&self, request: ArchiveRequest, done: Settlement<Value>);

    fn logout(&self, ui: UiContext, done: Settlement<()>);

    fn show_orders(&self, ui: UiContext, done: Settlement<()>);

    /// Fire-and-forget: the native lead-gen flow reports nothing back.
    fn trigger_lead_gen(&self, ui: UiContext, request: LeadGenRequest);

    /// The status listener for this flow only has a success arm.
    fn trigger_lead_gen_with_status(
        &self,
        ui: UiContext,
        user_details: HashMap<String, String>,
        done: Settlement<String>,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_delivers_success() {
        let (settlement, mut receiver) = Settlement::channel();
        settlement.succeed(7u32);

        assert!(settlement.is_settled());
        assert_eq!(receiver.try_recv().unwrap(), Ok(7));
    }

    #[test]
    fn test_settlement_delivers_failure() {
        let (settlement, mut receiver) = Settlement::<()>::channel();
        settlement.fail(NativeError::new(401, "bad token"));

        assert_eq!(
            receiver.try_recv().unwrap(),
            Err(NativeError::new(401, "bad token"))
        );
    }

    #[test]
    fn test_settlement_ignores_second_callback() {
        let (settlement, mut receiver) = Settlement::channel();
        settlement.succeed(1u32);
        settlement.fail(NativeError::new(500, "late failure"));
        settlement.succeed(2);

        // Only the first settlement is observable.
        assert_eq!(receiver.try_recv().unwrap(), Ok(1));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_settlement_survives_abandoned_receiver() {
        let (settlement, receiver) = Settlement::channel();
        drop(receiver);
        settlement.succeed(1u32);
        assert!(settlement.is_settled());
    }
}
