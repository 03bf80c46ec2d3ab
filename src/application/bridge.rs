use crate::domain::config::GatewayEnvironment;
use crate::domain::params::{self, UserDetails, UtmParams};
use crate::domain::ports::{NativeGatewayRef, SettledReceiver, Settlement, UiContextProviderRef};
use crate::domain::results::{
    ArchiveRequest, EmbeddedModuleRequest, EmbeddedModuleResult, InitRequest, LeadGenRequest,
    TransactionRequest, TransactionResponse,
};
use crate::error::{BridgeError, Result};
use serde_json::Value;
use tokio::sync::RwLock;

/// SDK type tag reported to the native layer for hybrid-caller tracking.
pub const SDK_TYPE: &str = "hybrid";

/// The bridge's own version, reported alongside the SDK type and embedded
/// in the composite version string.
pub const BRIDGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Translation layer between a dynamic scripting-style caller and the typed
/// native brokerage SDK.
///
/// Holds no state beyond the default broker list: configuration is handed
/// to the native layer per call, and every listener-backed operation is a
/// two-state machine (pending, then settled exactly once). There is no
/// retry, timeout, or cancellation in this layer; a native callback that
/// never fires leaves the call pending indefinitely.
pub struct GatewayBridge {
    native: NativeGatewayRef,
    ui: UiContextProviderRef,
    default_brokers: RwLock<Vec<String>>,
}

impl GatewayBridge {
    pub fn new(native: NativeGatewayRef, ui: UiContextProviderRef) -> Self {
        Self {
            native,
            ui,
            default_brokers: RwLock::new(Vec::new()),
        }
    }

    /// Configures the gateway environment from the raw scripting-side
    /// config object (`environmentName`, `gatewayName`, `isLeprechaun`,
    /// `isAmoEnabled`, `brokerList`).
    ///
    /// Normalization is lenient; malformed fields degrade to safe defaults
    /// and never fail the call. The broker list becomes the new process-wide
    /// default for later transactions (last configure wins). The native
    /// layer is tagged with the bridge's identity before setup runs.
    pub async fn configure(&self, raw_config: &Value) -> Result<()> {
        tracing::debug!("configure: start");
        self.native.set_sdk_identity(SDK_TYPE, BRIDGE_VERSION);

        let environment = GatewayEnvironment::from_value(raw_config);
        *self.default_brokers.write().await = environment.broker_list.clone();

        let (done, settled) = Settlement::channel();
        self.native.setup(environment, done);
        match settled.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(BridgeError::Setup(
                reason.error_message.unwrap_or_default(),
            )),
            Err(_) => Err(BridgeError::ListenerDropped),
        }
    }

    /// Fire-and-forget notification of the bridge's SDK type and version.
    pub fn set_hybrid_version(&self, version: &str) {
        self.native.set_sdk_identity(SDK_TYPE, version);
    }

    /// Composite version string: `native:<v>,hybrid:<v>`.
    pub fn version(&self) -> String {
        format!(
            "native:{},hybrid:{}",
            self.native.sdk_version(),
            BRIDGE_VERSION
        )
    }

    /// Starts a session with the given token. The native success payload is
    /// discarded; the call resolves `true`. Native failures surface
    /// verbatim as `{errorCode, errorMessage}`.
    pub async fn init_session(&self, token: &str) -> Result<bool> {
        tracing::debug!("init_session: start");
        let (done, settled) = Settlement::channel();
        self.native.init_session(
            InitRequest {
                sdk_token: token.to_owned(),
            },
            done,
        );
        settle(settled).await.map(|()| true)
    }

    /// Runs a transaction flow.
    ///
    /// An explicit non-empty broker list wins; otherwise the default stored
    /// by the last `configure` is used. Fails fast with
    /// [`BridgeError::UiContextUnavailable`] when no foreground surface is
    /// attached, without touching the native SDK.
    pub async fn trigger_transaction(
        &self,
        transaction_id: &str,
        utm_params: Option<&Value>,
        broker_list: Option<&Value>,
    ) -> Result<TransactionResponse> {
        tracing::debug!(transaction_id, "trigger_transaction: start");
        let Some(ui) = self.ui.current() else {
            return Err(BridgeError::UiContextUnavailable);
        };

        let explicit = params::string_list(broker_list);
        let broker_list = if explicit.is_empty() {
            self.default_brokers.read().await.clone()
        } else {
            explicit
        };

        let request = TransactionRequest {
            transaction_id: transaction_id.to_owned(),
            utm_params: UtmParams::from_value(utm_params).into_map(),
            broker_list,
        };

        let (done, settled) = Settlement::channel();
        self.native.trigger_transaction(ui, request, done);
        settle(settled).await
    }

    /// Launches the embedded web module at the given endpoint.
    ///
    /// Fails fast with [`BridgeError::UiContextUnavailable`] when no
    /// foreground surface is attached.
    pub async fn launch_embedded_module(
        &self,
        target_endpoint: &str,
        module_params: &str,
    ) -> Result<EmbeddedModuleResult> {
        tracing::debug!(target_endpoint, "launch_embedded_module: start");
        let Some(ui) = self.ui.current() else {
            return Err(BridgeError::UiContextUnavailable);
        };

        let request = EmbeddedModuleRequest {
            target_endpoint: target_endpoint.to_owned(),
            params: module_params.to_owned(),
        };

        let (done, settled) = Settlement::channel();
        self.native.launch_embedded_module(ui, request, done);
        settle(settled).await
    }

    /// Marks an item as archived. Whatever structured response the native
    /// SDK produces is passed back unmodified.
    pub async fn archive_item(&self, item_id: &str) -> Result<Value> {
        tracing::debug!(item_id, "archive_item: start");
        let (done, settled) = Settlement::channel();
        self.native.archive_item(
            ArchiveRequest {
                item_id: item_id.to_owned(),
            },
            done,
        );
        settle(settled).await
    }

    /// Logs the user out and clears the native web session.
    ///
    /// Known gap carried over from the original bridge: with no foreground
    /// surface attached this call never settles. Callers awaiting it will
    /// hang; only a warning is emitted.
    pub async fn logout(&self) -> Result<bool> {
        let Some(ui) = self.ui.current() else {
            tracing::warn!("logout: no ui context, call will never settle");
            return std::future::pending().await;
        };

        let (done, settled) = Settlement::channel();
        self.native.logout(ui, done);
        settle(settled).await.map(|()| true)
    }

    /// Shows the user's recent orders, including pending and failed ones.
    ///
    /// Same gap as [`GatewayBridge::logout`]: never settles without a
    /// foreground surface.
    pub async fn show_orders(&self) -> Result<bool> {
        let Some(ui) = self.ui.current() else {
            tracing::warn!("show_orders: no ui context, call will never settle");
            return std::future::pending().await;
        };

        let (done, settled) = Settlement::channel();
        self.native.show_orders(ui, done);
        settle(settled).await.map(|()| true)
    }

    /// Fire-and-forget lead-gen flow. Both parameter objects are flattened
    /// to string-only maps. Silently dropped (with a warning) when no
    /// foreground surface is attached.
    pub fn trigger_lead_gen(&self, user_details: Option<&Value>, utm_params: Option<&Value>) {
        let Some(ui) = self.ui.current() else {
            tracing::warn!("trigger_lead_gen: no ui context, dropping call");
            return;
        };

        let request = LeadGenRequest {
            user_details: UserDetails::from_value(user_details).into_map(),
            utm_params: UtmParams::from_value(utm_params).into_map(),
        };
        self.native.trigger_lead_gen(ui, request);
    }

    /// Lead-gen flow that resolves with the native status string. The
    /// native listener for this flow has no failure arm. Never settles
    /// without a foreground surface, matching [`GatewayBridge::logout`].
    pub async fn trigger_lead_gen_with_status(
        &self,
        user_details: Option<&Value>,
    ) -> Result<String> {
        let Some(ui) = self.ui.current() else {
            tracing::warn!("trigger_lead_gen_with_status: no ui context, call will never settle");
            return std::future::pending().await;
        };

        let (done, settled) = Settlement::channel();
        self.native.trigger_lead_gen_with_status(
            ui,
            UserDetails::from_value(user_details).into_map(),
            done,
        );
        settle(settled).await
    }
}

/// Awaits a one-shot settlement and maps it into the bridge error taxonomy.
async fn settle<T>(settled: SettledReceiver<T>) -> Result<T> {
    match settled.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(BridgeError::Native(error)),
        Err(_) => Err(BridgeError::ListenerDropped),
    }
}
