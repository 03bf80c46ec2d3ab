use crate::domain::results::NativeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// A failure reported verbatim by the native SDK's failure callback.
    #[error("native call failed: {0}")]
    Native(NativeError),
    /// Gateway setup could not complete; carries the raw reason text from
    /// the native setup listener.
    #[error("gateway setup failed: {0}")]
    Setup(String),
    /// The operation needs a foreground UI surface and none is attached.
    #[error("no foreground ui context available")]
    UiContextUnavailable,
    /// The native side dropped its one-shot listener without settling it.
    #[error("native listener dropped without settling")]
    ListenerDropped,
}
