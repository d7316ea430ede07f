/// Link-state transitions reported by the ingestion thread to the GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    /// TCP connect in progress.
    Connecting,
    /// Socket open, handshake accepted.
    Connected,
    /// At least one frame decoded; data is flowing.
    Streaming,
    /// The ingestion actor died. No reconnection is attempted.
    Fatal(String),
}
