use derive_more::Display;

/// The state of the client within a single run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum ClientState {
    /// The client has not connected yet.
    #[display("disconnected")]
    Disconnected = 0,
    /// The client is connecting.
    #[display("connecting")]
    Connecting = 1,
    /// The connection is open but no socket option has been applied yet.
    #[display("connected")]
    Connected = 2,
    /// All socket options have been applied.
    #[display("configured")]
    Configured = 3,
    /// The payload has been written.
    #[display("sent")]
    Sent = 4,
    /// The connection has been closed.
    #[display("closed")]
    Closed = 5,
}

impl From<ClientState> for u8 {
    fn from(value: ClientState) -> Self {
        value as u8
    }
}

impl From<u8> for ClientState {
    fn from(value: u8) -> Self {
        match value {
            0 => ClientState::Disconnected,
            1 => ClientState::Connecting,
            2 => ClientState::Connected,
            3 => ClientState::Configured,
            4 => ClientState::Sent,
            5 => ClientState::Closed,
            // Unknown values cannot come from the client itself, fall back to Disconnected
            _ => ClientState::Disconnected,
        }
    }
}
