mod events;
mod simulated;
mod websocket;

pub use events::{ClientCommand, ServerEvent};
pub use simulated::SimulatedChannel;
pub use websocket::WsChannel;

use async_channel::Receiver;
use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Error;

/// Remainder of a disconnect: flushing and closing the transport. It owns
/// everything it needs, so callers may await it after releasing the channel.
pub type Closing = BoxFuture<'static, ()>;

/// Persistent duplex connection to the route server. Every session is
/// multiplexed over one channel and demultiplexed by route id.
#[async_trait]
pub trait Channel {
    /// No-op when already connected.
    async fn connect(&mut self) -> Result<(), Error>;

    /// Fire-and-forget; fails only when the channel is not connected.
    async fn emit(&self, command: ClientCommand) -> Result<(), Error>;

    /// Inbound event stream. The same stream survives reconnects.
    fn events(&self) -> Receiver<ServerEvent>;

    /// Marks the channel disconnected right away.
    fn disconnect(&mut self) -> Closing;

    fn is_connected(&self) -> bool;
}
