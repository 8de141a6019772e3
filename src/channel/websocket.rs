use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use futures::{future, FutureExt, SinkExt, StreamExt};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{Channel, ClientCommand, Closing, ServerEvent};
use crate::error::{channel_disconnected_error, Error};

/// One socket. `alive` belongs to this socket alone, so a reader that
/// outlives its connection cannot flip the state of a newer one.
struct Connection {
    alive: Arc<AtomicBool>,
    outbound: Sender<ClientCommand>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// JSON frames over a WebSocket. A reader task feeds the event stream and a
/// writer task drains queued commands.
pub struct WsChannel {
    endpoint: String,
    events_tx: Sender<ServerEvent>,
    events_rx: Receiver<ServerEvent>,
    connection: Option<Connection>,
}

impl WsChannel {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();

        Self {
            endpoint: endpoint.into(),
            events_tx,
            events_rx,
            connection: None,
        }
    }
}

#[async_trait]
impl Channel for WsChannel {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn connect(&mut self) -> Result<(), Error> {
        if self.is_connected() {
            return Ok(());
        }

        // the server may have dropped us; clear what is left of that socket
        if let Some(stale) = self.connection.take() {
            stale.alive.store(false, Ordering::SeqCst);
            stale.outbound.close();
            stale.reader.abort();
            stale.writer.abort();
        }

        let (socket, _) = connect_async(self.endpoint.as_str()).await?;
        let (mut sink, mut stream) = socket.split();

        let (outbound, commands) = async_channel::unbounded::<ClientCommand>();

        let writer = tokio::spawn(async move {
            while let Ok(command) = commands.recv().await {
                let text = match serde_json::to_string(&command) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("dropping unencodable command: {:?}", err);
                        continue;
                    }
                };

                if let Err(err) = sink.send(Message::Text(text)).await {
                    tracing::warn!("failed to send command: {:?}", err);
                    break;
                }
            }

            let _ = sink.close().await;
        });

        // live before the reader can run, so an early close is never overwritten
        let alive = Arc::new(AtomicBool::new(true));

        let events = self.events_tx.clone();
        let connected = alive.clone();

        let reader = tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            if events.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => tracing::warn!("ignoring malformed frame {:?}: {}", text, err),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => (),
                    Err(err) => {
                        tracing::warn!("socket error: {:?}", err);
                        break;
                    }
                }
            }

            connected.store(false, Ordering::SeqCst);
            tracing::warn!("channel disconnected");
        });

        self.connection = Some(Connection {
            alive,
            outbound,
            reader,
            writer,
        });

        tracing::info!("channel connected");

        Ok(())
    }

    async fn emit(&self, command: ClientCommand) -> Result<(), Error> {
        let connection = match (&self.connection, self.is_connected()) {
            (Some(connection), true) => connection,
            _ => return Err(channel_disconnected_error()),
        };

        tracing::debug!("emitting {:?}", command);

        connection
            .outbound
            .try_send(command)
            .map_err(|_| channel_disconnected_error())
    }

    fn events(&self) -> Receiver<ServerEvent> {
        self.events_rx.clone()
    }

    fn disconnect(&mut self) -> Closing {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => return future::ready(()).boxed(),
        };

        connection.alive.store(false, Ordering::SeqCst);
        connection.reader.abort();
        // writer flushes queued commands and closes the socket
        connection.outbound.close();

        let endpoint = self.endpoint.clone();
        async move {
            let _ = connection.writer.await;
            tracing::info!(%endpoint, "channel closed");
        }
        .boxed()
    }

    fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .map(|connection| connection.alive.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_before_connect_is_refused() {
        let channel = WsChannel::new("ws://127.0.0.1:9");

        let err = channel
            .emit(ClientCommand::GetDirections {
                route_id: "r1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, 200);
    }

    #[tokio::test]
    async fn failed_connect_leaves_channel_disconnected() {
        let mut channel = WsChannel::new("ws://127.0.0.1:9");

        assert!(channel.connect().await.is_err());
        assert!(!channel.is_connected());

        // harmless when there is nothing to tear down
        channel.disconnect().await;
    }
}
