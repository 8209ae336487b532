use futures::{
    channel::mpsc::{Receiver, Sender},
    SinkExt, StreamExt,
};
use gloo_console::{error, log};
use gloo_net::websocket::{self, futures::WebSocket};
use linkfeed::{
    live_update, ClientMessage, LiveUpdate, ServerMessage, Subscription, Token, PROTOCOL,
};
use wasm_bindgen_futures::spawn_local;

/// one websocket carrying a set of subscriptions, dropping the service stops
/// them and closes the socket
pub struct SubscriptionService {
    sender: Sender<ClientMessage>,
    subscriptions: Vec<Subscription>,
}

impl SubscriptionService {
    pub fn open(
        url: &str,
        token: Option<&Token>,
        subscriptions: Vec<Subscription>,
    ) -> Result<(Self, Receiver<LiveUpdate>), String> {
        let ws = WebSocket::open_with_protocol(url, PROTOCOL).map_err(|e| e.to_string())?;

        let (mut write, mut read) = ws.split();
        let (mut ws_sender, mut ws_receiver) = futures::channel::mpsc::channel::<ClientMessage>(32);
        let (mut update_sender, update_receiver) =
            futures::channel::mpsc::channel::<LiveUpdate>(32);

        // queued before the socket opens, they go out in order once it does
        let handshake = std::iter::once(ClientMessage::init(token))
            .chain(subscriptions.iter().copied().map(ClientMessage::start));
        for message in handshake {
            ws_sender.try_send(message).map_err(|e| e.to_string())?;
        }

        // forward protocol messages over the websocket to the server
        spawn_local(async move {
            while let Some(message) = ws_receiver.next().await {
                match message.to_text() {
                    Ok(text) => {
                        if write.send(websocket::Message::Text(text)).await.is_err() {
                            error!("Error sending subscription message");
                        }
                    }
                    Err(e) => error!(format!("Error encoding subscription message {e}")),
                }
            }

            let _ = write.close().await;
        });

        // retrieve and decode live updates from the incoming websocket
        spawn_local(async move {
            while let Some(frame) = read.next().await {
                let Ok(websocket::Message::Text(text)) = frame else {
                    continue;
                };

                match ServerMessage::parse(&text).and_then(live_update) {
                    Ok(Some(update)) => {
                        if update_sender.send(update).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => error!(format!("Live update error {e}")),
                }
            }

            log!("Live update channel closed");
        });

        Ok((
            Self {
                sender: ws_sender,
                subscriptions,
            },
            update_receiver,
        ))
    }
}

impl Drop for SubscriptionService {
    fn drop(&mut self) {
        for subscription in &self.subscriptions {
            let _ = self.sender.try_send(ClientMessage::stop(*subscription));
        }
        let _ = self.sender.try_send(ClientMessage::ConnectionTerminate);
        self.sender.close_channel();
    }
}
