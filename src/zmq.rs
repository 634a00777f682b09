//! Background ZeroMQ publisher for outbound notifications.
//!
//! The emailer runs as a separate process subscribed to the address below;
//! the web server only serializes messages and hands them to a dedicated
//! sender thread, so a slow broker never blocks a request handler.

use std::sync::mpsc;
use std::thread;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZmqError {
    #[error("ZMQ socket error: {0}")]
    Socket(#[from] zmq::Error),

    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sender thread is gone")]
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct ZmqSenderOptions {
    pub address: String,
    pub kind: zmq::SocketType,
}

impl ZmqSenderOptions {
    /// PUB socket bound at `address`, the default for fan-out notifications.
    pub fn pub_default(address: &str) -> Self {
        Self {
            address: address.to_string(),
            kind: zmq::PUB,
        }
    }
}

pub struct ZmqSender {
    tx: mpsc::Sender<Vec<u8>>,
}

impl ZmqSender {
    /// Binds the socket and spawns the sender thread. The thread exits when
    /// the last `ZmqSender` clone is dropped.
    pub fn start(options: ZmqSenderOptions) -> Result<Self, ZmqError> {
        let context = zmq::Context::new();
        let socket = context.socket(options.kind)?;
        socket.bind(&options.address)?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        thread::spawn(move || {
            while let Ok(payload) = rx.recv() {
                if let Err(e) = socket.send(&payload, 0) {
                    log::error!("Failed to publish ZMQ message: {e}");
                }
            }
        });

        Ok(Self { tx })
    }

    pub fn send<T: Serialize>(&self, message: &T) -> Result<(), ZmqError> {
        let payload = serde_json::to_vec(message)?;
        self.tx.send(payload).map_err(|_| ZmqError::ChannelClosed)
    }
}
