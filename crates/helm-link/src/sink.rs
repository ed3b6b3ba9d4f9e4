use anyhow::{Context, Result};
use helm_proto::{SetpointCommand, SetpointMessage};
use std::future::Future;
use tokio::net::UdpSocket;

/// Where encoded commands go. The publisher loop owns one of these; tests
/// substitute a recorder.
pub trait CommandSink: Send + 'static {
    fn publish(&mut self, cmd: &SetpointCommand) -> impl Future<Output = Result<()>> + Send;
}

/// Publishes each command as one JSON datagram on the setpoint channel.
pub struct UdpCommandSink {
    socket: UdpSocket,
}

impl UdpCommandSink {
    pub async fn connect(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await.context("bind setpoint socket")?;
        socket
            .connect(addr)
            .await
            .with_context(|| format!("connect setpoint channel {}", addr))?;
        Ok(Self { socket })
    }
}

impl CommandSink for UdpCommandSink {
    async fn publish(&mut self, cmd: &SetpointCommand) -> Result<()> {
        let ts_unix_ms =
            time::OffsetDateTime::now_utc().unix_timestamp_nanos() as i64 / 1_000_000;
        let blob = serde_json::to_vec(&SetpointMessage::new(ts_unix_ms, cmd))?;
        self.socket.send(&blob).await.context("send setpoint datagram")?;
        Ok(())
    }
}
