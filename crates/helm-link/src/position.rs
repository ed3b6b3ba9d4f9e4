use crate::frame::read_frame;
use anyhow::{Context, Result};
use helm_proto::PositionReply;
use std::time::Duration;
use tokio::net::TcpStream;

/// One-shot query of the vehicle's current position. Diagnostics only, not
/// part of the command path.
pub async fn query_position(endpoint: &str, timeout: Duration) -> Result<PositionReply> {
    let fut = async {
        let mut stream = TcpStream::connect(endpoint)
            .await
            .with_context(|| format!("connect position service {}", endpoint))?;
        let blob = read_frame(&mut stream).await?;
        serde_json::from_slice(&blob).context("parse position reply")
    };
    tokio::time::timeout(timeout, fut)
        .await
        .context("position service timed out")?
}
