use crate::frame::{read_frame, write_frame};
use anyhow::{Context, Result};
use helm_ctrl::{AuthorityError, AuthorityService};
use helm_proto::{AuthorityReply, AuthorityRequest};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// TCP client for the vehicle-side authority service. One connection per
/// request; every exchange is capped by the configured timeout so a dead
/// service can only stall the console for that long.
pub struct AuthorityClient {
    endpoint: String,
    timeout: Duration,
}

impl AuthorityClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    async fn exchange(&self, grant: bool) -> Result<bool> {
        let mut stream = TcpStream::connect(&self.endpoint)
            .await
            .with_context(|| format!("connect authority service {}", self.endpoint))?;

        let blob = serde_json::to_vec(&AuthorityRequest { grant })?;
        write_frame(&mut stream, &blob).await?;

        let reply = read_frame(&mut stream).await?;
        let reply: AuthorityReply =
            serde_json::from_slice(&reply).context("parse authority reply")?;
        debug!("authority service answered ok={}", reply.ok);
        Ok(reply.ok)
    }
}

impl AuthorityService for AuthorityClient {
    async fn request(&mut self, grant: bool) -> Result<bool, AuthorityError> {
        match tokio::time::timeout(self.timeout, self.exchange(grant)).await {
            Ok(Ok(acked)) => Ok(acked),
            Ok(Err(e)) => Err(AuthorityError::Transport(e)),
            Err(_) => Err(AuthorityError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn serve_one(listener: TcpListener, ok: bool) {
        let (mut sock, _) = listener.accept().await.unwrap();
        let req = read_frame(&mut sock).await.unwrap();
        let req: AuthorityRequest = serde_json::from_slice(&req).unwrap();
        assert!(req.grant);
        let blob = serde_json::to_vec(&AuthorityReply { ok }).unwrap();
        write_frame(&mut sock, &blob).await.unwrap();
    }

    #[tokio::test]
    async fn ack_and_refusal_pass_through() {
        for ok in [true, false] {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(serve_one(listener, ok));

            let mut client =
                AuthorityClient::new(addr.to_string(), Duration::from_secs(1));
            assert_eq!(client.request(true).await.unwrap(), ok);
        }
    }

    #[tokio::test]
    async fn silent_service_times_out() {
        // Listener that accepts and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _sock = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let mut client = AuthorityClient::new(addr.to_string(), Duration::from_millis(50));
        let err = client.request(true).await.unwrap_err();
        assert!(matches!(err, AuthorityError::Timeout));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port from a listener we immediately drop.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut client = AuthorityClient::new(addr.to_string(), Duration::from_secs(1));
        let err = client.request(true).await.unwrap_err();
        assert!(matches!(err, AuthorityError::Transport(_)));
    }
}
