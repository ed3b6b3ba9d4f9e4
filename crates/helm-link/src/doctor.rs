use crate::LinkConfig;
use anyhow::Result;
use std::net::SocketAddr;

pub fn check_link(cfg: &LinkConfig) -> Result<()> {
    anyhow::ensure!(
        cfg.setpoint_addr.parse::<SocketAddr>().is_ok(),
        "link.setpoint_addr is not a socket address: {}",
        cfg.setpoint_addr
    );
    anyhow::ensure!(
        cfg.authority_addr.parse::<SocketAddr>().is_ok(),
        "link.authority_addr is not a socket address: {}",
        cfg.authority_addr
    );
    if let Some(pos) = &cfg.position_addr {
        anyhow::ensure!(
            pos.parse::<SocketAddr>().is_ok(),
            "link.position_addr is not a socket address: {}",
            pos
        );
    }
    anyhow::ensure!(
        cfg.rate_hz >= 1.0 && cfg.rate_hz <= 50.0,
        "link.rate_hz should be 1..50"
    );
    anyhow::ensure!(
        cfg.request_timeout_ms >= 100 && cfg.request_timeout_ms <= 30_000,
        "link.request_timeout_ms should be 100..30000"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LinkConfig {
        LinkConfig {
            setpoint_addr: "127.0.0.1:4560".into(),
            authority_addr: "127.0.0.1:4561".into(),
            position_addr: Some("127.0.0.1:4562".into()),
            rate_hz: 10.0,
            request_timeout_ms: 2000,
        }
    }

    #[test]
    fn accepts_sane_config() {
        assert!(check_link(&base()).is_ok());
    }

    #[test]
    fn rejects_bad_addr_and_rate() {
        let mut cfg = base();
        cfg.setpoint_addr = "not-an-addr".into();
        assert!(check_link(&cfg).is_err());

        let mut cfg = base();
        cfg.rate_hz = 0.0;
        assert!(check_link(&cfg).is_err());

        let mut cfg = base();
        cfg.request_timeout_ms = 5;
        assert!(check_link(&cfg).is_err());
    }
}
