use thiserror::Error;
use tracing::info;

/// Whether the console currently holds control authority over the vehicle.
///
/// Authority is a handshake with an external actor, not a local toggle: the
/// state only ever reflects a confirmed vehicle-side acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    NotAuthorized,
    Authorized,
}

#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The vehicle answered but declined the request.
    #[error("authority request refused by vehicle")]
    Refused,
    #[error("authority service timed out")]
    Timeout,
    #[error("authority transport: {0}")]
    Transport(#[from] anyhow::Error),
}

/// The vehicle-side authority service. Implemented over TCP in helm-link and
/// by mocks in tests. `Ok(true)` means the vehicle acknowledged the request.
pub trait AuthorityService {
    fn request(
        &mut self,
        grant: bool,
    ) -> impl std::future::Future<Output = Result<bool, AuthorityError>> + Send;
}

/// Tracks confirmed authority. Starts unauthorized.
#[derive(Debug)]
pub struct AuthorityGate {
    state: Authority,
}

impl Default for AuthorityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorityGate {
    pub fn new() -> Self {
        Self { state: Authority::NotAuthorized }
    }

    pub fn state(&self) -> Authority {
        self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == Authority::Authorized
    }

    /// Ask the vehicle to grant or revoke authority.
    ///
    /// State flips only on a confirmed acknowledgment. On refusal or any
    /// transport failure the prior state is kept and the error is returned
    /// for the operator to see; there is no automatic retry.
    pub async fn request<S: AuthorityService>(
        &mut self,
        svc: &mut S,
        grant: bool,
    ) -> Result<Authority, AuthorityError> {
        match svc.request(grant).await {
            Ok(true) => {
                self.state = if grant { Authority::Authorized } else { Authority::NotAuthorized };
                info!("control authority {}", if grant { "granted" } else { "released" });
                Ok(self.state())
            }
            Ok(false) => Err(AuthorityError::Refused),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeService {
        outcome: Result<bool, ()>,
        timeout: bool,
        calls: u32,
    }

    impl FakeService {
        fn acking() -> Self {
            Self { outcome: Ok(true), timeout: false, calls: 0 }
        }
        fn refusing() -> Self {
            Self { outcome: Ok(false), timeout: false, calls: 0 }
        }
        fn dead() -> Self {
            Self { outcome: Err(()), timeout: true, calls: 0 }
        }
    }

    impl AuthorityService for FakeService {
        async fn request(&mut self, _grant: bool) -> Result<bool, AuthorityError> {
            self.calls += 1;
            match self.outcome {
                Ok(ack) => Ok(ack),
                Err(()) if self.timeout => Err(AuthorityError::Timeout),
                Err(()) => Err(AuthorityError::Transport(anyhow::anyhow!("boom"))),
            }
        }
    }

    #[tokio::test]
    async fn grant_then_revoke_on_acks() {
        let mut gate = AuthorityGate::new();
        assert_eq!(gate.state(), Authority::NotAuthorized);

        let mut svc = FakeService::acking();
        assert_eq!(gate.request(&mut svc, true).await.unwrap(), Authority::Authorized);
        assert!(gate.is_authorized());
        assert_eq!(gate.request(&mut svc, false).await.unwrap(), Authority::NotAuthorized);
        assert!(!gate.is_authorized());
    }

    #[tokio::test]
    async fn refusal_keeps_prior_state() {
        let mut gate = AuthorityGate::new();
        let mut svc = FakeService::refusing();
        let err = gate.request(&mut svc, true).await.unwrap_err();
        assert!(matches!(err, AuthorityError::Refused));
        assert_eq!(gate.state(), Authority::NotAuthorized);
    }

    #[tokio::test]
    async fn transport_failure_keeps_prior_state_both_ways() {
        let mut gate = AuthorityGate::new();
        let mut ok = FakeService::acking();
        gate.request(&mut ok, true).await.unwrap();

        // A failed revoke must leave us authorized, not optimistically flip.
        let mut dead = FakeService::dead();
        let err = gate.request(&mut dead, false).await.unwrap_err();
        assert!(matches!(err, AuthorityError::Timeout));
        assert_eq!(gate.state(), Authority::Authorized);
        // One wire call per operator action, never an automatic retry.
        assert_eq!(dead.calls, 1);
    }
}
