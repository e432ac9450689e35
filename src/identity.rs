//! Identity provider: who is signed in.
//!
//! The CLI has no login flow of its own; the identity comes from `--user`
//! or from the `user` key of the configuration file.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Identity;

/// A sign-in or sign-out that changed the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityChange {
    pub previous: Option<Identity>,
    pub current: Option<Identity>,
}

#[derive(Debug, Default)]
pub struct IdentityProvider {
    current: Option<Identity>,
}

impl IdentityProvider {
    pub fn new(current: Option<Identity>) -> Self {
        Self { current }
    }

    /// `--user` is merged into `cfg.user` before this is called.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Identity::new(&cfg.user))
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn require(&self) -> AppResult<&Identity> {
        self.current.as_ref().ok_or_else(|| {
            AppError::Validation(
                "no user signed in: pass --user or set `user` in the configuration".into(),
            )
        })
    }

    /// Returns the transition, or `None` when the identity did not change.
    pub fn sign_in(&mut self, raw: &str) -> Option<IdentityChange> {
        self.transition(Identity::new(raw))
    }

    pub fn sign_out(&mut self) -> Option<IdentityChange> {
        self.transition(None)
    }

    fn transition(&mut self, next: Option<Identity>) -> Option<IdentityChange> {
        if next == self.current {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, next);
        Some(IdentityChange {
            previous,
            current: self.current.clone(),
        })
    }
}
