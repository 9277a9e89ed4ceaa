//! Transient interaction state: "copied" confirmations and the theme.
//!
//! Each `(siret, field)` pair owns at most one pending [`TimerHandle`]. A flag
//! is set exactly while a handle is pending for its key. Re-copying the same
//! key replaces the handle, so an expiry carrying the old handle is ignored
//! and the flag never flickers off between two copies.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::installers::Installer;
use crate::InteractionError;

/// How long a "copied" confirmation stays visible after a successful copy.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Installer fields that can be copied to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyField {
    Phone,
    Email,
    Address,
}

impl CopyField {
    #[must_use]
    pub fn value_of(self, installer: &Installer) -> &str {
        match self {
            CopyField::Phone => &installer.phone,
            CopyField::Email => &installer.email,
            CopyField::Address => &installer.adresse,
        }
    }
}

impl std::fmt::Display for CopyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyField::Phone => write!(f, "phone"),
            CopyField::Email => write!(f, "email"),
            CopyField::Address => write!(f, "address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown copy field '{0}'; expected phone, email or address")]
pub struct ParseCopyFieldError(String);

impl std::str::FromStr for CopyField {
    type Err = ParseCopyFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phone" | "tel" | "telephone" | "téléphone" => Ok(CopyField::Phone),
            "email" | "mail" => Ok(CopyField::Email),
            "address" | "adresse" => Ok(CopyField::Address),
            _ => Err(ParseCopyFieldError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CopyKey {
    pub siret: String,
    pub field: CopyField,
}

impl CopyKey {
    #[must_use]
    pub fn new(siret: impl Into<String>, field: CopyField) -> Self {
        Self {
            siret: siret.into(),
            field,
        }
    }
}

/// Explicit, cancellable reset timer attached to one copy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
}

impl TimerHandle {
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Result of a successful copy: the new timer, plus the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyScheduled {
    pub handle: TimerHandle,
    pub superseded: Option<TimerHandle>,
}

/// System clipboard capability.
pub trait ClipboardWriter {
    /// Write `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::Clipboard`] when the clipboard is
    /// unavailable or rejects the write.
    fn write(&mut self, text: &str) -> Result<(), InteractionError>;
}

/// Capability that hands a URL to the OS (browser, maps app).
pub trait ExternalOpener {
    /// Open `url` outside the application.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::Open`] when the OS refuses the URL.
    fn open_external(&mut self, url: &str) -> Result<(), InteractionError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Per-`(siret, field)` copy flags with their reset timers.
pub struct CopyTracker {
    window: Duration,
    clock: Arc<dyn Clock>,
    next_id: u64,
    pending: HashMap<CopyKey, TimerHandle>,
}

impl std::fmt::Debug for CopyTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyTracker")
            .field("window", &self.window)
            .field("next_id", &self.next_id)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(COPY_FEEDBACK, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            window,
            clock,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Write `value` to the clipboard and, on success, raise the flag for `key`.
    ///
    /// The reset window starts when the write returns, not when it was asked
    /// for. A pending timer for the same key is superseded.
    ///
    /// # Errors
    ///
    /// Propagates the clipboard error. The flag is left untouched and the
    /// failure is logged; callers treat it as a recoverable notice.
    pub fn request_copy<C>(
        &mut self,
        clipboard: &mut C,
        key: CopyKey,
        value: &str,
    ) -> Result<CopyScheduled, InteractionError>
    where
        C: ClipboardWriter + ?Sized,
    {
        if let Err(err) = clipboard.write(value) {
            tracing::warn!(
                siret = %key.siret,
                field = %key.field,
                error = %err,
                "copy to clipboard failed"
            );
            return Err(err);
        }

        let now = self.clock.now();
        Ok(self.mark_copied(key, now))
    }

    fn mark_copied(&mut self, key: CopyKey, now: Instant) -> CopyScheduled {
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now + self.window,
        };
        self.next_id += 1;

        tracing::debug!(siret = %key.siret, field = %key.field, "copy flag raised");
        let superseded = self.pending.insert(key, handle);
        CopyScheduled { handle, superseded }
    }

    #[must_use]
    pub fn is_copied(&self, siret: &str, field: CopyField) -> bool {
        self.pending.contains_key(&CopyKey::new(siret, field))
    }

    #[must_use]
    pub fn pending(&self, key: &CopyKey) -> Option<TimerHandle> {
        self.pending.get(key).copied()
    }

    /// Reset `key` if `handle` is still its current timer.
    ///
    /// Returns `false` for a stale handle: a newer copy owns the flag.
    pub fn expire(&mut self, key: &CopyKey, handle: TimerHandle) -> bool {
        if self.pending.get(key) == Some(&handle) {
            self.pending.remove(key);
            tracing::debug!(siret = %key.siret, field = %key.field, "copy flag expired");
            true
        } else {
            false
        }
    }

    /// Reset every flag whose deadline has passed according to the clock.
    pub fn expire_due(&mut self) -> Vec<CopyKey> {
        let now = self.clock.now();
        self.expire_due_at(now)
    }

    /// Reset every flag whose deadline is at or before `now`.
    pub fn expire_due_at(&mut self, now: Instant) -> Vec<CopyKey> {
        let mut expired = Vec::new();
        self.pending.retain(|key, handle| {
            if handle.deadline <= now {
                expired.push(key.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Drop the flag for `key` and hand back its timer so it can be aborted.
    pub fn cancel(&mut self, key: &CopyKey) -> Option<TimerHandle> {
        self.pending.remove(key)
    }

    /// Cancel the flags of every installer for which `keep` returns `false`.
    pub fn retain_records<F>(&mut self, keep: F) -> Vec<(CopyKey, TimerHandle)>
    where
        F: Fn(&str) -> bool,
    {
        let mut cancelled = Vec::new();
        self.pending.retain(|key, handle| {
            if keep(&key.siret) {
                true
            } else {
                cancelled.push((key.clone(), *handle));
                false
            }
        });
        cancelled
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pending.len()
    }
}

/// Presentation palette selector. Never affects filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[cfg(test)]
#[path = "interaction_test.rs"]
mod tests;
