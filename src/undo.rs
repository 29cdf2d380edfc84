//! Time-bounded reversible-delete buffers and the transient highlight
//! pointer used by search navigation.
//!
//! Each buffer is a small state machine: `empty -> pending(item,
//! expiry) -> empty`, leaving again either through an undo within the
//! window or through expiry, at which point the delete becomes
//! permanent. Expiry is driven by the caller passing the current
//! instant, so nothing here spawns timers and tests need no sleeping.

use std::time::{Duration, Instant};

/// How long a deletion stays reversible.
pub const UNDO_WINDOW: Duration = Duration::from_secs(5);

/// How long a search-navigation highlight stays lit.
pub const HIGHLIGHT_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
struct Pending<T> {
    item: T,
    expires_at: Instant,
}

/// Buffers at most one pending deletion of one kind at a time.
#[derive(Debug, Clone)]
pub struct DeleteBuffer<T> {
    slot: Option<Pending<T>>,
    window: Duration,
}

impl<T> Default for DeleteBuffer<T> {
    fn default() -> Self {
        Self::new(UNDO_WINDOW)
    }
}

impl<T> DeleteBuffer<T> {
    pub fn new(window: Duration) -> Self {
        Self { slot: None, window }
    }

    /// Parks a freshly deleted item.
    ///
    /// Returns the previously pending item, if any: scheduling a second
    /// deletion forfeits the first one's undo window, and the caller
    /// must finalize it.
    pub fn schedule(&mut self, item: T, now: Instant) -> Option<T> {
        let forfeited = self.slot.take().map(|p| p.item);
        self.slot = Some(Pending {
            item,
            expires_at: now + self.window,
        });
        forfeited
    }

    /// Takes the pending item back for reinsertion, if the window is
    /// still open. An already-expired item stays parked for
    /// [`take_expired`](Self::take_expired) to finalize.
    pub fn undo(&mut self, now: Instant) -> Option<T> {
        match &self.slot {
            Some(p) if now < p.expires_at => self.slot.take().map(|p| p.item),
            _ => None,
        }
    }

    /// Takes the pending item once its window has lapsed, so the caller
    /// can make the deletion permanent.
    pub fn take_expired(&mut self, now: Instant) -> Option<T> {
        match &self.slot {
            Some(p) if now >= p.expires_at => self.slot.take().map(|p| p.item),
            _ => None,
        }
    }

    /// Unconditionally gives up the pending item (cross-kind forfeit).
    pub fn forfeit(&mut self) -> Option<T> {
        self.slot.take().map(|p| p.item)
    }

    /// Whether an undoable deletion is currently parked and live.
    pub fn is_pending(&self, now: Instant) -> bool {
        matches!(&self.slot, Some(p) if now < p.expires_at)
    }

    /// The pending item, for snackbar display.
    pub fn peek(&self, now: Instant) -> Option<&T> {
        match &self.slot {
            Some(p) if now < p.expires_at => Some(&p.item),
            _ => None,
        }
    }
}

/// At most one highlighted value at a time, auto-clearing after a fixed
/// delay or on page change. Purely cosmetic.
#[derive(Debug, Clone)]
pub struct Highlight<T> {
    slot: Option<(T, Instant)>,
    window: Duration,
}

impl<T> Default for Highlight<T> {
    fn default() -> Self {
        Self::new(HIGHLIGHT_WINDOW)
    }
}

impl<T> Highlight<T> {
    pub fn new(window: Duration) -> Self {
        Self { slot: None, window }
    }

    pub fn set(&mut self, value: T, now: Instant) {
        self.slot = Some((value, now + self.window));
    }

    pub fn current(&self, now: Instant) -> Option<&T> {
        match &self.slot {
            Some((value, expires_at)) if now < *expires_at => Some(value),
            _ => None,
        }
    }

    /// Clears immediately, e.g. on page change.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}
