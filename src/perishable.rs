//! Store for short-lived items (splash circles, confetti) that remove themselves.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone)]
pub struct Perishable<T> {
    pub id: ItemId,
    pub data: T,
    pub added_at: Duration,
    pub expires_at: Duration,
    generation: u64,
}

impl<T> Perishable<T> {
    /// How far through its lifetime the item is at `now`, in `[0, 1]`
    pub fn progress(&self, now: Duration) -> f32 {
        let life = self.expires_at.saturating_sub(self.added_at);
        if life.is_zero() {
            return 1.0;
        }
        let age = now.saturating_sub(self.added_at);
        (age.as_secs_f32() / life.as_secs_f32()).min(1.0)
    }
}

struct Expiry {
    id: ItemId,
    generation: u64,
}

/// Live, insertion-ordered items plus one removal timer per item.
///
/// Removal is keyed by id *and* generation: a timer only removes the exact
/// entry it was scheduled for, so re-adding an id never lets a stale timer
/// take out the newer entry.
pub struct PerishableStore<T> {
    items: Vec<Perishable<T>>,
    timers: TimerQueue<Expiry>,
    timer_by_id: HashMap<ItemId, TimerId>,
    next_id: u64,
    next_generation: u64,
    torn_down: bool,
}

impl<T> Default for PerishableStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PerishableStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            timers: TimerQueue::new(),
            timer_by_id: HashMap::new(),
            next_id: 0,
            next_generation: 0,
            torn_down: false,
        }
    }

    /// Insert `data` under a fresh id; it expires `delay` after `now`.
    /// Refused (returns `None`) once the store has been torn down.
    pub fn add(&mut self, now: Duration, delay: Duration, data: T) -> Option<ItemId> {
        let id = self.fresh_id();
        self.add_with_id(now, delay, id, data)
    }

    /// Insert under a caller-chosen id. A live entry with the same id is
    /// replaced in place and its pending removal is cancelled.
    pub fn add_with_id(
        &mut self,
        now: Duration,
        delay: Duration,
        id: ItemId,
        data: T,
    ) -> Option<ItemId> {
        if self.torn_down {
            debug!(?id, "add after teardown ignored");
            return None;
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        if let Some(old_timer) = self.timer_by_id.remove(&id) {
            self.timers.cancel(old_timer);
        }

        let item = Perishable {
            id,
            data,
            added_at: now,
            expires_at: now + delay,
            generation,
        };
        match self.items.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                debug!(?id, "replacing live item with same id");
                *existing = item;
            }
            None => self.items.push(item),
        }

        let timer = self.timers.schedule(now + delay, Expiry { id, generation });
        self.timer_by_id.insert(id, timer);
        Some(id)
    }

    /// Early disposal. No-op if the item is already gone.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        if let Some(timer) = self.timer_by_id.remove(&id) {
            self.timers.cancel(timer);
        }
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index).data)
    }

    /// Fire every removal due at or before `now`; returns how many items left.
    pub fn advance(&mut self, now: Duration) -> usize {
        if self.torn_down {
            return 0;
        }

        let mut removed = 0;
        while let Some(expiry) = self.timers.pop_due(now) {
            if self.expire(expiry) {
                removed += 1;
            }
        }
        removed
    }

    fn expire(&mut self, expiry: Expiry) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.id == expiry.id && item.generation == expiry.generation)
        else {
            return false;
        };
        self.items.remove(index);
        self.timer_by_id.remove(&expiry.id);
        true
    }

    /// Cancel every pending removal. Nothing fires afterwards and further
    /// adds are refused; the last live list stays readable.
    pub fn teardown(&mut self) -> usize {
        self.torn_down = true;
        self.timer_by_id.clear();
        self.timers.clear()
    }

    pub fn items(&self) -> &[Perishable<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn fresh_id(&mut self) -> ItemId {
        loop {
            let id = ItemId(self.next_id);
            self.next_id += 1;
            if !self.timer_by_id.contains_key(&id) {
                return id;
            }
        }
    }
}
