use std::collections::VecDeque;

use dash_proto::notify::{Notification, NotificationKind};
use rand::seq::SliceRandom;
use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

const TITLES: [&str; 4] = ["System update", "Mission status", "Sensor data", "Battery warning"];
const MESSAGES: [&str; 4] = ["Data updated", "Mission completed", "Sensor link nominal", "Battery charge sufficient"];
const KINDS: [NotificationKind; 4] = [
    NotificationKind::Info,
    NotificationKind::Success,
    NotificationKind::Warning,
    NotificationKind::Error,
];

/// Entries shown before the panel is expanded.
pub const PREVIEW_LEN: usize = 5;

/// Newest-first notification list.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    next_seq: u64,
}

impl NotificationFeed {
    pub fn new(seed: Vec<Notification>) -> Self {
        Self { items: seed.into(), next_seq: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn preview(&self, show_all: bool) -> impl Iterator<Item = &Notification> {
        let take = if show_all { self.items.len() } else { PREVIEW_LEN };
        self.items.iter().take(take)
    }

    pub fn hidden_count(&self) -> usize {
        self.items.len().saturating_sub(PREVIEW_LEN)
    }

    /// Builds one random notification and puts it at the front.
    pub fn synthesize<R: Rng + ?Sized>(&mut self, rng: &mut R, now: OffsetDateTime) -> &Notification {
        let ms = now.unix_timestamp_nanos() / 1_000_000;
        let n = Notification {
            id: format!("notif-{}-{}", ms, self.next_seq),
            title: pick(&TITLES, rng).to_string(),
            message: pick(&MESSAGES, rng).to_string(),
            kind: *pick(&KINDS, rng),
            timestamp: now,
            is_read: false,
        };
        self.next_seq += 1;
        info!("feed: new {:?} notification {} ({})", n.kind, n.id, n.title);
        self.items.push_front(n);
        &self.items[0]
    }

    /// Returns whether `id` exists. Already-read entries stay read.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Returns how many entries flipped from unread to read.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.items.iter_mut().filter(|n| !n.is_read) {
            n.is_read = true;
            changed += 1;
        }
        changed
    }

    pub fn delete(&mut self, id: &str) -> Option<Notification> {
        let idx = self.items.iter().position(|n| n.id == id)?;
        self.items.remove(idx)
    }
}

fn pick<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> &'a T {
    // pools are non-empty constants
    pool.choose(rng).unwrap_or(&pool[0])
}
