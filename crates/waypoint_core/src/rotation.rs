//! Prev/next navigation over a list of statistics

use crate::stat::StatisticRecord;

/// What a rotation currently has to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState<'a> {
    /// Nothing to show yet
    Empty,
    Showing {
        stat: &'a StatisticRecord,
        /// Zero-based
        index: usize,
        len: usize,
    },
}

/// A list of statistics with a wrapping cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRotation {
    stats: Vec<StatisticRecord>,
    index: usize,
}

impl StatRotation {
    pub fn new(stats: Vec<StatisticRecord>) -> Self {
        Self { stats, index: 0 }
    }

    pub fn state(&self) -> RotationState<'_> {
        match self.stats.get(self.index) {
            Some(stat) => RotationState::Showing {
                stat,
                index: self.index,
                len: self.stats.len(),
            },
            None => RotationState::Empty,
        }
    }

    pub fn current(&self) -> Option<&StatisticRecord> {
        self.stats.get(self.index)
    }

    /// Move forward, wrapping to the start. No-op when empty.
    pub fn advance(&mut self) -> Option<&StatisticRecord> {
        if !self.stats.is_empty() {
            self.index = (self.index + 1) % self.stats.len();
        }
        self.current()
    }

    /// Move back, wrapping to the end. No-op when empty.
    pub fn retreat(&mut self) -> Option<&StatisticRecord> {
        if !self.stats.is_empty() {
            self.index = (self.index + self.stats.len() - 1) % self.stats.len();
        }
        self.current()
    }

    /// Jump to an index, wrapped into range
    pub fn jump_to(&mut self, index: usize) -> Option<&StatisticRecord> {
        if !self.stats.is_empty() {
            self.index = index % self.stats.len();
        }
        self.current()
    }

    /// One-based position and length, for "3 / 10" labels
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.stats.is_empty() {
            None
        } else {
            Some((self.index + 1, self.stats.len()))
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn stats(&self) -> &[StatisticRecord] {
        &self.stats
    }
}
