//! Walk statistics and node reclamation accounting
//!
//! Every element start the walker sees counts as one node. Nodes outside a
//! sentence are reclaimed at their end tag; nodes inside a sentence are held
//! by the unit and reclaimed together once the sentence has been extracted.
//! `peak_live_nodes` is therefore bounded by nesting depth plus the size of
//! the largest sentence, independent of how many sentences a file holds.

/// Counters kept by one walker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Sentence records produced
    pub sentences: usize,
    /// Tokens decoded
    pub tokens: usize,
    /// Data lines dropped for having the wrong field count
    pub dropped_records: usize,
    /// Element nodes seen
    pub nodes_opened: usize,
    /// Element nodes released
    pub nodes_reclaimed: usize,
    /// Highest number of simultaneously live nodes
    pub peak_live_nodes: usize,
}

impl WalkStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes seen but not yet released
    pub fn live_nodes(&self) -> usize {
        self.nodes_opened - self.nodes_reclaimed
    }

    pub(crate) fn open_node(&mut self) {
        self.nodes_opened += 1;
        self.peak_live_nodes = self.peak_live_nodes.max(self.live_nodes());
    }

    pub(crate) fn reclaim(&mut self, nodes: usize) {
        debug_assert!(nodes <= self.live_nodes());
        self.nodes_reclaimed += nodes;
    }

    pub(crate) fn record_sentence(&mut self, tokens: usize, dropped: usize) {
        self.sentences += 1;
        self.tokens += tokens;
        self.dropped_records += dropped;
    }

    /// Fold another walker's counters into these
    ///
    /// Counts are summed; the peak is the larger of the two since walkers
    /// never run at the same time.
    pub fn merge(&mut self, other: &WalkStats) {
        self.sentences += other.sentences;
        self.tokens += other.tokens;
        self.dropped_records += other.dropped_records;
        self.nodes_opened += other.nodes_opened;
        self.nodes_reclaimed += other.nodes_reclaimed;
        self.peak_live_nodes = self.peak_live_nodes.max(other.peak_live_nodes);
    }
}

/// Counters kept by the corpus iterator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Files streamed to completion
    pub files_processed: usize,
    /// Files abandoned under the skip policy
    pub files_skipped: usize,
    /// Combined walker counters
    pub walk: WalkStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_and_peak() {
        let mut stats = WalkStats::new();
        stats.open_node();
        stats.open_node();
        stats.open_node();
        assert_eq!(stats.live_nodes(), 3);

        stats.reclaim(2);
        stats.open_node();
        assert_eq!(stats.live_nodes(), 2);
        assert_eq!(stats.peak_live_nodes, 3);
    }

    #[test]
    fn test_record_sentence() {
        let mut stats = WalkStats::new();
        stats.record_sentence(5, 1);
        stats.record_sentence(3, 0);
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.tokens, 8);
        assert_eq!(stats.dropped_records, 1);
    }

    #[test]
    fn test_merge() {
        let mut a = WalkStats {
            sentences: 2,
            tokens: 10,
            dropped_records: 1,
            nodes_opened: 6,
            nodes_reclaimed: 6,
            peak_live_nodes: 4,
        };
        let b = WalkStats {
            sentences: 1,
            tokens: 3,
            dropped_records: 0,
            nodes_opened: 3,
            nodes_reclaimed: 3,
            peak_live_nodes: 7,
        };
        a.merge(&b);

        assert_eq!(a.sentences, 3);
        assert_eq!(a.tokens, 13);
        assert_eq!(a.nodes_opened, 9);
        assert_eq!(a.live_nodes(), 0);
        assert_eq!(a.peak_live_nodes, 7);
    }
}
