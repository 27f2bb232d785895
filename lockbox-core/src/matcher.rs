//! Scores deposit candidates against the AR table and picks the best
//! surviving entity.

use tracing::debug;

use crate::config::SimilarityMode;
use crate::entity::{EntityRecord, EntityTable};
use crate::line::Line;
use crate::similarity;

pub struct EntityMatcher<'a> {
    table: &'a EntityTable,
    mode: SimilarityMode,
    threshold: u8,
}

impl<'a> EntityMatcher<'a> {
    pub fn new(table: &'a EntityTable, mode: SimilarityMode, threshold: u8) -> Self {
        Self {
            table,
            mode,
            threshold,
        }
    }

    /// Best entity for `line`, or `None` when nothing clears the
    /// threshold. A single in-order pass keeps only strictly greater
    /// scores, so ties resolve to the earliest table row.
    pub fn best_match(&self, line: &Line) -> Option<(&'a EntityRecord, u8)> {
        let mut best: Option<(usize, u8)> = None;

        for (idx, norm) in self.table.norms().iter().enumerate() {
            let score = similarity::score(self.mode, norm, &line.norm);
            if score < self.threshold {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }

        best.map(|(idx, score)| {
            let record = &self.table.records()[idx];
            debug!(entity = %record.name, score, line = %line.raw, "matched entity");
            (record, score)
        })
    }
}
