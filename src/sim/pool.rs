//! Segment pool and recycling
//!
//! The ground strip is a fixed set of segments created once per run.
//! Segments that scroll off the left edge are moved to the right end of
//! the strip instead of being reallocated.

use serde::{Deserialize, Serialize};

use super::entity::Segment;
use super::spawn::{SpawnDecision, SpawnPolicy, UniformSource};
use crate::tuning::Tuning;

/// Result of recycling one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recycled {
    pub segment_id: u32,
    /// New x of the segment (rightmost edge + segment width)
    pub x: f32,
    /// Rightmost x the new position was anchored on
    pub anchor_x: f32,
    pub decision: SpawnDecision,
}

/// Fixed-capacity pool of ground segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPool {
    segments: Vec<Segment>,
}

impl SegmentPool {
    /// Build the initial contiguous strip starting at x = 0.
    /// `first_id` is the id of the first segment; ids are sequential.
    pub fn new(tuning: &Tuning, first_id: u32) -> Self {
        let segments = (0..tuning.segment_count)
            .map(|i| {
                Segment::new(
                    first_id + i as u32,
                    i as f32 * tuning.segment_width,
                    tuning.floor_y,
                    tuning.scroll_speed,
                )
            })
            .collect();
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access for the physics collaborator (positions only; the
    /// pool never grows or shrinks)
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn get(&self, id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Rightmost segment x, gaps included (a gap still anchors the strip).
    /// `None` for an empty pool.
    pub fn rightmost_x(&self) -> Option<f32> {
        self.segments
            .iter()
            .map(|s| s.body.pos.x)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Indices of segments past the recycle threshold
    pub fn offscreen(&self, threshold: f32) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.body.is_past(threshold))
            .map(|(i, _)| i)
            .collect()
    }

    /// Move the segment at `index` to the right end of the strip, asking
    /// the spawn policy whether it becomes a gap.
    ///
    /// Returns `None` (and changes nothing) if the index is out of range
    /// or there is no anchor to place it against.
    pub fn recycle(
        &mut self,
        index: usize,
        policy: &mut SpawnPolicy,
        rng: &mut dyn UniformSource,
        tuning: &Tuning,
    ) -> Option<Recycled> {
        if index >= self.segments.len() {
            log::warn!(
                "recycle index {} out of range (pool of {})",
                index,
                self.segments.len()
            );
            return None;
        }
        let anchor_x = self.rightmost_x()?;
        let x = anchor_x + tuning.segment_width;
        let decision = policy.decide(anchor_x, rng, tuning);

        let segment = &mut self.segments[index];
        match decision {
            SpawnDecision::Gap => segment.make_gap(x),
            SpawnDecision::Solid { .. } => {
                segment.make_solid(x, tuning.floor_y, tuning.scroll_speed)
            }
        }
        log::debug!("segment {} recycled to x={} ({:?})", segment.id, x, decision);

        Some(Recycled {
            segment_id: segment.id,
            x,
            anchor_x,
            decision,
        })
    }

    /// Recycle every off-screen segment once, in pool order.
    /// Each recycle re-anchors on the strip as left by the previous one.
    pub fn recycle_offscreen(
        &mut self,
        policy: &mut SpawnPolicy,
        rng: &mut dyn UniformSource,
        tuning: &Tuning,
    ) -> Vec<Recycled> {
        self.offscreen(tuning.recycle_x)
            .into_iter()
            .filter_map(|i| self.recycle(i, policy, rng, tuning))
            .collect()
    }
}
