//! The reveal is a linear state machine.
//!
//! Exactly one stage is visible at a time.
//! Tapping the visible stage counts up, and once the count reaches the
//! stage's threshold the stage is revealed and the next one becomes visible.
//! Revealing is one way and follows the stage order.
//! The final stage stays visible after it's revealed, and every tap on it is
//! acknowledged.

use crate::{
    prelude::*,
    stages::{Stage, LAST_STAGE, STAGE_COUNT},
};

#[derive(Resource, Debug, Clone)]
pub(crate) struct RevealSequence {
    stages: [Stage; STAGE_COUNT],
    taps: [u32; STAGE_COUNT],
    /// Set once per stage and never unset.
    /// Always a prefix of the stages.
    revealed: [bool; STAGE_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TapOutcome {
    /// The stage is not visible.
    Ignored,
    /// Below the threshold.
    Counted { taps: u32, of: u8 },
    /// Reached the threshold just now.
    Advanced { stage: usize },
    /// The final stage acknowledges every tap.
    Replayed,
}

impl RevealSequence {
    pub(crate) fn new(stages: [Stage; STAGE_COUNT]) -> Self {
        Self {
            stages,
            taps: [0; STAGE_COUNT],
            revealed: [false; STAGE_COUNT],
        }
    }

    pub(crate) fn tap(&mut self, stage: usize) -> TapOutcome {
        if stage != self.visible_stage() {
            return TapOutcome::Ignored;
        }

        self.taps[stage] = self.taps[stage].saturating_add(1);
        let threshold = self.stages[stage].taps_to_advance;

        if !self.revealed[stage] && self.taps[stage] >= u32::from(threshold) {
            self.revealed[stage] = true;
            return TapOutcome::Advanced { stage };
        }

        if stage == LAST_STAGE {
            TapOutcome::Replayed
        } else {
            TapOutcome::Counted {
                taps: self.taps[stage],
                of: threshold,
            }
        }
    }

    /// The first stage that's not revealed yet.
    /// Once everything is revealed, the final stage.
    pub(crate) fn visible_stage(&self) -> usize {
        self.revealed
            .iter()
            .position(|revealed| !revealed)
            .unwrap_or(LAST_STAGE)
    }

    pub(crate) fn visible(&self) -> &Stage {
        &self.stages[self.visible_stage()]
    }

    /// How many stages reached their threshold.
    /// Zero initially, [`STAGE_COUNT`] when complete.
    pub(crate) fn completed(&self) -> usize {
        self.revealed.iter().take_while(|revealed| **revealed).count()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.revealed[LAST_STAGE]
    }

    #[cfg(test)]
    pub(crate) fn taps(&self, stage: usize) -> u32 {
        self.taps[stage]
    }

    #[cfg(test)]
    pub(crate) fn is_revealed(&self, stage: usize) -> bool {
        self.revealed[stage]
    }
}

impl TapOutcome {
    /// Sound and haptics acknowledge the tap.
    pub(crate) fn fires_feedback(self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Replayed)
    }
}
