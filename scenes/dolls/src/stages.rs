//! The seven stages of the reveal, in order.
//!
//! Every stage shows an angry face above a doll.
//! Two neighbouring stages share the angry face, except for the last one.

use crate::prelude::*;

pub(crate) const STAGE_COUNT: usize = 7;

/// Index of the final stage.
/// Tapping it never reveals anything new.
pub(crate) const LAST_STAGE: usize = STAGE_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stage {
    pub(crate) doll: &'static str,
    /// Shown above the doll.
    pub(crate) angry: &'static str,
    pub(crate) taps_to_advance: u8,
}

const IMAGES: [(&str, &str); STAGE_COUNT] = [
    (assets::DOLL1, assets::ANGRY1),
    (assets::DOLL2, assets::ANGRY1),
    (assets::DOLL3, assets::ANGRY2),
    (assets::DOLL4, assets::ANGRY2),
    (assets::DOLL5, assets::ANGRY3),
    (assets::DOLL6, assets::ANGRY3),
    (assets::DOLL7, assets::ANGRY4),
];

/// At least one tap is always needed to advance.
pub(crate) fn stages(taps_to_advance: u8) -> [Stage; STAGE_COUNT] {
    IMAGES.map(|(doll, angry)| Stage {
        doll,
        angry,
        taps_to_advance: taps_to_advance.max(1),
    })
}

/// Every image any stage shows.
pub(crate) const ALL_IMAGES: &[&str] = &[
    assets::DOLL1,
    assets::DOLL2,
    assets::DOLL3,
    assets::DOLL4,
    assets::DOLL5,
    assets::DOLL6,
    assets::DOLL7,
    assets::ANGRY1,
    assets::ANGRY2,
    assets::ANGRY3,
    assets::ANGRY4,
];
