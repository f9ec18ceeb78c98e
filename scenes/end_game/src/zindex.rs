//! Zindex is a magical number determines stacking of elements.
//! Stars are the only world entities on this screen, the caption is UI.

pub(crate) const STARS: f32 = 0.0;
