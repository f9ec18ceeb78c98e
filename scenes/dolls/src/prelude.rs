pub(crate) use common_assets::dolls as assets;
pub(crate) use main_game_lib::prelude::*;

pub(crate) use crate::zindex;
