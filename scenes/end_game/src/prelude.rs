pub(crate) use main_game_lib::prelude::*;

pub(crate) use crate::zindex;
