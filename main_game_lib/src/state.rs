//! Game state management.

use crate::prelude::*;

/// Provides control for the game states.
///
/// Each screen goes through loading, showing and quitting.
/// The dolls screen is always followed by the end screen, and the end screen
/// by exiting the game.
#[derive(States, Default, Debug, Clone, Copy, Eq, PartialEq, Hash, Reflect)]
pub enum GlobalGameState {
    /// Dummy state so that we can do loading transitions.
    #[default]
    Blank,

    /// Change the game state to this state to run systems that setup the
    /// dolls screen in the background.
    /// Nothing is shown to the player yet.
    LoadingDolls,
    /// Player is tapping dolls.
    AtDolls,
    /// Despawn dolls screen resources.
    QuittingDolls,

    /// Sets up the end screen in the background.
    LoadingEndGame,
    /// Stars are floating around.
    AtEndGame,
    /// Despawn end screen resources.
    QuittingEndGame,

    /// Performs all necessary cleanup and exits the game.
    Exit,
}

impl GlobalGameState {
    /// Given a state that's done cleaning up, where should we go next?
    pub fn next_after_quitting(self) -> Option<Self> {
        match self {
            Self::QuittingDolls => Some(Self::LoadingEndGame),
            Self::QuittingEndGame => Some(Self::Exit),
            state => {
                debug!("There's nowhere to transition from {state:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_moves_from_dolls_to_end_game_to_exit() {
        use GlobalGameState::*;

        assert_eq!(Some(LoadingEndGame), QuittingDolls.next_after_quitting());
        assert_eq!(Some(Exit), QuittingEndGame.next_after_quitting());
    }

    #[test]
    fn it_only_transitions_from_quitting_states() {
        use GlobalGameState::*;

        for state in
            [Blank, LoadingDolls, AtDolls, LoadingEndGame, AtEndGame, Exit]
        {
            assert_eq!(None, state.next_after_quitting(), "{state:?}");
        }
    }
}
