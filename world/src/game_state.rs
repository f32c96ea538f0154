use std::fmt;

/// Top-level screens of the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Loading,
    Menu,
    PlotBuilder,
    WorldExplorer,
    Gallery,
    Admin,
    Clan,
    Map,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameAction {
    Loaded,
    StartPlot,
    StartWorld,
    OpenGallery,
    OpenAdmin,
    OpenClan,
    OpenMap,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: GameState,
    pub action: GameAction,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not allowed in state {:?}", self.action, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

impl GameState {
    pub fn transition(self, action: GameAction) -> Result<GameState, InvalidTransition> {
        use GameAction::*;
        use GameState::*;
        let next = match (self, action) {
            (Loading, Loaded) => Menu,
            (Menu, StartPlot) => PlotBuilder,
            (Menu, StartWorld) => WorldExplorer,
            (Menu, OpenGallery) => Gallery,
            (Menu, OpenAdmin) => Admin,
            (Menu, OpenClan) => Clan,
            (Menu, OpenMap) => Map,
            (PlotBuilder | WorldExplorer | Gallery | Admin | Clan | Map, Back) => Menu,
            (from, action) => return Err(InvalidTransition { from, action }),
        };
        Ok(next)
    }

    /// States that render the 3D scene and accept pick events.
    pub fn is_scene(&self) -> bool {
        matches!(self, GameState::PlotBuilder | GameState::WorldExplorer)
    }
}

/// Holds the current state and applies actions to it.
#[derive(Clone, Debug, Default)]
pub struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Applies `action`. On error the state is left untouched.
    pub fn dispatch(&mut self, action: GameAction) -> Result<GameState, InvalidTransition> {
        let next = self.state.transition(action)?;
        log::debug!("Game state {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }
}
