//! Modal and HUD view model
//!
//! Pure functions of the game state; the browser host copies the result into
//! the DOM and routes modal button clicks back through [`apply_action`].

use crate::error::LifecycleError;
use crate::sim::{GameState, RunPhase, SceneSink};

/// Which prompt is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Welcome,
    GameOver { distance: u64 },
}

/// Everything the DOM needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiView {
    pub modal: Option<Modal>,
    pub hud_visible: bool,
    pub distance_text: String,
    pub speed_text: String,
    pub boosting: bool,
}

/// Modal button presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Restart,
    Decline,
}

impl UiAction {
    /// Modal button element ids
    pub fn from_button(id: &str) -> Option<Self> {
        match id {
            "start-btn" => Some(UiAction::Start),
            "restart-btn" => Some(UiAction::Restart),
            "decline-btn" => Some(UiAction::Decline),
            _ => None,
        }
    }
}

pub fn view(state: &GameState) -> UiView {
    let modal = match state.phase {
        RunPhase::Idle => Some(Modal::Welcome),
        RunPhase::Running => None,
        RunPhase::GameOver => Some(Modal::GameOver {
            distance: state.distance_display(),
        }),
    };
    UiView {
        modal,
        hud_visible: state.phase != RunPhase::Idle,
        distance_text: format!("{} m", state.distance_display()),
        speed_text: format!("{:.0} kn", state.speed()),
        boosting: state.boosting(),
    }
}

/// Route a modal button to the run lifecycle. `seed` is used for restarts.
pub fn apply_action<S: SceneSink + ?Sized>(
    state: &mut GameState,
    action: UiAction,
    seed: u64,
    sink: &mut S,
) -> Result<(), LifecycleError> {
    match action {
        UiAction::Start => state.start(sink),
        UiAction::Restart => state.restart(seed, sink),
        UiAction::Decline => state.decline(sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Scene;
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_shows_welcome() {
        let state = GameState::new(1, Tuning::default());
        let view = view(&state);
        assert_eq!(view.modal, Some(Modal::Welcome));
        assert!(!view.hud_visible);
    }

    #[test]
    fn test_game_over_shows_distance() {
        let mut scene = Scene::default();
        let mut state = GameState::new(1, Tuning::default());
        state.start(&mut scene).unwrap();
        state.distance = 123.9;
        state.phase = RunPhase::GameOver;

        let view = view(&state);
        assert_eq!(view.modal, Some(Modal::GameOver { distance: 123 }));
        assert_eq!(view.distance_text, "123 m");
        assert!(view.hud_visible);
    }

    #[test]
    fn test_actions_drive_lifecycle() {
        let mut scene = Scene::default();
        let mut state = GameState::new(1, Tuning::default());

        apply_action(&mut state, UiAction::Start, 0, &mut scene).unwrap();
        assert_eq!(view(&state).modal, None);

        state.phase = RunPhase::GameOver;
        apply_action(&mut state, UiAction::Decline, 0, &mut scene).unwrap();
        assert_eq!(state.phase, RunPhase::Idle);

        assert!(apply_action(&mut state, UiAction::Restart, 5, &mut scene).is_err());
    }

    #[test]
    fn test_button_ids() {
        assert_eq!(UiAction::from_button("restart-btn"), Some(UiAction::Restart));
        assert_eq!(UiAction::from_button("btn-left"), None);
    }
}
