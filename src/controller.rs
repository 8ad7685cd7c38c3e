use tracing::{debug, error, info};
use crate::core::{active_boxes, is_solved, resolve, EntityState, GameUpdate, UserAction, Vec2};
use crate::history::{HistoryMissingError, TraceHistory};
use crate::stage::{InvalidStageError, Stage, StageDescriptor};

/// Where the controller's last action ended up before returning to idle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Resolving,
    Committed,
    Rejected,
    Navigating,
}

/// Read-only view of the engine for renderers and the HUD.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EngineSnapshot {
    pub human: Vec2,
    pub boxes: Vec<Vec2>,
    pub active_box_indices: Vec<usize>,
    /// History cursor.
    pub move_count: usize,
    /// Successful walks and pushes; undo and redo leave it alone.
    pub moves_made: usize,
    pub solved: bool,
}

/// Everything belonging to one loaded stage. Replaced wholesale on reload.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    stage: Stage,
    state: EntityState,
    history: TraceHistory,
    move_num: usize,
    moves_made: usize,
    last_transition: ControllerState,
}

impl EngineHandle {
    pub fn load(descriptor: &StageDescriptor) -> Result<EngineHandle, InvalidStageError> {
        Ok(Self::from_stage(Stage::load(descriptor)?))
    }

    pub fn from_stage(stage: Stage) -> EngineHandle {
        let state = stage.initial_state().clone();
        EngineHandle {
            history: TraceHistory::new(state.clone()),
            stage,
            state,
            move_num: 0,
            moves_made: 0,
            last_transition: ControllerState::Idle,
        }
    }

    /// Swaps in a new stage. On error the current stage keeps running untouched.
    pub fn reload(&mut self, descriptor: &StageDescriptor) -> Result<(), InvalidStageError> {
        let next = Self::load(descriptor)?;
        *self = next;
        info!("stage reloaded");
        Ok(())
    }

    /// Back to the initial layout of the current stage with a fresh history.
    pub fn restart(&mut self) {
        *self = Self::from_stage(self.stage.clone());
        info!("stage restarted");
    }

    pub fn apply_direction(&mut self, action: UserAction) -> Result<GameUpdate, HistoryMissingError> {
        let update = match action {
            UserAction::Move(direction) => {
                self.last_transition = ControllerState::Resolving;
                let outcome = resolve(direction, &self.state, &self.stage);
                if outcome.is_blocked() {
                    debug!(?direction, move_num = self.move_num, "move rejected");
                    self.last_transition = ControllerState::Rejected;
                    GameUpdate::Rejected
                } else {
                    self.state.commit(outcome);
                    self.move_num += 1;
                    self.moves_made += 1;
                    self.history.record(self.move_num, self.state.clone());
                    self.history.discard_after(self.move_num);
                    debug!(?direction, ?outcome, move_num = self.move_num, "move committed");
                    self.last_transition = ControllerState::Committed;
                    GameUpdate::Committed(outcome)
                }
            }
            UserAction::Undo => self.navigate(self.move_num.saturating_sub(1))?,
            UserAction::Redo => {
                let target = (self.move_num + 1).min(self.history.max_recorded_index());
                self.navigate(target)?
            }
            UserAction::Noop => {
                self.history.record(self.move_num, self.state.clone());
                self.last_transition = ControllerState::Idle;
                GameUpdate::NoChange
            }
        };
        Ok(update)
    }

    fn navigate(&mut self, target: usize) -> Result<GameUpdate, HistoryMissingError> {
        self.last_transition = ControllerState::Navigating;
        let restored = match self.history.get(target) {
            Ok(snapshot) => snapshot.clone(),
            Err(err) => {
                error!(%err, move_num = self.move_num, "trace history out of sync");
                return Err(err);
            }
        };
        self.move_num = target;
        self.state = restored;
        self.history.record(self.move_num, self.state.clone());
        debug!(move_num = self.move_num, "navigated history");
        Ok(GameUpdate::Navigated { move_num: self.move_num })
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            human: self.state.human,
            boxes: self.state.boxes.clone(),
            active_box_indices: active_boxes(&self.state.boxes, &self.stage),
            move_count: self.move_num,
            moves_made: self.moves_made,
            solved: is_solved(&self.state.boxes, &self.stage),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn entity_state(&self) -> &EntityState {
        &self.state
    }

    pub fn history(&self) -> &TraceHistory {
        &self.history
    }

    pub fn move_num(&self) -> usize {
        self.move_num
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn last_transition(&self) -> ControllerState {
        self.last_transition
    }
}
