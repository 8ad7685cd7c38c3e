#[cfg(test)]
mod test {
    use Direction::*;
    use crate::console_interface::parse_level;
    use crate::controller::{ControllerState, EngineHandle};
    use crate::core::*;
    use crate::stage::{InvalidStageError, StageDescriptor};
    use crate::test::test_util::GameTestState;

    const CORRIDOR: &str = r#"
#######
#@ $ .#
#     #
#######
"#;

    #[test]
    fn undo_at_start_is_noop() {
        let mut game = GameTestState::new(CORRIDOR);
        let before = game.engine.snapshot();

        assert_eq!(game.undo(), GameUpdate::Navigated { move_num: 0 });
        assert_eq!(game.engine.snapshot(), before);
        game.assert_matches(CORRIDOR);
    }

    #[test]
    fn undo_all_moves_returns_to_start_and_redo_replays() {
        let mut game = GameTestState::new(CORRIDOR);
        let initial = game.state();
        let moves = [Right, Right, Right, Down, Left, Up];

        let mut recorded = vec![initial.clone()];
        for &direction in &moves {
            game.assert_move(direction);
            recorded.push(game.state());
        }

        for expected in recorded.iter().rev().skip(1) {
            game.undo();
            assert_eq!(&game.state(), expected);
        }
        assert_eq!(game.state(), initial);
        assert_eq!(game.engine.move_num(), 0);

        for (i, expected) in recorded.iter().enumerate().skip(1) {
            assert_eq!(game.redo(), GameUpdate::Navigated { move_num: i });
            assert_eq!(&game.state(), expected);
        }
    }

    #[test]
    fn redo_at_latest_move_stays_put() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right]);
        let before = game.state();

        assert_eq!(game.redo(), GameUpdate::Navigated { move_num: 2 });
        assert_eq!(game.state(), before);
        assert_eq!(game.engine.move_num(), 2);
    }

    #[test]
    fn new_move_after_undo_discards_redo_branch() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right, Right]);
        game.undo();
        game.undo();
        assert_eq!(game.engine.move_num(), 1);

        game.assert_move(Down);
        let after_branch = game.state();
        assert_eq!(game.engine.move_num(), 2);
        assert_eq!(game.engine.history().max_recorded_index(), 2);

        assert_eq!(game.redo(), GameUpdate::Navigated { move_num: 2 });
        assert_eq!(game.state(), after_branch);
        game.assert_matches(r#"
#######
#  $ .#
#  @  #
#######
"#);
    }

    #[test]
    fn undo_and_redo_do_not_count_as_moves() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right]);
        game.undo();
        game.undo();
        game.redo();

        let snapshot = game.engine.snapshot();
        assert_eq!(snapshot.moves_made, 2);
        assert_eq!(snapshot.move_count, 1);

        game.assert_move(Down);
        let snapshot = game.engine.snapshot();
        assert_eq!(snapshot.moves_made, 3);
        assert_eq!(snapshot.move_count, 2);
    }

    #[test]
    fn rejected_move_records_nothing() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_move(Right);
        let entries = game.engine.history().len();

        game.assert_rejected(Up);
        assert_eq!(game.engine.history().len(), entries);
        assert_eq!(game.engine.move_num(), 1);
        assert_eq!(game.engine.moves_made(), 1);
        assert_eq!(game.engine.last_transition(), ControllerState::Rejected);
    }

    #[test]
    fn noop_changes_nothing() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_move(Right);
        let before = game.engine.snapshot();

        assert_eq!(game.try_step(UserAction::Noop), GameUpdate::NoChange);
        assert_eq!(game.engine.snapshot(), before);
        assert_eq!(game.engine.history().max_recorded_index(), 1);
    }

    #[test]
    fn undo_recomputes_active_boxes() {
        let mut game = GameTestState::new(r#"
#####
#@$.#
#####
"#);
        game.assert_move(Right);
        assert_eq!(game.engine.snapshot().active_box_indices, vec![0]);

        game.undo();
        assert!(game.engine.snapshot().active_box_indices.is_empty());
        assert_eq!(game.engine.last_transition(), ControllerState::Navigating);

        game.redo();
        assert_eq!(game.engine.snapshot().active_box_indices, vec![0]);
    }

    #[test]
    fn history_entry_zero_is_initial_state() {
        let mut game = GameTestState::new(CORRIDOR);
        let initial = game.state();
        game.assert_moves(&[Right, Down, Left]);
        assert_eq!(game.engine.history().get(0), Ok(&initial));
        assert_eq!(game.engine.last_transition(), ControllerState::Committed);
    }

    #[test]
    fn restart_resets_history_and_counters() {
        let mut game = GameTestState::new(CORRIDOR);
        let initial = game.state();
        game.assert_moves(&[Right, Right]);

        game.engine.restart();
        assert_eq!(game.state(), initial);
        assert_eq!(game.engine.move_num(), 0);
        assert_eq!(game.engine.moves_made(), 0);
        assert_eq!(game.engine.history().max_recorded_index(), 0);
        assert_eq!(game.redo(), GameUpdate::Navigated { move_num: 0 });
    }

    #[test]
    fn failed_reload_keeps_current_stage() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_move(Right);
        let before = game.engine.snapshot();

        let mut broken = parse_level(CORRIDOR);
        broken.width = Some(-1);
        assert_eq!(
            game.engine.reload(&broken),
            Err(InvalidStageError::NonPositiveDimension { width: -1, height: 4 })
        );
        assert_eq!(game.engine.snapshot(), before);
        assert_eq!(game.engine.history().max_recorded_index(), 1);
    }

    #[test]
    fn reload_replaces_everything() {
        let mut game = GameTestState::new(CORRIDOR);
        game.assert_moves(&[Right, Right]);

        let next = StageDescriptor::from_cells(
            2, 1, 1, &[], &[], &[], Some(Vec2::new(1, 0)));
        game.engine.reload(&next).unwrap();

        let snapshot = game.engine.snapshot();
        assert_eq!(snapshot.human, Vec2::new(1, 0));
        assert!(snapshot.boxes.is_empty());
        assert_eq!(snapshot.move_count, 0);
        assert_eq!(snapshot.moves_made, 0);
        assert_eq!(game.engine.stage().width(), 2);
        game.assert_matches(" @");
    }

    #[test]
    fn invalid_descriptor_never_builds_an_engine() {
        let mut descriptor = parse_level(CORRIDOR);
        descriptor.human = None;
        assert_eq!(
            EngineHandle::load(&descriptor).unwrap_err(),
            InvalidStageError::MissingField("human")
        );
    }
}
