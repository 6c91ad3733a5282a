#[cfg(test)]
mod tests {
    use crate::components::{GameEvent, GameEvents, GameState};
    use crate::game::{
        CLEARS_PER_LEVEL, POINTS_PER_CLEAR, STEP_DELAY_DECREMENT, STEP_DELAY_FLOOR,
        STEP_DELAY_START,
    };
    use crate::systems::score_system;
    use crate::tests::test_utils::{HIGH_SCORE_ENV_LOCK, create_test_world, lock_env};
    use std::fs;

    #[test]
    fn test_each_cleared_box_is_worth_a_fixed_amount() {
        let mut world = create_test_world();

        world.resource_mut::<GameEvents>().push(GameEvent::BoxCleared);
        score_system(&mut world);

        let game_state = world.resource::<GameState>();
        assert_eq!(game_state.score, POINTS_PER_CLEAR);
        assert_eq!(game_state.clears, 1);
        assert_eq!(game_state.level, 1);
        assert!((game_state.step_delay - STEP_DELAY_START).abs() < 1e-6);
    }

    #[test]
    fn test_tenth_clear_levels_up_and_speeds_up() {
        let mut world = create_test_world();

        {
            let mut events = world.resource_mut::<GameEvents>();
            for _ in 0..CLEARS_PER_LEVEL {
                events.push(GameEvent::BoxCleared);
            }
        }
        score_system(&mut world);

        let game_state = world.resource::<GameState>();
        assert_eq!(game_state.clears, CLEARS_PER_LEVEL);
        assert_eq!(game_state.score, CLEARS_PER_LEVEL * POINTS_PER_CLEAR);
        assert_eq!(game_state.level, 2);
        // Exactly one decrement from the starting delay
        let expected = STEP_DELAY_START - STEP_DELAY_DECREMENT;
        assert!((game_state.step_delay - expected).abs() < 1e-6);
    }

    #[test]
    fn test_step_delay_never_drops_below_the_floor() {
        let mut game_state = GameState::default();
        game_state.step_delay = STEP_DELAY_FLOOR + 0.05;

        game_state.adjust_step_delay(-STEP_DELAY_DECREMENT);
        assert!((game_state.step_delay - STEP_DELAY_FLOOR).abs() < 1e-6);

        game_state.adjust_step_delay(-STEP_DELAY_DECREMENT);
        assert!((game_state.step_delay - STEP_DELAY_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_persists_a_beaten_high_score() {
        let _guard = lock_env(&HIGH_SCORE_ENV_LOCK);
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("highscore");
        unsafe {
            std::env::set_var("QUADFALL_HIGH_SCORE", path.to_str().unwrap());
        }

        let mut world = create_test_world();
        {
            let mut game_state = world.resource_mut::<GameState>();
            game_state.score = 500;
            game_state.high_score = 100;
        }
        world.resource_mut::<GameEvents>().push(GameEvent::GameOver);
        score_system(&mut world);

        assert_eq!(world.resource::<GameState>().high_score, 500);
        let stored = fs::read_to_string(&path).expect("high score file should exist");
        assert_eq!(stored.trim(), "500");

        unsafe {
            std::env::remove_var("QUADFALL_HIGH_SCORE");
        }
    }

    #[test]
    fn test_game_over_leaves_an_unbeaten_high_score_alone() {
        let _guard = lock_env(&HIGH_SCORE_ENV_LOCK);
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("highscore");
        unsafe {
            std::env::set_var("QUADFALL_HIGH_SCORE", path.to_str().unwrap());
        }

        let mut world = create_test_world();
        {
            let mut game_state = world.resource_mut::<GameState>();
            game_state.score = 50;
            game_state.high_score = 100;
        }
        world.resource_mut::<GameEvents>().push(GameEvent::GameOver);
        score_system(&mut world);

        assert_eq!(world.resource::<GameState>().high_score, 100);
        assert!(!path.exists(), "unbeaten high score must not be written");

        unsafe {
            std::env::remove_var("QUADFALL_HIGH_SCORE");
        }
    }

    #[test]
    fn test_session_reset_preserves_the_high_score() {
        let mut game_state = GameState::default();
        game_state.score = 700;
        game_state.high_score = 900;
        game_state.game_over = true;

        game_state.reset();

        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.clears, 0);
        assert_eq!(game_state.level, 1);
        assert!(!game_state.game_over);
        assert_eq!(game_state.high_score, 900);
    }
}
