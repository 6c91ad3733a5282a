#[cfg(test)]
mod tests {
    use crate::highscore::{load_high_score, save_high_score};
    use crate::tests::test_utils::{HIGH_SCORE_ENV_LOCK, lock_env};
    use std::fs;

    #[test]
    fn test_missing_file_reads_as_zero() {
        let _guard = lock_env(&HIGH_SCORE_ENV_LOCK);
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("absent");
        unsafe {
            std::env::set_var("QUADFALL_HIGH_SCORE", path.to_str().unwrap());
        }

        assert_eq!(load_high_score(), 0);

        unsafe {
            std::env::remove_var("QUADFALL_HIGH_SCORE");
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let _guard = lock_env(&HIGH_SCORE_ENV_LOCK);
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("highscore");
        unsafe {
            std::env::set_var("QUADFALL_HIGH_SCORE", path.to_str().unwrap());
        }

        save_high_score(12_345).expect("Failed to save high score");
        assert_eq!(load_high_score(), 12_345);

        unsafe {
            std::env::remove_var("QUADFALL_HIGH_SCORE");
        }
    }

    #[test]
    fn test_garbage_content_reads_as_zero() {
        let _guard = lock_env(&HIGH_SCORE_ENV_LOCK);
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("highscore");
        unsafe {
            std::env::set_var("QUADFALL_HIGH_SCORE", path.to_str().unwrap());
        }

        fs::write(&path, "not a number").expect("Failed to write test file");
        assert_eq!(load_high_score(), 0);

        unsafe {
            std::env::remove_var("QUADFALL_HIGH_SCORE");
        }
    }
}
