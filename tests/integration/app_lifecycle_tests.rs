/*!
 * Integration tests for application lifecycle
 */

use std::fs;
use anyhow::Result;
use tokio_test;
use dualsub::app_config::Config;
use dualsub::app_controller::{BatchSummary, Controller, FilePair};
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;

    assert_eq!(controller.config().upper_language, "en");
    Ok(())
}

/// Test that an invalid configuration is refused up front
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.upper_language = "fr".to_string();

    assert!(Controller::with_config(config).is_err());
}

/// Test file pairing by language suffix
#[test]
fn test_find_pairs_withMixedFiles_shouldPairByBaseName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let movie_en = common::create_upper_subtitle(root, "movie.en.srt")?;
    let movie_fr = common::create_lower_subtitle(root, "movie.fr.srt")?;
    let ep_en = common::create_upper_subtitle(root, "show/ep1.eng.srt")?;
    let ep_fr = common::create_lower_subtitle(root, "show/ep1.fre.srt")?;
    common::create_upper_subtitle(root, "lonely.en.srt")?;
    common::create_upper_subtitle(root, "movie.de.srt")?;
    common::create_upper_subtitle(root, "movie.en-fr.srt")?;

    let controller = Controller::new_for_test()?;
    let (pairs, unpaired) = controller.find_pairs(root)?;

    assert_eq!(
        pairs,
        vec![
            FilePair { upper: movie_en, lower: movie_fr },
            FilePair { upper: ep_en, lower: ep_fr },
        ]
    );
    assert_eq!(unpaired, 1);
    Ok(())
}

/// Test that two spellings of the same language do not silently replace each other
#[test]
fn test_find_pairs_withDuplicateLanguage_shouldKeepFirstAndCountOther() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let movie_en = common::create_upper_subtitle(root, "movie.en.srt")?;
    common::create_upper_subtitle(root, "movie.eng.srt")?;
    let movie_fr = common::create_lower_subtitle(root, "movie.fr.srt")?;

    let controller = Controller::new_for_test()?;
    let (pairs, unpaired) = controller.find_pairs(root)?;

    assert_eq!(pairs, vec![FilePair { upper: movie_en, lower: movie_fr }]);
    assert_eq!(unpaired, 1);
    Ok(())
}

/// Test a folder run with successes, a failure and an unpaired file
#[test]
fn test_run_folder_withMixedPairs_shouldCountOutcomes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_upper_subtitle(root, "movie.en.srt")?;
    common::create_lower_subtitle(root, "movie.fr.srt")?;
    common::create_upper_subtitle(root, "show/ep1.en.srt")?;
    common::create_lower_subtitle(root, "show/ep1.fr.srt")?;
    common::create_upper_subtitle(root, "broken.en.srt")?;
    common::create_test_file(root, "broken.fr.srt", "1\nnot a timing line\ntext\n")?;
    common::create_upper_subtitle(root, "lonely.en.srt")?;

    let controller = Controller::new_for_test()?;

    let summary = tokio_test::block_on(controller.run_folder(root.to_path_buf(), false))?;
    assert_eq!(
        summary,
        BatchSummary { processed: 2, skipped: 0, failed: 1, unpaired: 1 }
    );
    assert!(root.join("movie.en-fr.srt").exists());
    assert!(root.join("show").join("ep1.en-fr.srt").exists());
    assert!(!root.join("broken.en-fr.srt").exists());

    // Outputs are not picked up as inputs, and existing ones are skipped
    let summary = tokio_test::block_on(controller.run_folder(root.to_path_buf(), false))?;
    assert_eq!(
        summary,
        BatchSummary { processed: 0, skipped: 2, failed: 1, unpaired: 1 }
    );

    let summary = tokio_test::block_on(controller.run_folder(root.to_path_buf(), true))?;
    assert_eq!(summary.processed, 2);
    Ok(())
}

/// Test a folder run with other languages configured
#[test]
fn test_run_folder_withCustomLanguages_shouldUseThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_upper_subtitle(root, "film.de.srt")?;
    common::create_lower_subtitle(root, "film.it.srt")?;
    common::create_upper_subtitle(root, "film.en.srt")?;

    let mut config = Config::default();
    config.upper_language = "de".to_string();
    config.lower_language = "it".to_string();
    let controller = Controller::with_config(config)?;

    let summary = tokio_test::block_on(controller.run_folder(root.to_path_buf(), false))?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.unpaired, 0);
    assert!(fs::read_to_string(root.join("film.de-it.srt"))?.contains("Ceci est un sous-titre de test."));
    Ok(())
}

/// Test a folder run on a directory without pairs
#[test]
fn test_run_folder_withNoPairs_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let summary = tokio_test::block_on(controller.run_folder(temp_dir.path().to_path_buf(), false))?;

    assert_eq!(summary, BatchSummary::default());
    Ok(())
}

/// Test a folder run on a missing directory
#[test]
fn test_run_folder_withMissingDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = tokio_test::block_on(controller.run_folder(temp_dir.path().join("nope"), false));

    assert!(result.is_err());
    Ok(())
}

/// Test the check entry point
#[test]
fn test_check_file_withInvertedCue_shouldReportFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "check.en.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:04,000 --> 00:00:03,000\nB\n\n3\n00:00:05,000 --> 00:00:05,000\nC\n",
    )?;
    let controller = Controller::new_for_test()?;

    let report = controller.check_file(&path)?;

    assert!(!report.passed);
    assert_eq!(report.failed_entries().len(), 2);
    Ok(())
}

/// Test the check entry point on a malformed file
#[test]
fn test_check_file_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.srt", "abc\n")?;
    let controller = Controller::new_for_test()?;

    assert!(controller.check_file(&path).is_err());
    Ok(())
}
