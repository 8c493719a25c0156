use anyhow::{Result, Context, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::merge::{self, MergeStats};
use crate::subtitle::{self, LineSource, SubtitleTrack};
use crate::validation::{TimecodeValidationResult, TimecodeValidator};

// @module: Application controller for subtitle merging

/// Two subtitle files of the same video, one per language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub upper: PathBuf,
    pub lower: PathBuf,
}

impl FilePair {
    fn display_name(&self) -> String {
        self.upper
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// What a successful merge produced
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub output_path: PathBuf,
    pub upper_entries: usize,
    pub lower_entries: usize,
    pub stats: MergeStats,
    /// Upper entries the merge ignored because of broken timing
    pub upper_rejected: usize,
    /// Lower entries the merge ignored because of broken timing
    pub lower_rejected: usize,
}

/// Outcome of a single file merge
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    Merged(MergeSummary),
    /// Output already existed and overwriting was not allowed
    Skipped(PathBuf),
}

/// Counters for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Files in one of the two languages with no counterpart, or shadowed
    /// by another file of the same language and name
    pub unpaired: usize,
}

/// Main application controller for subtitle merging
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge two subtitle texts in memory and return the merged SubRip text
    pub fn merge_text(&self, upper: &str, lower: &str) -> Result<String, AppError> {
        let upper_track = subtitle::parse_with_source(upper, LineSource::Upper)?;
        let lower_track = subtitle::parse_with_source(lower, LineSource::Lower)?;

        let merged = merge::merge(&upper_track, &lower_track);
        Ok(subtitle::serialize_with(&merged, self.config.output.line_ending))
    }

    /// Merge two subtitle files into `output_path`
    pub fn merge_files(&self, upper_path: &Path, lower_path: &Path, output_path: &Path, force_overwrite: bool) -> Result<MergeOutcome> {
        let start_time = Instant::now();

        if output_path.exists() && !(force_overwrite || self.config.output.overwrite) {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(MergeOutcome::Skipped(output_path.to_path_buf()));
        }

        let upper = self.load_track(upper_path, LineSource::Upper, &self.config.upper_language)?;
        let lower = self.load_track(lower_path, LineSource::Lower, &self.config.lower_language)?;

        let validator = TimecodeValidator::with_config(self.config.validation.clone());
        let upper_report = validator.validate_track(&upper);
        let lower_report = validator.validate_track(&lower);
        Self::report_issues(upper_path, &upper_report);
        Self::report_issues(lower_path, &lower_report);

        let (merged, stats) = merge::merge_with_stats(&upper, &lower);
        let content = subtitle::serialize_with(&merged, self.config.output.line_ending);
        FileManager::write_to_file(output_path, &content)?;

        info!(
            "Merged {} + {} entries into {} ({}) in {}",
            upper.len(),
            lower.len(),
            stats.emitted,
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(MergeOutcome::Merged(MergeSummary {
            output_path: output_path.to_path_buf(),
            upper_entries: upper.len(),
            lower_entries: lower.len(),
            stats,
            upper_rejected: upper_report.failed_entries().len(),
            lower_rejected: lower_report.failed_entries().len(),
        }))
    }

    /// Run timecode diagnostics on a single subtitle file
    pub fn check_file(&self, path: &Path) -> Result<TimecodeValidationResult> {
        let track = self.load_track(path, LineSource::Upper, &self.config.upper_language)?;
        let validator = TimecodeValidator::with_config(self.config.validation.clone());
        Ok(validator.validate_track(&track))
    }

    /// Find `name.<upper>.srt` / `name.<lower>.srt` pairs below `input_dir`.
    /// Returns the pairs and the number of files left without a partner.
    pub fn find_pairs(&self, input_dir: &Path) -> Result<(Vec<FilePair>, usize)> {
        let mut groups: BTreeMap<(PathBuf, String), (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();
        let mut unpaired = 0;

        for path in FileManager::find_files(input_dir, "srt")? {
            let Some(language) = language_utils::language_from_filename(&path) else {
                continue;
            };

            let key = (
                path.parent().map(Path::to_path_buf).unwrap_or_default(),
                language_utils::base_name_without_language(&path),
            );

            let group = if language_utils::language_codes_match(&language, &self.config.upper_language) {
                &mut groups.entry(key).or_default().0
            } else if language_utils::language_codes_match(&language, &self.config.lower_language) {
                &mut groups.entry(key).or_default().1
            } else {
                continue;
            };

            // `movie.en.srt` and `movie.eng.srt` compete for the same slot; the first one found wins
            if let Some(kept) = group {
                warn!("Ignoring {:?}, {:?} already provides that language", path, kept);
                unpaired += 1;
                continue;
            }
            *group = Some(path);
        }

        let mut pairs = Vec::new();
        for ((dir, base), slots) in groups {
            match slots {
                (Some(upper), Some(lower)) => pairs.push(FilePair { upper, lower }),
                _ => {
                    debug!("No counterpart for {:?} in {:?}", base, dir);
                    unpaired += 1;
                }
            }
        }

        Ok((pairs, unpaired))
    }

    /// Merge every language pair found in a directory (recursive).
    /// Pairs are merged concurrently; a failing pair does not stop the others.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<BatchSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let (pairs, unpaired) = self.find_pairs(&input_dir)?;
        let mut summary = BatchSummary {
            unpaired,
            ..BatchSummary::default()
        };

        if pairs.is_empty() {
            warn!(
                "No {}/{} subtitle pairs found in {:?}",
                self.config.upper_language, self.config.lower_language, input_dir
            );
            return Ok(summary);
        }

        let progress_bar = ProgressBar::new(pairs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Merging");

        let concurrent_jobs = self.config.batch.concurrent_jobs.max(1);

        let results = stream::iter(pairs)
            .map(|pair| {
                let controller = self.clone();
                let pb = progress_bar.clone();

                async move {
                    let name = pair.display_name();
                    let output_path = controller.output_path_for(&pair.upper);

                    // Core calls are synchronous; keep them off the async workers
                    let result = tokio::task::spawn_blocking(move || {
                        controller.merge_files(&pair.upper, &pair.lower, &output_path, force_overwrite)
                    })
                    .await
                    .map_err(|e| anyhow!("Merge task panicked: {}", e))
                    .and_then(|inner| inner);

                    pb.inc(1);
                    (name, result)
                }
            })
            .buffer_unordered(concurrent_jobs)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        for (name, result) in results {
            match result {
                Ok(MergeOutcome::Merged(_)) => summary.processed += 1,
                Ok(MergeOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error merging {}: {:#}", name, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Folder processing completed: {} merged, {} skipped, {} errors, {} unpaired in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            summary.unpaired,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Output path used in folder mode for a given upper file
    pub fn output_path_for(&self, upper_path: &Path) -> PathBuf {
        FileManager::generate_output_path(upper_path, &self.config.upper_language, &self.config.lower_language)
    }

    fn load_track(&self, path: &Path, source: LineSource, fallback_language: &str) -> Result<SubtitleTrack> {
        let content = FileManager::read_to_string(path)?;
        let track = subtitle::parse_with_source(&content, source)
            .with_context(|| format!("Failed to parse {} track: {}", source, path.display()))?;

        let language = language_utils::language_from_filename(path)
            .unwrap_or_else(|| fallback_language.to_string());

        Ok(track.with_language(language))
    }

    fn report_issues(path: &Path, report: &TimecodeValidationResult) {
        for result in report.entries_with_issues() {
            for issue in &result.issues {
                if issue.is_blocking() {
                    warn!("{} entry {} ignored: {}", path.display(), result.number, issue);
                } else {
                    debug!("{} entry {}: {}", path.display(), result.number, issue);
                }
            }
        }
    }

    /// Format a duration for log output
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
