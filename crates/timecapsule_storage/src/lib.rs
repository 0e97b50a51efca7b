//! Output artifacts for TimeCapsuleWriter.
//!
//! This crate owns everything the pipeline writes to disk:
//!
//! - **Run naming**: `<model>_<mode>_<seed>_<timestamp>` labels and file-name slugs
//! - **Outputs**: single stories, per-beat files and `complete_story.txt`
//! - **Samples**: the curated `samples/{single_pass,beat_by_beat,logline}/` tree
//!
//! # Example Structure
//!
//! ```text
//! outputs/
//! ├── haykgrigo3_TimeCapsuleLLM_single_42_20251028_155517.txt
//! └── the_fogbound_parcel_haykgrigo3_TimeCapsuleLLM_beats_42_20251028_160102/
//!     ├── 01_setup.txt
//!     ├── 02_complication.txt
//!     └── complete_story.txt
//! samples/
//! ├── single_pass/
//! ├── beat_by_beat/
//! └── logline/
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fs;
mod naming;
mod output;
mod samples;

pub use fs::{read_text, write_json, write_text};
pub use naming::{RunLabel, beat_file_name, model_slug, sample_file_name, slugify};
pub use output::{COMPLETE_STORY_FILE, OutputStore, StoryDirectory};
pub use samples::SampleStore;
