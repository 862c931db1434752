pub mod compliance;
pub mod overview;
pub mod points;
pub mod profiles;
pub mod search;
pub mod summary;
pub mod tiers;
pub mod trend;

use limnos_core::error::LimnosError;
use limnos_core::ingest::{BuildOptions, ErrorPolicy};
use limnos_core::profile::builtin;
use limnos_core::profile::schema::Profile;
use limnos_core::source;
use limnos_core::Dataset;
use std::path::{Path, PathBuf};

/// Options shared by every data subcommand.
pub struct Context {
    pub profile: Option<String>,
    pub profile_file: Option<PathBuf>,
    pub skip_invalid: bool,
    pub output: String,
}

impl Context {
    pub fn json(&self) -> bool {
        self.output == "json"
    }

    /// Read and build the dataset in `input_file` (`.xlsx` or CSV).
    pub fn load_dataset(&self, input_file: &Path) -> Result<Dataset, LimnosError> {
        let options = BuildOptions {
            on_error: if self.skip_invalid {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
        };

        let source = source::open_path(input_file);
        let outcome = limnos_core::load(source.as_ref(), &options)?;

        if !outcome.skipped.is_empty() {
            eprintln!(
                "  {} record(s) skipped in {}",
                outcome.skipped.len(),
                input_file.display()
            );
        }

        Ok(outcome.dataset)
    }

    /// The profile file if one was given, else the named or default preset.
    pub fn profile(&self) -> Result<Profile, LimnosError> {
        if let Some(path) = &self.profile_file {
            return limnos_core::profile::load_profile(path);
        }
        match &self.profile {
            Some(name) => builtin::load_preset(name),
            None => builtin::default_profile(),
        }
    }
}
