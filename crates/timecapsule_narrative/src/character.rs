//! Character profiles.
//!
//! A profile is a Markdown document with a `# <Name> Character Profile`
//! title and `## <Section>` headings:
//!
//! ```markdown
//! # Ebenezer Hartley Character Profile
//!
//! ## Background
//! - Senior clerk at a shipping office
//!
//! ## Mannerisms
//! - Polishes his spectacles when nervous
//! ```

use derive_getters::Getters;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use timecapsule_error::{CharacterError, CharacterErrorKind};
use tracing::{debug, instrument};

const TITLE_SUFFIX: &str = " Character Profile";

/// A parsed character profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct CharacterProfile {
    /// Character name
    name: String,
    /// Section heading and body text, in document order
    sections: Vec<(String, String)>,
}

impl CharacterProfile {
    /// Build a profile from its parts.
    pub fn new(name: impl Into<String>, sections: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            sections,
        }
    }

    /// Parse a profile document.
    ///
    /// # Errors
    ///
    /// - `EmptyProfile` if the text is blank
    /// - `MissingTitle` if the first non-blank line is not a `# ` heading
    /// - `MalformedHeading` for a `##` heading with no text
    /// - `DuplicateSection` if a heading appears twice
    pub fn parse(text: &str) -> Result<Self, CharacterError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end()));

        let title = loop {
            match lines.next() {
                None => return Err(CharacterError::new(CharacterErrorKind::EmptyProfile)),
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => break line.trim_start(),
            }
        };

        let name = title
            .strip_prefix("# ")
            .map(|rest| rest.trim())
            .map(|rest| rest.strip_suffix(TITLE_SUFFIX).unwrap_or(rest).trim())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CharacterError::new(CharacterErrorKind::MissingTitle))?;

        let mut sections: Vec<(String, Vec<&str>)> = Vec::new();
        let mut seen = HashSet::new();

        for (number, line) in lines {
            let trimmed = line.trim_start();
            if trimmed == "##" || trimmed.starts_with("## ") {
                let heading = trimmed.trim_start_matches('#').trim();
                if heading.is_empty() {
                    return Err(CharacterError::new(CharacterErrorKind::MalformedHeading {
                        line: number,
                    }));
                }
                if !seen.insert(heading.to_string()) {
                    return Err(CharacterError::new(CharacterErrorKind::DuplicateSection(
                        heading.to_string(),
                    )));
                }
                sections.push((heading.to_string(), Vec::new()));
            } else if let Some((_, body)) = sections.last_mut() {
                body.push(line);
            }
        }

        Ok(Self {
            name: name.to_string(),
            sections: sections
                .into_iter()
                .map(|(heading, body)| (heading, body.join("\n").trim().to_string()))
                .collect(),
        })
    }

    /// Body of the named section, if present.
    pub fn section(&self, heading: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, body)| body.as_str())
    }
}

/// Directory of `<name>.md` profile documents.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CharacterLibrary {
    dir: PathBuf,
}

impl CharacterLibrary {
    /// Create a library rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Names of the available profiles, sorted.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the directory exists but cannot be listed.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn list(&self) -> Result<Vec<String>, CharacterError> {
        if !self.dir.exists() {
            debug!("Character directory does not exist");
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            CharacterError::new(CharacterErrorKind::FileRead(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("md"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Path of the profile document for `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.md", name))
    }

    /// Load and parse the profile stored as `<dir>/<name>.md`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such file exists, `FileRead` if it cannot be
    /// read, and any [`CharacterProfile::parse`] error.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load(&self, name: &str) -> Result<CharacterProfile, CharacterError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(CharacterError::new(CharacterErrorKind::NotFound(
                name.to_string(),
            )));
        }
        let profile = load_profile(&path)?;
        debug!(name = %profile.name, sections = profile.sections.len(), "Loaded character profile");
        Ok(profile)
    }

    /// Load several profiles, preserving the requested order.
    ///
    /// # Errors
    ///
    /// Fails on the first profile that cannot be loaded.
    pub fn load_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CharacterProfile>, CharacterError> {
        names.iter().map(|name| self.load(name.as_ref())).collect()
    }
}

/// Read and parse a profile document from any path.
///
/// # Errors
///
/// Returns `FileRead` if the file cannot be read, and any parse error.
pub fn load_profile(path: &Path) -> Result<CharacterProfile, CharacterError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CharacterError::new(CharacterErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    CharacterProfile::parse(&text)
}
