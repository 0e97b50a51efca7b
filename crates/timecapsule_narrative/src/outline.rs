//! Story outlines and their document formats.
//!
//! Outlines are usually YAML; TOML is accepted for files ending in `.toml`.
//! Both formats deserialize into intermediate structures whose fields are
//! all optional, so a missing key is reported by name instead of as a raw
//! deserializer message.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use timecapsule_error::{OutlineError, OutlineErrorKind};
use tracing::{debug, instrument};

/// One narrative unit of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Beat {
    /// Beat name (e.g. "Setup")
    name: String,
    /// What happens in this beat
    description: String,
    /// Elements the beat must include, in order
    key_elements: Vec<String>,
}

impl Beat {
    /// Create a beat.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        key_elements: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            key_elements,
        }
    }
}

/// A parsed story outline.
///
/// # Examples
///
/// ```
/// use timecapsule_narrative::Outline;
///
/// let outline = Outline::from_yaml_str(r#"
/// title: The Parcel
/// setting: London, 1865
/// protagonist: A clerk
/// beats:
///   - name: Setup
///     description: A parcel arrives.
///     key_elements: [fog, ledger]
/// "#).unwrap();
///
/// assert_eq!(outline.title(), "The Parcel");
/// assert_eq!(outline.beats()[0].key_elements(), &["fog", "ledger"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Outline {
    /// Story title
    title: String,
    /// Time and place
    setting: String,
    /// Who the story follows
    protagonist: String,
    /// Beats in story order
    beats: Vec<Beat>,
}

#[derive(Debug, Deserialize)]
struct RawOutline {
    title: Option<String>,
    setting: Option<String>,
    protagonist: Option<String>,
    beats: Option<Vec<RawBeat>>,
}

#[derive(Debug, Deserialize)]
struct RawBeat {
    name: Option<String>,
    description: Option<String>,
    key_elements: Option<Vec<String>>,
}

fn malformed(message: impl Into<String>) -> OutlineError {
    OutlineError::new(OutlineErrorKind::MalformedOutline(message.into()))
}

fn required<T>(value: Option<T>, key: &str) -> Result<T, OutlineError> {
    value.ok_or_else(|| malformed(format!("missing required key '{}'", key)))
}

fn required_in_beat<T>(value: Option<T>, index: usize, key: &str) -> Result<T, OutlineError> {
    value.ok_or_else(|| malformed(format!("beat {} is missing required key '{}'", index, key)))
}

impl RawOutline {
    fn validate(self) -> Result<Outline, OutlineError> {
        let title = required(self.title, "title")?;
        let setting = required(self.setting, "setting")?;
        let protagonist = required(self.protagonist, "protagonist")?;
        let raw_beats = required(self.beats, "beats")?;

        let beats = raw_beats
            .into_iter()
            .enumerate()
            .map(|(index, beat)| {
                Ok(Beat {
                    name: required_in_beat(beat.name, index, "name")?,
                    description: required_in_beat(beat.description, index, "description")?,
                    key_elements: required_in_beat(beat.key_elements, index, "key_elements")?,
                })
            })
            .collect::<Result<Vec<_>, OutlineError>>()?;

        if beats.is_empty() {
            return Err(OutlineError::new(OutlineErrorKind::EmptyOutline));
        }

        Ok(Outline {
            title,
            setting,
            protagonist,
            beats,
        })
    }
}

impl Outline {
    /// Build an outline directly from its parts.
    pub fn new(
        title: impl Into<String>,
        setting: impl Into<String>,
        protagonist: impl Into<String>,
        beats: Vec<Beat>,
    ) -> Self {
        Self {
            title: title.into(),
            setting: setting.into(),
            protagonist: protagonist.into(),
            beats,
        }
    }

    /// Parse an outline from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedOutline` if the text is not a YAML mapping or a
    /// required key is missing, and `EmptyOutline` if `beats` is empty.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_yaml_str(text: &str) -> Result<Self, OutlineError> {
        let raw: RawOutline =
            serde_yaml::from_str(text).map_err(|e| malformed(format!("invalid YAML: {}", e)))?;
        let outline = raw.validate()?;
        debug!(title = %outline.title, beats = outline.beats.len(), "Parsed outline");
        Ok(outline)
    }

    /// Parse an outline from TOML text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Outline::from_yaml_str`].
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, OutlineError> {
        let raw: RawOutline =
            toml::from_str(text).map_err(|e| malformed(format!("invalid TOML: {}", e)))?;
        let outline = raw.validate()?;
        debug!(title = %outline.title, beats = outline.beats.len(), "Parsed outline");
        Ok(outline)
    }

    /// Load an outline from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the file cannot be read, otherwise the parse
    /// errors of the chosen format.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OutlineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OutlineError::new(OutlineErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Render the outline as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `MalformedOutline` if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, OutlineError> {
        serde_yaml::to_string(self).map_err(|e| malformed(format!("cannot serialize: {}", e)))
    }
}

impl FromStr for Outline {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_yaml_str(s)
    }
}
