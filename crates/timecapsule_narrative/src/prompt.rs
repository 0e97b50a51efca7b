//! Prompt composition.
//!
//! Every prompt is assembled from the same blocks in a fixed order:
//!
//! 1. persona text
//! 2. the `## Characters` section, when profiles are attached
//! 3. the continuation excerpt under `## Previously in the story:`, when non-empty
//! 4. the instructions for the current beat
//!
//! Blocks are separated by a blank line. Composition is pure: the same inputs
//! always produce byte-identical prompts.

use crate::{Beat, CharacterProfile, Outline};
use timecapsule_error::{PromptError, PromptErrorKind};

const CONTINUATION_MARKER: &str = "## Previously in the story:";
const CURRENT_SECTION_MARKER: &str = "## Current section to write:";
const CONTINUE_CUE: &str = "Continue the story from here:";
const SCENE_CUE: &str = "Write a period short story that begins with the following scene:";
const CONCEPT_CUE: &str = "Write a period short story based on this concept:";
const CHARACTER_USAGE_GUIDE: &str = "Incorporate these characters into your story, respecting their traits, \
background, and mannerisms. You may adapt minor details as needed for \
the narrative, but maintain the essential character as described.";

/// Render the instruction block for a single beat.
///
/// ```
/// use timecapsule_narrative::{Beat, format_beat};
///
/// let beat = Beat::new("Setup", "A parcel arrives.", vec!["fog".to_string()]);
/// assert_eq!(
///     format_beat(&beat),
///     "### Beat: Setup\n\nA parcel arrives.\n\nKey elements:\n- fog"
/// );
/// ```
pub fn format_beat(beat: &Beat) -> String {
    let mut block = format!(
        "### Beat: {}\n\n{}\n\nKey elements:",
        beat.name(),
        beat.description()
    );
    for element in beat.key_elements() {
        block.push_str("\n- ");
        block.push_str(element);
    }
    block
}

fn format_profile(profile: &CharacterProfile) -> String {
    let mut block = format!("## Character: {}", profile.name());
    for (heading, body) in profile.sections() {
        block.push_str(&format!("\n\n### {}:", heading));
        if !body.is_empty() {
            block.push('\n');
            block.push_str(body);
        }
    }
    block
}

/// Render the `## Characters` section, or nothing for an empty slice.
pub fn format_characters(profiles: &[CharacterProfile]) -> Option<String> {
    if profiles.is_empty() {
        return None;
    }
    let mut parts = vec!["## Characters".to_string()];
    parts.extend(profiles.iter().map(format_profile));
    parts.push(CHARACTER_USAGE_GUIDE.to_string());
    Some(parts.join("\n\n"))
}

/// Compose a beat prompt without constructing a [`PromptComposer`].
///
/// # Errors
///
/// Returns `MissingPersona` if `persona` is empty or whitespace.
pub fn compose_beat_prompt(
    persona: &str,
    profiles: &[CharacterProfile],
    beat: &Beat,
    continuation: &str,
) -> Result<String, PromptError> {
    let composer = PromptComposer::new(persona)?.with_profiles(profiles.to_vec());
    Ok(composer.compose_beat(beat, continuation))
}

/// Assembles prompts from a persona and optional character profiles.
///
/// # Examples
///
/// ```
/// use timecapsule_narrative::{Beat, PromptComposer};
///
/// let composer = PromptComposer::new("You are a Victorian novelist.").unwrap();
/// let beat = Beat::new("Setup", "A parcel arrives.", vec![]);
///
/// let prompt = composer.compose_beat(&beat, "The bell rang.");
/// assert!(prompt.starts_with("You are a Victorian novelist."));
/// assert!(prompt.contains("## Previously in the story:\nThe bell rang."));
/// assert!(prompt.ends_with("Key elements:"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptComposer {
    persona: String,
    profiles: Vec<CharacterProfile>,
}

impl PromptComposer {
    /// Create a composer for the given persona.
    ///
    /// # Errors
    ///
    /// Returns `MissingPersona` if `persona` is empty or whitespace.
    pub fn new(persona: impl Into<String>) -> Result<Self, PromptError> {
        let persona = persona.into();
        if persona.trim().is_empty() {
            return Err(PromptError::new(PromptErrorKind::MissingPersona));
        }
        Ok(Self {
            persona: persona.trim_end().to_string(),
            profiles: Vec::new(),
        })
    }

    /// Attach character profiles, kept in the given order.
    pub fn with_profiles(mut self, profiles: Vec<CharacterProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Persona text.
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Attached character profiles.
    pub fn profiles(&self) -> &[CharacterProfile] {
        &self.profiles
    }

    fn preamble(&self, continuation: &str) -> Vec<String> {
        let mut parts = vec![self.persona.clone()];
        if let Some(characters) = format_characters(&self.profiles) {
            parts.push(characters);
        }
        let continuation = continuation.trim();
        if !continuation.is_empty() {
            parts.push(format!("{}\n{}", CONTINUATION_MARKER, continuation));
        }
        parts
    }

    /// Compose the prompt for a single beat.
    pub fn compose_beat(&self, beat: &Beat, continuation: &str) -> String {
        let mut parts = self.preamble(continuation);
        parts.push(format_beat(beat));
        parts.join("\n\n")
    }

    /// Compose the prompt for beat `index` of `outline`.
    ///
    /// Before the beat instructions comes the outline header and a list of
    /// the earlier beats' descriptions; after them, a cue to continue.
    /// Returns `None` if `index` is out of range.
    pub fn compose_story_beat(
        &self,
        outline: &Outline,
        index: usize,
        continuation: &str,
    ) -> Option<String> {
        let beat = outline.beats().get(index)?;
        let mut parts = self.preamble(continuation);

        parts.push(format!(
            "# {}\n\nSetting: {}\nProtagonist: {}",
            outline.title(),
            outline.setting(),
            outline.protagonist()
        ));

        if index > 0 {
            let events: Vec<String> = outline.beats()[..index]
                .iter()
                .map(|b| format!("- {}", b.description()))
                .collect();
            parts.push(format!("## Previous events:\n{}", events.join("\n")));
        }

        parts.push(format!("{}\n{}", CURRENT_SECTION_MARKER, format_beat(beat)));
        parts.push(CONTINUE_CUE.to_string());
        Some(parts.join("\n\n"))
    }

    /// Compose a single-pass prompt that opens with `seed_scene`.
    pub fn compose_scene(&self, seed_scene: &str) -> String {
        let mut parts = self.preamble("");
        parts.push(format!("{}\n\n{}", SCENE_CUE, seed_scene.trim()));
        parts.join("\n\n")
    }

    /// Compose a single-pass prompt from a one-line story concept.
    pub fn compose_concept(&self, concept: &str) -> String {
        let mut parts = self.preamble("");
        parts.push(format!("{}\n\n{}", CONCEPT_CUE, concept.trim()));
        parts.join("\n\n")
    }
}
