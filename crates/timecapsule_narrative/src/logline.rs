//! Turning a one-line premise into an outline.
//!
//! The generator is asked for a YAML outline. Its answer is accepted as-is if
//! it parses, then a fenced ```` ```yaml ```` block inside it is tried, and as
//! a last resort a four-beat outline is derived from the logline itself.

use crate::{Beat, Outline, StoryExecutor};
use derive_getters::Getters;
use timecapsule_error::TimeCapsuleResult;
use timecapsule_interface::Generator;
use tracing::{info, instrument, warn};

const DEFAULT_SETTING: &str = "London, 1865";
const DEFAULT_CHALLENGE: &str = "complete an important task";
const DEFAULT_PROTAGONIST: &str = "diligent clerk";

/// Where an accepted outline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum OutlineOrigin {
    /// The generator's whole response parsed
    Response,
    /// A fenced YAML block inside the response parsed
    FencedBlock,
    /// Built from the logline after the response failed to parse
    Fallback,
}

/// An outline produced from a logline, plus the YAML it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LoglineOutline {
    /// Parsed outline
    outline: Outline,
    /// YAML text the outline was parsed from
    source: String,
    /// How the outline was obtained
    origin: OutlineOrigin,
}

/// Build the prompt asking for an outline.
pub fn compose_outline_request(instructions: &str, logline: &str) -> String {
    format!(
        "{}\n\nLogline: \"{}\"\n\nGenerate a complete story outline in YAML format:",
        instructions.trim_end(),
        logline.trim()
    )
}

/// Contents of the first ```` ```yaml ```` fence, up to the closing fence or
/// end of text.
pub fn extract_yaml_block(text: &str) -> Option<&str> {
    let (_, after) = text.split_once("```yaml")?;
    Some(after.split_once("```").map_or(after, |(block, _)| block))
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(start)?;
    Some(rest.split_once(end).map_or(rest, |(inner, _)| inner))
}

fn clean(fragment: &str) -> Option<String> {
    let cleaned = fragment.trim().trim_end_matches('.').trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Derive a Setup/Complication/Turn/Resolution outline from a logline.
///
/// Loglines of the shape "A <protagonist> in <setting> must <challenge>."
/// fill every field; missing parts fall back to fixed defaults.
///
/// ```
/// use timecapsule_narrative::fallback_outline;
///
/// let outline = fallback_outline("A weary clerk in foggy London must deliver a parcel.");
/// assert_eq!(outline.setting(), "foggy London");
/// assert_eq!(outline.protagonist(), "A weary clerk");
/// assert_eq!(outline.beats().len(), 4);
/// ```
pub fn fallback_outline(logline: &str) -> Outline {
    let logline = logline.trim();

    let title = logline
        .split('.')
        .next()
        .and_then(clean)
        .unwrap_or_else(|| logline.to_string());

    let setting = between(logline, " in ", " must ")
        .and_then(clean)
        .unwrap_or_else(|| DEFAULT_SETTING.to_string());

    let challenge = logline
        .split_once(" must ")
        .and_then(|(_, rest)| clean(rest))
        .unwrap_or_else(|| DEFAULT_CHALLENGE.to_string());

    let protagonist = logline
        .strip_prefix("A ")
        .map(|rest| {
            rest.split_once(" in ")
                .or_else(|| rest.split_once(" must "))
                .map_or(rest, |(who, _)| who)
        })
        .and_then(clean)
        .unwrap_or_else(|| DEFAULT_PROTAGONIST.to_string());

    let beats = vec![
        Beat::new(
            "Setup",
            "Establish the protagonist and their normal life",
            vec![
                format!("Introduce the {} and their daily routine", protagonist),
                format!("Show the setting of {}", setting),
                format!("Introduce the task to {}", challenge),
            ],
        ),
        Beat::new(
            "Complication",
            "The protagonist faces initial obstacles",
            vec![
                format!("The {} begins to {}", protagonist, challenge),
                "Unexpected difficulties arise".to_string(),
                "The stakes become clear".to_string(),
            ],
        ),
        Beat::new(
            "Turn",
            "The protagonist confronts the main challenge",
            vec![
                "The situation becomes more dangerous".to_string(),
                format!("The {} must make a crucial decision", protagonist),
                "A revelation changes the protagonist's understanding".to_string(),
            ],
        ),
        Beat::new(
            "Resolution",
            "The story reaches its conclusion",
            vec![
                format!("The {} completes or fails their mission", protagonist),
                "The consequences of their actions become clear".to_string(),
                "The protagonist is changed by the experience".to_string(),
            ],
        ),
    ];

    Outline::new(title, setting, format!("A {}", protagonist), beats)
}

/// Decide which outline to use for a generator response.
///
/// # Errors
///
/// Returns an error only if the fallback outline cannot be serialized.
pub fn accept_outline(response: &str, logline: &str) -> TimeCapsuleResult<LoglineOutline> {
    match Outline::from_yaml_str(response) {
        Ok(outline) => {
            return Ok(LoglineOutline {
                outline,
                source: response.to_string(),
                origin: OutlineOrigin::Response,
            });
        }
        Err(e) => warn!(error = %e, "Generated outline did not parse, looking for a YAML block"),
    }

    if let Some(block) = extract_yaml_block(response) {
        match Outline::from_yaml_str(block) {
            Ok(outline) => {
                return Ok(LoglineOutline {
                    outline,
                    source: block.trim().to_string(),
                    origin: OutlineOrigin::FencedBlock,
                });
            }
            Err(e) => warn!(error = %e, "YAML block did not parse"),
        }
    }

    info!("Creating a default outline from the logline");
    let outline = fallback_outline(logline);
    let source = outline.to_yaml_string()?;
    Ok(LoglineOutline {
        outline,
        source,
        origin: OutlineOrigin::Fallback,
    })
}

/// Asks the generator for an outline matching a logline.
#[derive(Debug, Clone, Default)]
pub struct LoglineOutliner;

impl LoglineOutliner {
    /// Create an outliner.
    pub fn new() -> Self {
        Self
    }

    /// Generate and accept an outline for `logline`.
    ///
    /// # Errors
    ///
    /// Propagates generator failures. A response that does not parse is not
    /// an error; the fallback outline is used instead.
    #[instrument(skip(self, executor, instructions))]
    pub async fn outline<G: Generator>(
        &self,
        executor: &StoryExecutor<G>,
        logline: &str,
        instructions: &str,
    ) -> TimeCapsuleResult<LoglineOutline> {
        let prompt = compose_outline_request(instructions, logline);
        let response = executor.generate_once(&prompt).await?;
        let accepted = accept_outline(&response, logline)?;
        info!(origin = %accepted.origin, beats = accepted.outline.beats().len(), "Outline accepted");
        Ok(accepted)
    }
}
