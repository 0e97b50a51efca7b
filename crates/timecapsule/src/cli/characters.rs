//! Character profile listing.

use timecapsule::{CharacterLibrary, TimeCapsuleResult, WriterConfig};

/// Print the available character profiles, sorted by name.
pub fn list_characters(config: &WriterConfig) -> TimeCapsuleResult<Vec<String>> {
    let library = CharacterLibrary::new(config.paths.characters.clone());
    let names = library.list()?;

    if names.is_empty() {
        println!(
            "No character profiles found in {}",
            library.dir().display()
        );
    } else {
        println!("Available character profiles:");
        for name in &names {
            println!("  - {}", name);
        }
    }
    Ok(names)
}
