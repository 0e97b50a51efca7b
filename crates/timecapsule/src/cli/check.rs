//! Anachronism check command handler.

use std::path::PathBuf;
use timecapsule::{AnachronismChecker, TimeCapsuleResult};

/// Scan `files` and print every violation. Returns the number found.
pub fn run_check(files: &[PathBuf]) -> TimeCapsuleResult<usize> {
    let checker = AnachronismChecker::new();
    let mut total = 0;

    for file in files {
        let violations = checker.check_file(file)?;
        for violation in &violations {
            println!("{}:{}: {}", file.display(), violation.line, violation.text);
        }
        total += violations.len();
    }

    if total == 0 {
        println!("No anachronisms found.");
    } else {
        tracing::warn!(count = total, files = files.len(), "Anachronisms found");
    }
    Ok(total)
}
