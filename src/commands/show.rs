//! Show and check the site configuration

use anyhow::{bail, Result};

use crate::Showcase;

/// Print the persisted configuration document
pub fn run(showcase: &Showcase) -> Result<()> {
    let config = showcase.store.load()?;

    println!("Config: {:?}", showcase.config_path);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Validate the configuration document and the posts file
pub fn check(showcase: &Showcase) -> Result<()> {
    let mut problems = Vec::new();

    match showcase.store.load() {
        Ok(config) => match config.validate() {
            Ok(()) => println!(
                "config  ok  {:?} (theme {}, view mode {}, {} per page)",
                showcase.config_path, config.theme, config.view_mode, config.page_size
            ),
            Err(e) => problems.push(e.to_string()),
        },
        Err(e) => problems.push(e.to_string()),
    }

    match showcase.content_source() {
        Ok(source) => println!("posts   ok  {:?} ({} posts)", showcase.posts_path, source.len()),
        Err(e) => problems.push(format!("{:#}", e)),
    }

    if problems.is_empty() {
        return Ok(());
    }
    for problem in &problems {
        eprintln!("error: {}", problem);
    }
    bail!("{} problem(s) found", problems.len())
}
