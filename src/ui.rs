// UI layer: the three interactive prompts, built with `dialoguer`.
// Validation lives in plain functions so it can be tested without a
// terminal; dialoguer shows their messages inline and asks again.

use dialoguer::{Input, Select};

use crate::error::{Error, Result};
use crate::model::{ImageSize, UserSelection};

pub const DEFAULT_COUNT: u32 = 10;
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 20;

/// Source of the user's search selection.
pub trait Prompter {
    fn prompt(&self) -> Result<UserSelection>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    /// Ask for term, count and size in that order. Each prompt blocks until
    /// it gets a valid answer; only terminal I/O failures are returned.
    fn prompt(&self) -> Result<UserSelection> {
        let term: String = Input::new()
            .with_prompt("Search term")
            .validate_with(|input: &String| validate_term(input))
            .interact_text()
            .map_err(Error::Prompt)?;

        // Non-numeric input is rejected by dialoguer's own parsing.
        let count: u32 = Input::new()
            .with_prompt(format!("How many images ({}-{})", MIN_COUNT, MAX_COUNT))
            .default(DEFAULT_COUNT)
            .validate_with(|input: &u32| validate_count(*input))
            .interact_text()
            .map_err(Error::Prompt)?;

        let sizes: Vec<&str> = ImageSize::ALL.iter().map(|s| s.as_str()).collect();
        let default_idx = ImageSize::ALL
            .iter()
            .position(|s| *s == ImageSize::default())
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Image size")
            .items(&sizes)
            .default(default_idx)
            .interact()
            .map_err(Error::Prompt)?;

        Ok(UserSelection {
            term: term.trim().to_string(),
            count,
            size: ImageSize::ALL[choice],
        })
    }
}

/// A search term must contain something other than whitespace.
pub fn validate_term(input: &str) -> Result<()> {
    if input.trim().is_empty() {
        return Err(Error::Validation("Please enter a search term".into()));
    }
    Ok(())
}

/// The API serves at most 20 results per page.
pub fn validate_count(count: u32) -> Result<()> {
    if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
        return Err(Error::Validation(format!(
            "Please enter a number between {} and {}",
            MIN_COUNT, MAX_COUNT
        )));
    }
    Ok(())
}
