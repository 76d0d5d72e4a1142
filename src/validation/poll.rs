//! Poll form validator
//!
//! The poll is entered as three loose form fields (title, items as one text
//! block, ending date), so the rules span several fields and are evaluated in
//! full: every violated rule is reported on its field.

use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Format of the ending date field, e.g. `31-12-2030`
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub const POLL_TITLE_FIELD: &str = "poll_title";
pub const POLL_ITEMS_FIELD: &str = "poll_items";
pub const ENDING_DATE_FIELD: &str = "ending_date";

/// Raw poll fields of a form
#[derive(Debug, Clone, Copy, Default)]
pub struct PollForm<'a> {
    pub title: Option<&'a str>,
    pub items: Option<&'a str>,
    pub ending_date: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollValidator {
    pub min_items: usize,
    pub max_items: usize,
    pub min_item_length: usize,
    pub max_item_length: usize,
}

impl Default for PollValidator {
    fn default() -> Self {
        Self {
            min_items: 2,
            max_items: 50,
            min_item_length: 1,
            max_item_length: 50,
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Splits the items block into one item per non-blank line
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a `dd-MM-yyyy` date as midnight UTC of that day
pub fn parse_ending_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

impl PollValidator {
    pub fn validate(&self, form: &PollForm<'_>, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title_blank = is_blank(form.title);
        let items_blank = is_blank(form.items);
        let items = match form.items {
            Some(text) if !items_blank => parse_items(text),
            _ => Vec::new(),
        };

        // without a title no poll gets created, the item count is irrelevant
        if !title_blank
            && (items_blank || !(self.min_items..=self.max_items).contains(&items.len()))
        {
            errors.add(
                POLL_ITEMS_FIELD,
                violation(
                    "VotingOptionsNumber",
                    "The number of poll items is out of the allowed range",
                ),
            );
        }

        if let Some(text) = form.ending_date.filter(|text| !text.trim().is_empty()) {
            match parse_ending_date(text) {
                None => errors.add(
                    ENDING_DATE_FIELD,
                    violation("DateFormat", "Ending date must be formatted as dd-MM-yyyy"),
                ),
                Some(date) if date <= now => errors.add(
                    ENDING_DATE_FIELD,
                    violation("Future", "Ending date must be in the future"),
                ),
                Some(_) => {}
            }
        }

        if !title_blank && items_blank {
            errors.add(
                POLL_ITEMS_FIELD,
                violation(
                    "PollItemsNotBlankIfPollTitleNotBlank",
                    "Poll items are required when the poll has a title",
                ),
            );
        }
        if title_blank && !items_blank {
            errors.add(
                POLL_TITLE_FIELD,
                violation(
                    "PollTitleNotBlankIfPollItemsNotBlank",
                    "Poll title is required when poll items are given",
                ),
            );
        }

        for item in &items {
            let length = item.chars().count();
            if length < self.min_item_length || length > self.max_item_length {
                errors.add(
                    POLL_ITEMS_FIELD,
                    violation("VotingItemLength", "Poll item length is out of the allowed range"),
                );
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
