// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Form payloads and their validation.
//!
//! Every field is optional at the deserialization layer so that a missing
//! field produces a readable message on the re-rendered form instead of a bare
//! 422 from the extractor.

use chrono::NaiveDate;
use folio_server_db::{AuthorId, NewAuthor, NewBook};
use serde::Deserialize;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_ISBN_LEN: usize = 20;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("{0} is required.")]
	Required(&'static str),

	#[error("{field} must be at most {max} characters.")]
	TooLong { field: &'static str, max: usize },

	#[error("{0} must be a valid date in YYYY-MM-DD format.")]
	InvalidDate(&'static str),

	#[error("Date of death cannot be before birth date.")]
	DeathBeforeBirth,

	#[error("Publication year must be a whole number.")]
	InvalidYear,

	#[error("Rating must be a whole number from 1 to 10.")]
	InvalidRating,

	#[error("Please choose an author.")]
	MissingAuthor,
}

/// Fields posted by the add-author form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorForm {
	pub name: String,
	pub birthdate: String,
	pub date_of_death: String,
}

/// Fields posted by the add-book form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
	pub title: String,
	pub isbn: String,
	pub publication_year: String,
	pub rating: String,
	pub author_id: String,
}

impl AuthorForm {
	pub fn validate(&self) -> Result<NewAuthor, ValidationError> {
		let name = required("Name", &self.name, MAX_NAME_LEN)?;
		let birth_date = optional_date("Birth date", &self.birthdate)?;
		let date_of_death = optional_date("Date of death", &self.date_of_death)?;

		if let (Some(born), Some(died)) = (birth_date, date_of_death) {
			if died < born {
				return Err(ValidationError::DeathBeforeBirth);
			}
		}

		Ok(NewAuthor {
			name,
			birth_date: birth_date.map(|d| d.format(DATE_FORMAT).to_string()),
			date_of_death: date_of_death.map(|d| d.format(DATE_FORMAT).to_string()),
		})
	}
}

impl BookForm {
	pub fn validate(&self) -> Result<NewBook, ValidationError> {
		let title = required("Title", &self.title, MAX_TITLE_LEN)?;
		let isbn = required("ISBN", &self.isbn, MAX_ISBN_LEN)?;

		let publication_year = match self.publication_year.trim() {
			"" => None,
			s => Some(s.parse::<i64>().map_err(|_| ValidationError::InvalidYear)?),
		};

		let rating = match self.rating.trim() {
			"" => None,
			s => {
				let rating = s.parse::<i64>().map_err(|_| ValidationError::InvalidRating)?;
				if !(MIN_RATING..=MAX_RATING).contains(&rating) {
					return Err(ValidationError::InvalidRating);
				}
				Some(rating)
			}
		};

		let author_id = self
			.author_id
			.trim()
			.parse::<i64>()
			.map(AuthorId)
			.map_err(|_| ValidationError::MissingAuthor)?;

		Ok(NewBook {
			isbn,
			title,
			publication_year,
			rating,
			author_id,
		})
	}
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(ValidationError::Required(field));
	}
	if value.chars().count() > max {
		return Err(ValidationError::TooLong { field, max });
	}
	Ok(value.to_string())
}

/// Blank means absent. Anything else must be a real calendar date written as
/// exactly `YYYY-MM-DD`.
fn optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
	let value = value.trim();
	if value.is_empty() {
		return Ok(None);
	}
	let well_formed = value.len() == 10
		&& value.bytes().enumerate().all(|(i, b)| match i {
			4 | 7 => b == b'-',
			_ => b.is_ascii_digit(),
		});
	if !well_formed {
		return Err(ValidationError::InvalidDate(field));
	}
	NaiveDate::parse_from_str(value, DATE_FORMAT)
		.map(Some)
		.map_err(|_| ValidationError::InvalidDate(field))
}
