// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Book suggestions from a hosted language model.
//!
//! The library is summarised into a prompt, sent as a single chat completion,
//! and the markdown reply is picked apart into a title, an author and a short
//! reason. Replies that do not follow the requested shape are kept verbatim.

use async_trait::async_trait;
use folio_server_db::BookWithAuthor;
use folio_server_llm_openai::{LlmError, OpenAIClient};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

pub const SYSTEM_PROMPT: &str =
	"You are a well-read librarian. You recommend exactly one book and keep the explanation short.";

/// A parsed recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion {
	pub title: Option<String>,
	pub author: Option<String>,
	/// Prose after the title line, paragraphs separated by a blank line.
	pub reason: String,
	/// The model's reply as received.
	pub raw: String,
}

#[async_trait]
pub trait Recommender: Send + Sync {
	async fn recommend(&self, books: &[BookWithAuthor]) -> Result<Suggestion, LlmError>;
}

/// [`Recommender`] backed by an OpenAI-compatible endpoint.
pub struct OpenAiRecommender {
	client: OpenAIClient,
}

impl OpenAiRecommender {
	pub fn new(client: OpenAIClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Recommender for OpenAiRecommender {
	#[tracing::instrument(skip(self, books), fields(books = books.len(), model = %self.client.model()))]
	async fn recommend(&self, books: &[BookWithAuthor]) -> Result<Suggestion, LlmError> {
		let prompt = build_prompt(books);
		let reply = self.client.complete(SYSTEM_PROMPT, &prompt).await?;
		let suggestion = parse_suggestion(&reply);
		tracing::info!(
			title = ?suggestion.title,
			author = ?suggestion.author,
			"suggestion received"
		);
		Ok(suggestion)
	}
}

/// Describe the library and ask for one book that is not in it.
pub fn build_prompt(books: &[BookWithAuthor]) -> String {
	let mut prompt = String::from("Here are the books in my library:\n");
	for book in books {
		prompt.push_str(&format!("- \"{}\" by {}", book.title, book.author_name));
		if let Some(rating) = book.rating {
			prompt.push_str(&format!(" (rated {rating}/10)"));
		}
		prompt.push('\n');
	}
	prompt.push_str(
		"\nRecommend one book that is not on this list and that I would likely enjoy. \
		 Answer in markdown: start with the title in bold followed by \" by \" and the author, \
		 then one short paragraph explaining why it fits my taste.",
	);
	prompt
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleLine {
	Pending,
	Tail,
	Done,
}

/// Parse a markdown recommendation.
///
/// The title is the first bold span, or the first heading when nothing is
/// bold. The author is whatever follows `by` on the same line. Everything else
/// outside headings becomes the reason, with markup stripped.
pub fn parse_suggestion(markdown: &str) -> Suggestion {
	let mut title: Option<String> = None;
	let mut first_heading: Option<String> = None;
	let mut tail = String::new();
	let mut line = TitleLine::Pending;

	let mut in_strong = false;
	let mut in_heading = false;
	let mut strong_buf = String::new();
	let mut heading_buf = String::new();
	let mut block = String::new();
	let mut paragraphs: Vec<String> = Vec::new();

	for event in Parser::new(markdown) {
		match event {
			Event::Start(Tag::Strong) if title.is_none() => {
				in_strong = true;
				strong_buf.clear();
			}
			Event::End(TagEnd::Strong) if in_strong => {
				in_strong = false;
				let text = collapse_whitespace(&strong_buf);
				if !text.is_empty() {
					title = Some(text);
					line = TitleLine::Tail;
					// Lead-in such as "I recommend" belongs to the title line.
					block.clear();
				}
			}
			Event::Start(Tag::Heading { .. }) => {
				in_heading = true;
				heading_buf.clear();
			}
			Event::End(TagEnd::Heading(_)) => {
				in_heading = false;
				if first_heading.is_none() {
					let text = collapse_whitespace(&heading_buf);
					if !text.is_empty() {
						first_heading = Some(text);
					}
				}
				if line == TitleLine::Tail {
					line = TitleLine::Done;
				}
			}
			Event::Text(text) | Event::Code(text) => {
				if in_strong {
					strong_buf.push_str(&text);
				}
				if in_heading {
					heading_buf.push_str(&text);
				}
				if in_strong {
					continue;
				}
				if line == TitleLine::Tail {
					tail.push_str(&text);
				} else if !in_heading {
					block.push_str(&text);
				}
			}
			Event::SoftBreak | Event::HardBreak => {
				if line == TitleLine::Tail {
					line = TitleLine::Done;
				} else if in_strong {
					strong_buf.push(' ');
				} else {
					block.push(' ');
				}
			}
			Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::BlockQuote(_)) => {
				if line == TitleLine::Tail {
					line = TitleLine::Done;
				}
				flush_block(&mut block, &mut paragraphs);
			}
			_ => {}
		}
	}
	flush_block(&mut block, &mut paragraphs);

	let (title, author) = match title {
		Some(title) => (Some(title), author_from_tail(&tail)),
		None => match first_heading {
			Some(heading) => split_heading(&heading),
			None => (None, None),
		},
	};

	Suggestion {
		title,
		author,
		reason: paragraphs.join("\n\n"),
		raw: markdown.to_string(),
	}
}

fn flush_block(block: &mut String, paragraphs: &mut Vec<String>) {
	let text = collapse_whitespace(block);
	if !text.is_empty() {
		paragraphs.push(text);
	}
	block.clear();
}

/// `" by Frank Herbert."` -> `Frank Herbert`
fn author_from_tail(tail: &str) -> Option<String> {
	let tail = tail.trim_start_matches(|c: char| {
		c.is_whitespace() || matches!(c, ',' | ':' | '-' | '\u{2013}' | '\u{2014}')
	});
	let rest = strip_prefix_ignore_case(tail, "by ")?;
	let rest = cut_at_separator(rest);
	let author = rest
		.trim()
		.trim_end_matches(|c: char| matches!(c, '.' | ',' | ':' | ';' | '!'))
		.trim();
	(!author.is_empty()).then(|| author.to_string())
}

/// Heading fallback: `Dune by Frank Herbert` splits on the last ` by `.
fn split_heading(heading: &str) -> (Option<String>, Option<String>) {
	// ASCII folding keeps byte offsets valid in `heading`.
	let lower = heading.to_ascii_lowercase();
	if let Some(idx) = lower.rfind(" by ") {
		let title = heading[..idx].trim();
		let author = heading[idx + 4..].trim();
		if !title.is_empty() && !author.is_empty() {
			return (Some(title.to_string()), Some(author.to_string()));
		}
	}
	(Some(heading.to_string()), None)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
	let head = s.get(..prefix.len())?;
	head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn cut_at_separator(s: &str) -> &str {
	[" - ", " \u{2013} ", " \u{2014} ", " (", ": "]
		.iter()
		.filter_map(|sep| s.find(sep))
		.min()
		.map_or(s, |idx| &s[..idx])
}

fn collapse_whitespace(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}
