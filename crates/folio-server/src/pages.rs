// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server-rendered HTML.
//!
//! Pages are assembled with `format!`. Every value that came from a user or
//! from the language model goes through [`escape_html`] first.


use axum::http::StatusCode;
use folio_server_db::{Author, AuthorSummary, BookSort, BookWithAuthor};

use crate::suggest::Suggestion;
use crate::validation::{AuthorForm, BookForm, MAX_ISBN_LEN, MAX_NAME_LEN, MAX_TITLE_LEN};

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}

/// `/` with the given query parameters, blank ones omitted.
pub fn home_href(search: Option<&str>, sort: BookSort, message: Option<&str>) -> String {
	let mut query = url::form_urlencoded::Serializer::new(String::new());
	if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
		query.append_pair("search", search);
	}
	if let Some(sort) = sort.as_param() {
		query.append_pair("sort", sort);
	}
	if let Some(message) = message {
		query.append_pair("message", message);
	}
	let query = query.finish();
	if query.is_empty() {
		"/".to_string()
	} else {
		format!("/?{query}")
	}
}

fn layout(title: &str, message: Option<&str>, body: &str) -> String {
	let message = message
		.map(|m| format!("<p class=\"message\">{}</p>\n", escape_html(m)))
		.unwrap_or_default();

	format!(
		r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Folio</title>
</head>
<body>
<header>
<nav>
<a href="/">Library</a>
<a href="/authors">Authors</a>
<a href="/add_author">Add author</a>
<a href="/add_book">Add book</a>
<a href="/suggest">Suggest a book</a>
</nav>
</header>
<main>
<h1>{title}</h1>
{message}{body}
</main>
</body>
</html>
"#,
		title = escape_html(title),
	)
}

fn rating_text(rating: Option<i64>) -> String {
	rating.map(|r| format!("{r}/10")).unwrap_or_default()
}

fn year_text(year: Option<i64>) -> String {
	year.map(|y| y.to_string()).unwrap_or_default()
}

fn life_span(born: Option<&str>, died: Option<&str>) -> Option<String> {
	match (born, died) {
		(None, None) => None,
		(Some(b), None) => Some(format!("born {b}")),
		(None, Some(d)) => Some(format!("died {d}")),
		(Some(b), Some(d)) => Some(format!("{b} to {d}")),
	}
}

/// Input to [`home_page`].
#[derive(Debug)]
pub struct HomeView<'a> {
	pub books: &'a [BookWithAuthor],
	pub search: Option<&'a str>,
	pub sort: BookSort,
	pub message: Option<&'a str>,
}

pub fn home_page(view: &HomeView<'_>) -> String {
	let search = view.search.unwrap_or_default();
	let mut body = String::new();

	body.push_str(&format!(
		r#"<form method="get" action="/" class="search">
<input type="search" name="search" value="{search}" placeholder="Search titles">
<select name="sort">
<option value=""{id_sel}>Date added</option>
<option value="title"{title_sel}>Title</option>
<option value="author"{author_sel}>Author</option>
</select>
<button type="submit">Search</button>
</form>
"#,
		search = escape_html(search),
		id_sel = selected(view.sort == BookSort::Id),
		title_sel = selected(view.sort == BookSort::Title),
		author_sel = selected(view.sort == BookSort::Author),
	));

	body.push_str(&format!(
		r#"<p class="sort">Sort by: <a href="{}">title</a> | <a href="{}">author</a></p>
"#,
		escape_html(&home_href(view.search, BookSort::Title, None)),
		escape_html(&home_href(view.search, BookSort::Author, None)),
	));

	if view.books.is_empty() {
		if view.search.map_or(true, |s| s.trim().is_empty()) {
			body.push_str("<p>No books in the library yet. <a href=\"/add_book\">Add one</a>.</p>\n");
		}
		return layout("Library", view.message, &body);
	}

	body.push_str(
		"<table class=\"books\">\n<thead><tr><th>Title</th><th>Author</th><th>Year</th><th>Rating</th><th></th></tr></thead>\n<tbody>\n",
	);
	for book in view.books {
		body.push_str(&format!(
			r#"<tr><td><a href="/book/{id}">{title}</a></td><td>{author}</td><td>{year}</td><td>{rating}</td><td><form method="post" action="/book/{id}/delete"><button type="submit">Delete</button></form></td></tr>
"#,
			id = book.id,
			title = escape_html(&book.title),
			author = escape_html(&book.author_name),
			year = year_text(book.publication_year),
			rating = rating_text(book.rating),
		));
	}
	body.push_str("</tbody>\n</table>\n");

	layout("Library", view.message, &body)
}

fn selected(on: bool) -> &'static str {
	if on {
		" selected"
	} else {
		""
	}
}

pub fn add_author_page(form: &AuthorForm, message: Option<&str>) -> String {
	let body = format!(
		r#"<form method="post" action="/add_author">
<label>Name <input type="text" name="name" value="{name}" maxlength="{max_name}" required></label>
<label>Birth date <input type="date" name="birthdate" value="{birthdate}"></label>
<label>Date of death <input type="date" name="date_of_death" value="{date_of_death}"></label>
<button type="submit">Add author</button>
</form>
"#,
		name = escape_html(&form.name),
		max_name = MAX_NAME_LEN,
		birthdate = escape_html(&form.birthdate),
		date_of_death = escape_html(&form.date_of_death),
	);
	layout("Add author", message, &body)
}

pub fn add_book_page(authors: &[Author], form: &BookForm, message: Option<&str>) -> String {
	let mut options = String::from("<option value=\"\">Choose an author</option>\n");
	for author in authors {
		let id = author.id.to_string();
		options.push_str(&format!(
			r#"<option value="{id}"{sel}>{name}</option>
"#,
			sel = selected(form.author_id.trim() == id),
			name = escape_html(&author.name),
		));
	}

	let mut body = String::new();
	if authors.is_empty() {
		body.push_str("<p>Add an <a href=\"/add_author\">author</a> before adding books.</p>\n");
	}
	body.push_str(&format!(
		r#"<form method="post" action="/add_book">
<label>Title <input type="text" name="title" value="{title}" maxlength="{max_title}" required></label>
<label>ISBN <input type="text" name="isbn" value="{isbn}" maxlength="{max_isbn}" required></label>
<label>Publication year <input type="number" name="publication_year" value="{year}"></label>
<label>Rating <input type="number" name="rating" min="1" max="10" value="{rating}"></label>
<label>Author <select name="author_id" required>
{options}</select></label>
<button type="submit">Add book</button>
</form>
"#,
		title = escape_html(&form.title),
		max_title = MAX_TITLE_LEN,
		isbn = escape_html(&form.isbn),
		max_isbn = MAX_ISBN_LEN,
		year = escape_html(&form.publication_year),
		rating = escape_html(&form.rating),
	));
	layout("Add book", message, &body)
}

pub fn book_detail_page(book: &BookWithAuthor) -> String {
	let mut body = String::from("<dl class=\"book\">\n");
	body.push_str(&format!("<dt>Author</dt><dd>{}</dd>\n", escape_html(&book.author_name)));
	if let Some(span) = life_span(
		book.author_birth_date.as_deref(),
		book.author_date_of_death.as_deref(),
	) {
		body.push_str(&format!("<dt>Lived</dt><dd>{}</dd>\n", escape_html(&span)));
	}
	body.push_str(&format!("<dt>ISBN</dt><dd>{}</dd>\n", escape_html(&book.isbn)));
	if book.publication_year.is_some() {
		body.push_str(&format!(
			"<dt>Published</dt><dd>{}</dd>\n",
			year_text(book.publication_year)
		));
	}
	if book.rating.is_some() {
		body.push_str(&format!("<dt>Rating</dt><dd>{}</dd>\n", rating_text(book.rating)));
	}
	body.push_str("</dl>\n");
	body.push_str(&format!(
		r#"<form method="post" action="/book/{}/delete"><button type="submit">Delete book</button></form>
"#,
		book.id
	));
	body.push_str("<p><a href=\"/\">Back to the library</a></p>\n");

	layout(&book.title, None, &body)
}

pub fn authors_page(authors: &[AuthorSummary], message: Option<&str>) -> String {
	if authors.is_empty() {
		return layout(
			"Authors",
			message,
			"<p>No authors yet. <a href=\"/add_author\">Add one</a>.</p>\n",
		);
	}

	let mut body = String::from(
		"<table class=\"authors\">\n<thead><tr><th>Name</th><th>Lived</th><th>Books</th><th></th></tr></thead>\n<tbody>\n",
	);
	for author in authors {
		let span = life_span(author.birth_date.as_deref(), author.date_of_death.as_deref())
			.unwrap_or_default();
		body.push_str(&format!(
			r#"<tr><td>{name}</td><td>{span}</td><td>{count}</td><td><form method="post" action="/author/{id}/delete"><button type="submit">Delete author and books</button></form></td></tr>
"#,
			name = escape_html(&author.name),
			span = escape_html(&span),
			count = author.book_count,
			id = author.id,
		));
	}
	body.push_str("</tbody>\n</table>\n");
	layout("Authors", message, &body)
}

/// What the suggestion page has to show.
#[derive(Debug)]
pub enum SuggestView<'a> {
	EmptyLibrary,
	NotConfigured,
	Ready(&'a Suggestion),
	Failed(&'a str),
}

pub const EMPTY_LIBRARY_MESSAGE: &str = "Add some books to get a recommendation.";
pub const NOT_CONFIGURED_MESSAGE: &str = "AI suggestions are not configured.";

pub fn suggest_page(view: &SuggestView<'_>) -> String {
	match view {
		SuggestView::EmptyLibrary => layout("Suggest a book", Some(EMPTY_LIBRARY_MESSAGE), ""),
		SuggestView::NotConfigured => layout("Suggest a book", Some(NOT_CONFIGURED_MESSAGE), ""),
		SuggestView::Failed(reason) => layout(
			"Suggest a book",
			Some("Could not get a suggestion right now. Please try again later."),
			&format!("<p class=\"error\">{}</p>\n", escape_html(reason)),
		),
		SuggestView::Ready(suggestion) => {
			let mut body = String::new();
			match &suggestion.title {
				Some(title) => {
					body.push_str(&format!("<h2 class=\"suggestion\">{}", escape_html(title)));
					if let Some(author) = &suggestion.author {
						body.push_str(&format!(" <small>by {}</small>", escape_html(author)));
					}
					body.push_str("</h2>\n");
					for paragraph in suggestion.reason.split("\n\n").filter(|p| !p.is_empty()) {
						body.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
					}
				}
				None => {
					body.push_str(&format!(
						"<pre class=\"suggestion\">{}</pre>\n",
						escape_html(&suggestion.raw)
					));
				}
			}
			body.push_str("<p><a href=\"/suggest\">Suggest another</a></p>\n");
			layout("Suggest a book", None, &body)
		}
	}
}

pub fn error_page(status: StatusCode, message: &str) -> String {
	let title = status.canonical_reason().unwrap_or("Error");
	let body = format!(
		"<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the library</a></p>\n",
		escape_html(message)
	);
	layout(title, None, &body)
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_server_db::{AuthorId, BookId};
	use proptest::prelude::*;

	fn dune() -> BookWithAuthor {
		BookWithAuthor {
			id: BookId(3),
			isbn: "9780441013593".to_string(),
			title: "Dune".to_string(),
			publication_year: Some(1965),
			rating: Some(9),
			author_id: AuthorId(1),
			author_name: "Frank Herbert".to_string(),
			author_birth_date: Some("1920-10-08".to_string()),
			author_date_of_death: Some("1986-02-11".to_string()),
		}
	}

	#[test]
	fn escapes_markup() {
		assert_eq!(
			escape_html(r#"<script>alert("x&y")</script>'"#),
			"&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;&#x27;"
		);
	}

	#[test]
	fn home_href_encodes_and_skips_blanks() {
		assert_eq!(home_href(None, BookSort::Id, None), "/");
		assert_eq!(home_href(Some("  "), BookSort::Title, None), "/?sort=title");
		assert_eq!(
			home_href(Some("war & peace"), BookSort::Author, Some("Book deleted successfully!")),
			"/?search=war+%26+peace&sort=author&message=Book+deleted+successfully%21"
		);
	}

	#[test]
	fn home_lists_books_with_links() {
		let books = [dune()];
		let html = home_page(&HomeView {
			books: &books,
			search: None,
			sort: BookSort::Title,
			message: Some("Book added successfully!"),
		});
		assert!(html.contains(r#"<a href="/book/3">Dune</a>"#));
		assert!(html.contains("<td>Frank Herbert</td>"));
		assert!(html.contains("<td>9/10</td>"));
		assert!(html.contains(r#"action="/book/3/delete""#));
		assert!(html.contains(r#"<p class="message">Book added successfully!</p>"#));
		assert!(html.contains(r#"<option value="title" selected>"#));
	}

	#[test]
	fn empty_library_hint_only_without_search() {
		let html = home_page(&HomeView {
			books: &[],
			search: None,
			sort: BookSort::Id,
			message: None,
		});
		assert!(html.contains("No books in the library yet."));

		let html = home_page(&HomeView {
			books: &[],
			search: Some("zzz"),
			sort: BookSort::Id,
			message: Some("No books found matching 'zzz'."),
		});
		assert!(!html.contains("No books in the library yet."));
		assert!(html.contains("No books found matching &#x27;zzz&#x27;."));
	}

	#[test]
	fn detail_shows_author_life_span() {
		let html = book_detail_page(&dune());
		assert!(html.contains("<title>Dune - Folio</title>"));
		assert!(html.contains("<dd>1920-10-08 to 1986-02-11</dd>"));
		assert!(html.contains("<dd>1965</dd>"));
	}

	#[test]
	fn book_form_keeps_selected_author() {
		let authors = [Author {
			id: AuthorId(7),
			name: "Ada <Lovelace>".to_string(),
			birth_date: None,
			date_of_death: None,
		}];
		let form = BookForm {
			author_id: "7".to_string(),
			..Default::default()
		};
		let html = add_book_page(&authors, &form, None);
		assert!(html.contains(r#"<option value="7" selected>Ada &lt;Lovelace&gt;</option>"#));
	}

	#[test]
	fn detail_rows_are_one_per_line() {
		let html = book_detail_page(&dune());
		assert!(html.contains(
			"<dt>Author</dt><dd>Frank Herbert</dd>\n<dt>Lived</dt><dd>1920-10-08 to 1986-02-11</dd>\n<dt>ISBN</dt><dd>9780441013593</dd>\n"
		));
		assert!(html.contains(
			"</dl>\n<form method=\"post\" action=\"/book/3/delete\"><button type=\"submit\">Delete book</button></form>\n"
		));
	}

	#[test]
	fn parsed_suggestion_renders_title_author_and_reason() {
		let suggestion = Suggestion {
			title: Some("Hyperion".to_string()),
			author: Some("Dan Simmons".to_string()),
			reason: "Pilgrims.\n\nTime tombs & <shrikes>.".to_string(),
			raw: String::new(),
		};
		let html = suggest_page(&SuggestView::Ready(&suggestion));
		assert!(html.contains(
			"<h2 class=\"suggestion\">Hyperion <small>by Dan Simmons</small></h2>\n<p>Pilgrims.</p>\n<p>Time tombs &amp; &lt;shrikes&gt;.</p>\n"
		));
	}

	#[test]
	fn unparsed_suggestion_is_shown_raw() {
		let suggestion = Suggestion {
			raw: "Try <b>anything</b> by Le Guin".to_string(),
			reason: "Try anything by Le Guin".to_string(),
			..Default::default()
		};
		let html = suggest_page(&SuggestView::Ready(&suggestion));
		assert!(html.contains("<pre class=\"suggestion\">Try &lt;b&gt;anything&lt;/b&gt; by Le Guin</pre>"));
	}

	#[test]
	fn error_page_uses_reason_phrase() {
		let html = error_page(StatusCode::NOT_FOUND, "Book 9 not found.");
		assert!(html.contains("<h1>Not Found</h1>"));
		assert!(html.contains("Book 9 not found."));
	}

	proptest! {
		#[test]
		fn escaped_text_has_no_raw_markup(input in ".{0,64}") {
			let escaped = escape_html(&input);
			prop_assert!(!escaped.contains('<'));
			prop_assert!(!escaped.contains('>'));
			prop_assert!(!escaped.contains('"'));
			prop_assert!(!escaped.contains('\''));
		}
	}
}
