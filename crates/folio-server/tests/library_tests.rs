// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the library pages.

mod common;

use axum::http::StatusCode;
use common::setup_test_app;

// ============================================================================
// Authors
// ============================================================================

#[tokio::test]
async fn add_author_form_renders() {
	let app = setup_test_app(None).await;
	let res = app.get("/add_author").await;

	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains(r#"name="birthdate""#));
	assert!(res.body.contains(r#"name="date_of_death""#));
}

#[tokio::test]
async fn add_author_then_duplicate() {
	let app = setup_test_app(None).await;

	let res = app
		.post_form(
			"/add_author",
			&[
				("name", "  Ursula K. Le Guin "),
				("birthdate", "1929-10-21"),
				("date_of_death", "2018-01-22"),
			],
		)
		.await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains("Author added successfully!"));

	let res = app.add_author("Ursula K. Le Guin").await;
	assert_eq!(res.status, StatusCode::CONFLICT);
	assert!(res.body.contains("Author &#x27;Ursula K. Le Guin&#x27; already exists."));
}

#[tokio::test]
async fn add_author_validation_keeps_input() {
	let app = setup_test_app(None).await;

	let res = app
		.post_form(
			"/add_author",
			&[
				("name", "Mary Shelley"),
				("birthdate", "1797-08-30"),
				("date_of_death", "1700-01-01"),
			],
		)
		.await;
	assert_eq!(res.status, StatusCode::BAD_REQUEST);
	assert!(res.body.contains("Date of death cannot be before birth date."));
	assert!(res.body.contains(r#"value="Mary Shelley""#));

	let res = app.post_form("/add_author", &[("birthdate", "")]).await;
	assert_eq!(res.status, StatusCode::BAD_REQUEST);
	assert!(res.body.contains("Name is required."));
}

#[tokio::test]
async fn signed_birth_year_is_a_form_error() {
	let app = setup_test_app(None).await;

	for birthdate in ["-947-06-22", "+947-06-22"] {
		let res = app
			.post_form("/add_author", &[("name", "Al-Biruni"), ("birthdate", birthdate)])
			.await;
		assert_eq!(res.status, StatusCode::BAD_REQUEST, "{birthdate}");
		assert!(res
			.body
			.contains("Birth date must be a valid date in YYYY-MM-DD format."));
	}
	let res = app.get("/authors").await;
	assert!(!res.body.contains("Al-Biruni"));
}

#[tokio::test]
async fn authors_page_lists_book_counts() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;
	app.add_author("Iain M. Banks").await;
	app.add_book("Dune", "1", "Frank Herbert", "").await;
	app.add_book("Dune Messiah", "2", "Frank Herbert", "").await;

	let res = app.get("/authors").await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains("<td>Frank Herbert</td><td></td><td>2</td>"));
	assert!(res.body.contains("<td>Iain M. Banks</td><td></td><td>0</td>"));
}

#[tokio::test]
async fn delete_author_cascades_to_books() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;
	app.add_author("Iain M. Banks").await;
	app.add_book("Dune", "1", "Frank Herbert", "").await;
	app.add_book("Excession", "2", "Iain M. Banks", "").await;

	let id = app.author_id("Frank Herbert").await;
	let res = app.post_form(&format!("/author/{id}/delete"), &[]).await;
	assert_eq!(res.status, StatusCode::SEE_OTHER);
	assert_eq!(
		res.location(),
		Some("/?message=Author+and+all+their+books+deleted+successfully%21")
	);

	let home = app.get(res.location().unwrap()).await;
	assert!(home.body.contains("Author and all their books deleted successfully!"));
	assert!(!home.body.contains(">Dune</a>"));
	assert!(home.body.contains(">Excession</a>"));
}

#[tokio::test]
async fn delete_missing_author_is_404() {
	let app = setup_test_app(None).await;
	let res = app.post_form("/author/99/delete", &[]).await;
	assert_eq!(res.status, StatusCode::NOT_FOUND);
	assert!(res.body.contains("Author 99 not found."));
}

// ============================================================================
// Books
// ============================================================================

#[tokio::test]
async fn add_book_form_lists_authors() {
	let app = setup_test_app(None).await;
	app.add_author("Octavia E. Butler").await;
	let id = app.author_id("Octavia E. Butler").await;

	let res = app.get("/add_book").await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res
		.body
		.contains(&format!(r#"<option value="{id}">Octavia E. Butler</option>"#)));
}

#[tokio::test]
async fn add_book_then_duplicate_isbn() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;

	let res = app.add_book("Dune", "9780441013593", "Frank Herbert", "9").await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains("Book added successfully!"));

	let res = app
		.add_book("Dune (reprint)", "9780441013593", "Frank Herbert", "")
		.await;
	assert_eq!(res.status, StatusCode::CONFLICT);
	assert!(res
		.body
		.contains("A book with ISBN 9780441013593 already exists."));
	assert!(res.body.contains(r#"value="Dune (reprint)""#));
}

#[tokio::test]
async fn add_book_rejects_bad_rating_and_unknown_author() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;

	let res = app.add_book("Dune", "1", "Frank Herbert", "11").await;
	assert_eq!(res.status, StatusCode::BAD_REQUEST);
	assert!(res.body.contains("Rating must be a whole number from 1 to 10."));

	let res = app
		.post_form(
			"/add_book",
			&[("title", "Ghost"), ("isbn", "2"), ("author_id", "404")],
		)
		.await;
	assert_eq!(res.status, StatusCode::BAD_REQUEST);
	assert!(res.body.contains("Author 404 does not exist."));
}

#[tokio::test]
async fn book_detail_and_404() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;
	app.add_book("Dune", "9780441013593", "Frank Herbert", "9").await;
	let id = app.book_id("9780441013593").await;

	let res = app.get(&format!("/book/{id}")).await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains("<h1>Dune</h1>"));
	assert!(res.body.contains("<dd>9780441013593</dd>"));
	assert!(res.body.contains("<dd>9/10</dd>"));

	let res = app.get("/book/12345").await;
	assert_eq!(res.status, StatusCode::NOT_FOUND);
	assert!(res.body.contains("Book 12345 not found."));
}

#[tokio::test]
async fn deleting_last_book_removes_author() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;
	app.add_book("Dune", "1", "Frank Herbert", "").await;
	let id = app.book_id("1").await;

	let res = app.post_form(&format!("/book/{id}/delete"), &[]).await;
	assert_eq!(res.status, StatusCode::SEE_OTHER);
	assert_eq!(res.location(), Some("/?message=Book+deleted+successfully%21"));

	assert!(app
		.state
		.authors
		.get_author_by_name("Frank Herbert")
		.await
		.unwrap()
		.is_none());

	let res = app.post_form(&format!("/book/{id}/delete"), &[]).await;
	assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_one_book_keeps_author_with_others() {
	let app = setup_test_app(None).await;
	app.add_author("Frank Herbert").await;
	app.add_book("Dune", "1", "Frank Herbert", "").await;
	app.add_book("Dune Messiah", "2", "Frank Herbert", "").await;
	let id = app.book_id("1").await;

	app.post_form(&format!("/book/{id}/delete"), &[]).await;

	assert!(app
		.state
		.authors
		.get_author_by_name("Frank Herbert")
		.await
		.unwrap()
		.is_some());
}

// ============================================================================
// Home: search and sort
// ============================================================================

async fn seeded() -> common::TestApp {
	let app = setup_test_app(None).await;
	app.add_author("Ursula K. Le Guin").await;
	app.add_author("Iain M. Banks").await;
	app.add_book("The Dispossessed", "1", "Ursula K. Le Guin", "10").await;
	app.add_book("Consider Phlebas", "2", "Iain M. Banks", "").await;
	app.add_book("A Wizard of Earthsea", "3", "Ursula K. Le Guin", "").await;
	app
}

fn position(body: &str, needle: &str) -> usize {
	body.find(needle)
		.unwrap_or_else(|| panic!("{needle} not in page"))
}

#[tokio::test]
async fn home_sorts_by_title_and_author() {
	let app = seeded().await;

	let res = app.get("/?sort=title").await;
	assert!(position(&res.body, ">A Wizard of Earthsea<") < position(&res.body, ">Consider Phlebas<"));
	assert!(position(&res.body, ">Consider Phlebas<") < position(&res.body, ">The Dispossessed<"));

	let res = app.get("/?sort=author").await;
	assert!(position(&res.body, ">Consider Phlebas<") < position(&res.body, ">A Wizard of Earthsea<"));
	assert!(position(&res.body, ">A Wizard of Earthsea<") < position(&res.body, ">The Dispossessed<"));
}

#[tokio::test]
async fn home_search_is_case_insensitive() {
	let app = seeded().await;

	let res = app.get("/?search=EARTHSEA").await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains(">A Wizard of Earthsea<"));
	assert!(!res.body.contains(">Consider Phlebas<"));
	assert!(res.body.contains(r#"value="EARTHSEA""#));
}

#[tokio::test]
async fn home_search_without_matches_says_so() {
	let app = seeded().await;

	let res = app.get("/?search=Neuromancer&message=ignored").await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.body.contains("No books found matching &#x27;Neuromancer&#x27;."));
	assert!(!res.body.contains("ignored"));
}

#[tokio::test]
async fn user_text_is_escaped() {
	let app = setup_test_app(None).await;
	app.add_author("<script>alert(1)</script>").await;
	app.add_book("<b>Bold</b>", "1", "<script>alert(1)</script>", "").await;

	let res = app.get("/").await;
	assert!(!res.body.contains("<script>alert(1)</script>"));
	assert!(res.body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
	assert!(res.body.contains("&lt;b&gt;Bold&lt;/b&gt;"));

	let res = app.get("/?search=%3Cimg%20src%3Dx%3E").await;
	assert!(!res.body.contains("<img src=x>"));
}

#[tokio::test]
async fn non_numeric_ids_render_404_page() {
	let app = setup_test_app(None).await;

	let res = app.get("/book/abc").await;
	assert_eq!(res.status, StatusCode::NOT_FOUND);
	assert!(res.body.contains("Page not found."));
	assert!(res.body.contains("<html"));

	for uri in ["/book/abc/delete", "/author/1x/delete"] {
		let res = app.post_form(uri, &[]).await;
		assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
		assert!(res.body.contains("Page not found."));
	}
}

#[tokio::test]
async fn unknown_route_renders_404_page() {
	let app = setup_test_app(None).await;
	let res = app.get("/nope").await;
	assert_eq!(res.status, StatusCode::NOT_FOUND);
	assert!(res.body.contains("Page not found."));
}
