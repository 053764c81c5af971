//! Collection-valued related factories.

use model_factories::prelude::*;
use model_factories_integration_tests::factories::{
	BlogFactory, CommentFactory, PostFactory, PostWithManyCommentsFactory, post_definitions_run,
};
use model_factories_integration_tests::models::Comment;
use rstest::*;

#[rstest]
fn test_it_creates_many_related() {
	let post = PostWithManyCommentsFactory::new()
		.with_many::<CommentFactory>("comments", 2)
		.create()
		.unwrap();

	assert_eq!(post.title, "::post title::");
	assert_eq!(post.comments.len(), 2);
	for comment in &post.comments {
		assert_eq!(comment.text, "Some text");
		assert_eq!(comment.updated_at, Some(comment.created_at));
	}
}

#[rstest]
fn test_with_many_zero_yields_empty_list() {
	let post = PostWithManyCommentsFactory::new()
		.with_many::<CommentFactory>("comments", 0)
		.create()
		.unwrap();

	assert!(post.comments.is_empty());
}

#[rstest]
fn test_with_many_callback_customizes_items() {
	let post = PostWithManyCommentsFactory::new()
		.with_many_using::<CommentFactory, _>("comments", |factory| {
			let mut comments = factory.create_many(2)?;
			comments[1].text = "::second::".to_string();
			Ok(comments)
		})
		.create()
		.unwrap();

	let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
	assert_eq!(texts, vec!["Some text", "::second::"]);
}

#[rstest]
fn test_with_many_configured_applies_count_after_configuration() {
	let blog = BlogFactory::new()
		.with_many_configured::<PostFactory, _>("posts", 3, |factory| factory.with_foo_title())
		.create()
		.unwrap();

	assert_eq!(blog.name, "Le Blog");
	assert_eq!(blog.posts.len(), 3);
	assert!(blog.posts.iter().all(|post| post.title == "foo"));
}

#[rstest]
fn test_many_related_binding_kind() {
	let factory = BlogFactory::new().with_many::<PostFactory>("posts", 1);

	assert_eq!(factory.binding_kind("posts"), Some(BindingKind::ManyRelated));
}

#[rstest]
fn test_definition_runs_once_per_factory() {
	let first = PostWithManyCommentsFactory::new();
	let second = PostWithManyCommentsFactory::new();

	let from_first = first.create_many(2).unwrap();
	let from_second = second.create().unwrap();

	assert_eq!(from_first[0].id, from_first[1].id);
	assert_ne!(from_first[0].id, from_second.id);
	assert!(post_definitions_run() >= 2);
}

#[rstest]
fn test_recycled_element_does_not_replace_collections() {
	let recycled = Comment {
		text: "::recycled::".to_string(),
		..Comment::default()
	};

	let post = PostWithManyCommentsFactory::new()
		.recycle(recycled)
		.with_many::<CommentFactory>("comments", 2)
		.create()
		.unwrap();

	assert_eq!(post.comments.len(), 2);
	assert!(post.comments.iter().all(|c| c.text == "Some text"));
}
