//! Recycled instances across factory graphs.

use std::sync::Arc;

use model_factories::prelude::*;
use model_factories_integration_tests::factories::{
	AuthorFactory, BlogFactory, CommentFactory, PostFactory, PostWithManyCommentsFactory,
	SharedAuthorPostFactory,
};
use model_factories_integration_tests::models::Author;
use rstest::*;

#[fixture]
fn author() -> Author {
	AuthorFactory::new()
		.property_value("name", "::recycled::")
		.create()
		.unwrap()
}

#[rstest]
fn test_it_recycles_value(author: Author) {
	let post = PostFactory::new().recycle(author.clone()).create().unwrap();

	assert_eq!(post.author, Some(author));
}

#[rstest]
fn test_recycling_is_transitive(author: Author) {
	let blog = BlogFactory::new()
		.recycle(author.clone())
		.with_many::<PostFactory>("posts", 3)
		.create()
		.unwrap();

	assert_eq!(blog.posts.len(), 3);
	assert!(blog.posts.iter().all(|post| post.author.as_ref() == Some(&author)));
}

#[rstest]
fn test_recycling_reaches_configured_children(author: Author) {
	let post = PostWithManyCommentsFactory::new()
		.recycle(author.clone())
		.with_many_configured::<CommentFactory, _>("comments", 2, |factory| {
			factory.with_author()
		})
		.create()
		.unwrap();

	assert!(
		post.comments
			.iter()
			.all(|comment| comment.author.as_ref() == Some(&author))
	);
}

#[rstest]
fn test_recycling_inside_related_callback_stays_in_that_subtree(author: Author) {
	let factory = BlogFactory::new()
		.with_using::<PostFactory, _>("featured", move |factory: PostFactory| {
			factory.recycle(author.clone()).create()
		})
		.with_many::<PostFactory>("posts", 2);

	let blog = factory.create().unwrap();

	let featured = blog.featured.unwrap();
	assert_eq!(featured.author.unwrap().name, "::recycled::");
	assert_eq!(blog.posts.len(), 2);
	for post in &blog.posts {
		assert_eq!(post.author.as_ref().unwrap().name, "foo");
	}
	assert_eq!(factory.recycled_count(), 0);
}

#[rstest]
fn test_first_recycled_instance_wins(author: Author) {
	let other = Author {
		name: "::other::".to_string(),
		..author.clone()
	};

	let post = PostFactory::new()
		.recycle(author.clone())
		.recycle(other)
		.create()
		.unwrap();

	assert_eq!(post.author.unwrap().name, "::recycled::");
}

#[rstest]
fn test_recycled_instance_overrides_explicit_property(author: Author) {
	let post = PostFactory::new()
		.property("author", || None::<Author>)
		.recycle(author.clone())
		.create()
		.unwrap();

	assert_eq!(post.author, Some(author));
}

#[rstest]
fn test_recycled_shared_instance_keeps_identity() {
	let shared = Arc::new(Author::default());

	let posts = SharedAuthorPostFactory::new()
		.recycle(Arc::clone(&shared))
		.create_many(2)
		.unwrap();

	for post in &posts {
		assert!(Arc::ptr_eq(&shared, post.author.as_ref().unwrap()));
	}
}

#[rstest]
fn test_try_recycle_rejects_missing_instance() {
	let result = PostFactory::new().try_recycle::<Author>(None);

	assert!(matches!(
		result,
		Err(FactoryError::NullRecycledInstance(ref name)) if name.ends_with("Author")
	));
}

#[rstest]
fn test_try_recycle_accepts_instance(author: Author) {
	let factory = PostFactory::new().try_recycle(Some(author)).unwrap();

	assert_eq!(factory.recycled_count(), 1);
}
