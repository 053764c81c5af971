//! After-create hooks.

use std::cell::Cell;
use std::rc::Rc;

use model_factories::prelude::*;
use model_factories_integration_tests::factories::PostFactory;
use model_factories_integration_tests::models::Post;
use rstest::*;

#[rstest]
fn test_after_hook_is_executed_when_creating_one() {
	let post = PostFactory::new()
		.after_create(|mut post: Post| {
			post.title = "This is changed in the after creating hook".to_string();
			post
		})
		.create()
		.unwrap();

	assert_eq!(post.title, "This is changed in the after creating hook");
}

#[rstest]
fn test_after_hook_is_executed_for_each_item_when_creating_many() {
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);

	let posts = PostFactory::new()
		.after_create(move |mut post: Post| {
			counter.set(counter.get() + 1);
			post.title = "After".to_string();
			post
		})
		.create_many(2)
		.unwrap();

	assert_eq!(posts.len(), 2);
	assert!(posts.iter().all(|post| post.title == "After"));
	assert_eq!(calls.get(), 2);
}

#[rstest]
fn test_hooks_run_after_bindings_in_registration_order() {
	let post = PostFactory::new()
		.after_create(|mut post: Post| {
			post.title.push_str(" first");
			post
		})
		.property("title", || "bound")
		.after_create(|mut post: Post| {
			post.title.push_str(" second");
			post
		})
		.create()
		.unwrap();

	assert_eq!(post.title, "bound first second");
}

#[rstest]
fn test_hook_is_not_run_when_create_fails() {
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);

	let result = PostFactory::new()
		.property("missing", || 1_u8)
		.after_create(move |post: Post| {
			counter.set(counter.get() + 1);
			post
		})
		.create();

	assert!(result.is_err());
	assert_eq!(calls.get(), 0);
}
