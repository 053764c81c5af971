//! Related factories, explicit and resolved through the factory map.

use model_factories::prelude::*;
use model_factories::{clear_factory_map, discover_in_module, map_factory};
use model_factories_integration_tests::factories::{AuthorFactory, MODULE, PostFactory};
use model_factories_integration_tests::models::{Author, Post};
use rstest::*;
use serial_test::serial;

#[fixture]
fn empty_factory_map() {
	clear_factory_map();
}

#[rstest]
fn test_it_creates_related_models_using_factory() {
	let post = PostFactory::new()
		.with::<AuthorFactory>("author")
		.create()
		.unwrap();

	let author = post.author.expect("author should be created");
	assert_eq!(author.name, "foo");
}

#[rstest]
fn test_it_creates_related_models_using_factory_with_state() {
	let post = PostFactory::new()
		.with_using::<AuthorFactory, _>("author", |factory| {
			factory.property("name", || "::author name::").create()
		})
		.create()
		.unwrap();

	assert_eq!(post.author.unwrap().name, "::author name::");
}

#[rstest]
fn test_it_creates_related_models_for_all_when_creating_many() {
	let posts: Vec<Post> = PostFactory::new()
		.with_using::<AuthorFactory, _>("author", |factory| {
			factory.property("name", || "::author name::").create()
		})
		.create_many(2)
		.unwrap();

	assert_eq!(posts.len(), 2);
	for post in &posts {
		assert_eq!(post.author.as_ref().unwrap().name, "::author name::");
	}
	assert_ne!(
		posts[0].author.as_ref().unwrap().id,
		posts[1].author.as_ref().unwrap().id
	);
}

#[rstest]
fn test_it_can_override_related_with_property() {
	let factory = PostFactory::new().property("author", || None::<Author>);

	assert_eq!(factory.binding_kind("author"), Some(BindingKind::Plain));
	assert!(factory.create().unwrap().author.is_none());
}

#[rstest]
fn test_property_can_be_rebound_as_related() {
	let factory = PostFactory::new()
		.property("author", || None::<Author>)
		.with::<AuthorFactory>("author");

	assert_eq!(factory.binding_kind("author"), Some(BindingKind::Related));
	assert!(factory.create().unwrap().author.is_some());
}

#[rstest]
#[serial(factory_map)]
fn test_it_can_use_simple_with_syntax_when_factories_are_mapped(
	#[from(empty_factory_map)] _map: (),
) {
	discover_in_module(MODULE);

	let post = PostFactory::new()
		.with_registered::<Author>("author")
		.create()
		.unwrap();

	assert_eq!(post.author.unwrap().name, "foo");
}

#[rstest]
#[serial(factory_map)]
fn test_it_can_use_simple_with_syntax_with_callback_when_factories_are_mapped(
	#[from(empty_factory_map)] _map: (),
) {
	discover_in_module(MODULE);

	let post = PostFactory::new()
		.with_registered_using::<Author, _>("author", |factory| {
			factory.property("name", || "::author name::").create()
		})
		.create()
		.unwrap();

	assert_eq!(post.author.unwrap().name, "::author name::");
}

#[rstest]
#[serial(factory_map)]
fn test_registered_relation_fails_when_unmapped(#[from(empty_factory_map)] _map: ()) {
	let factory = PostFactory::new().with_registered::<Author>("author");

	assert_eq!(
		factory.create().unwrap_err(),
		FactoryError::FactoryNotFound("Author".to_string())
	);
}

#[rstest]
#[serial(factory_map)]
fn test_registered_relation_is_resolved_lazily(#[from(empty_factory_map)] _map: ()) {
	let factory = PostFactory::new().with_registered::<Author>("author");
	assert!(factory.create().is_err());

	map_factory::<Author, AuthorFactory>();

	assert!(factory.create().unwrap().author.is_some());
	clear_factory_map();
}

#[rstest]
fn test_nested_failure_aborts_outer_create() {
	let result = PostFactory::new()
		.with_using::<AuthorFactory, _>("author", |factory| {
			factory.property("not_writable", || "x").create()
		})
		.create();

	assert!(matches!(
		result,
		Err(FactoryError::ReadOnlyProperty { ref model, .. }) if model == "Author"
	));
}
