//! Generated values in factory definitions: fake data, sequences, seeding.

use model_factories::prelude::*;
use model_factories::reset_sequences;
use model_factories_integration_tests::factories::{AuthorFactory, ModelWithRandomValueFactory};
use model_factories_integration_tests::models::Author;
use rstest::*;
use serial_test::serial;

#[rstest]
fn test_random_values_differ_between_models() {
	let models = ModelWithRandomValueFactory::new().create_many(10).unwrap();

	let first = models[0].value;
	assert!(models.iter().any(|model| model.value != first));
}

#[rstest]
fn test_seeded_config_reproduces_models() {
	let config = FactoryConfig::new().with_seed(1234);

	config.apply();
	let first = ModelWithRandomValueFactory::new().create_many(3).unwrap();
	config.apply();
	let second = ModelWithRandomValueFactory::new().create_many(3).unwrap();

	assert_eq!(first, second);
}

#[rstest]
fn test_faker_values_fill_properties() {
	let author = AuthorFactory::new()
		.property("name", || FakerType::Name.generate())
		.create()
		.unwrap();

	assert!(!author.name.is_empty());
	assert_ne!(author.name, "foo");
}

#[rstest]
fn test_generated_uuid_and_text_fill_properties() {
	let author = AuthorFactory::new()
		.property("id", model_factories::faker::fake_uuid)
		.property("name", generate_fake::<String>)
		.create()
		.unwrap();

	assert!(!author.id.is_nil());
	assert_ne!(author.name, "foo");
}

#[rstest]
#[serial(sequences)]
fn test_sequence_numbers_models() {
	reset_sequences();

	let authors: Vec<Author> = AuthorFactory::new()
		.property("name", || sequence("author_name", "author_{n}"))
		.create_many(3)
		.unwrap();

	let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
	assert_eq!(names, vec!["author_1", "author_2", "author_3"]);
}

#[rstest]
#[serial(sequences)]
fn test_sequence_struct_in_definition() {
	let code = Sequence::new("author_code", "A-{n}");
	code.reset();
	let factory = AuthorFactory::new().property("name", move || code.next());

	let first = factory.create().unwrap();
	let second = factory.create().unwrap();

	assert_eq!(first.name, "A-1");
	assert_eq!(second.name, "A-2");
}
