//! Fake data generators for factory definitions.
//!
//! Values come from the `fake` crate, driven by a per-thread random source
//! that can be reseeded for reproducible runs (see [`reseed`] and
//! `FactoryConfig`).
//!
//! ```ignore
//! fn definition(self) -> Self {
//!     self.property("name", || FakerType::Name.generate())
//!         .property("email", || FakerType::Email.generate())
//!         .property("age", || random_int(18, 90))
//! }
//! ```

use std::cell::RefCell;

use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::{Dummy, Fake, Faker};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

thread_local! {
	static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// Kinds of fake text a factory can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakerType {
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Full name.
	Name,
	/// E-mail address on a reserved domain.
	Email,
	/// Login name.
	Username,
	/// Single lorem word.
	Word,
	/// Lorem sentence of 4 to 10 words.
	Sentence,
	/// Lorem paragraph of 3 to 6 sentences.
	Paragraph,
	/// Company name.
	CompanyName,
	/// City name.
	City,
	/// Phone number.
	PhoneNumber,
	/// Random (version 4) UUID in hyphenated form.
	Uuid,
}

impl FakerType {
	/// Looks a generator up by its snake_case name, e.g. `"first_name"`.
	pub fn from_name(name: &str) -> Option<Self> {
		let kind = match name {
			"first_name" => Self::FirstName,
			"last_name" => Self::LastName,
			"name" => Self::Name,
			"email" => Self::Email,
			"username" => Self::Username,
			"word" => Self::Word,
			"sentence" => Self::Sentence,
			"paragraph" => Self::Paragraph,
			"company_name" | "company" => Self::CompanyName,
			"city" => Self::City,
			"phone_number" | "phone" => Self::PhoneNumber,
			"uuid" => Self::Uuid,
			_ => return None,
		};
		Some(kind)
	}

	/// Generates one value.
	pub fn generate(self) -> String {
		with_rng(|rng| match self {
			Self::FirstName => FirstName().fake_with_rng(rng),
			Self::LastName => LastName().fake_with_rng(rng),
			Self::Name => Name().fake_with_rng(rng),
			Self::Email => SafeEmail().fake_with_rng(rng),
			Self::Username => Username().fake_with_rng(rng),
			Self::Word => Word().fake_with_rng(rng),
			Self::Sentence => Sentence(4..11).fake_with_rng(rng),
			Self::Paragraph => Paragraph(3..7).fake_with_rng(rng),
			Self::CompanyName => CompanyName().fake_with_rng(rng),
			Self::City => CityName().fake_with_rng(rng),
			Self::PhoneNumber => PhoneNumber().fake_with_rng(rng),
			Self::Uuid => random_uuid(rng).to_string(),
		})
	}
}

/// Generates an arbitrary value of any type `fake` knows how to fill.
pub fn generate_fake<T: Dummy<Faker>>() -> T {
	with_rng(|rng| Faker.fake_with_rng(rng))
}

/// Random integer in `min..=max`. The bounds are swapped if reversed.
pub fn random_int(min: i64, max: i64) -> i64 {
	let (low, high) = if min <= max { (min, max) } else { (max, min) };
	with_rng(|rng| rng.gen_range(low..=high))
}

/// Random version 4 UUID drawn from the seeded source.
pub fn fake_uuid() -> uuid::Uuid {
	with_rng(random_uuid)
}

/// Reseeds the current thread's random source.
pub fn reseed(seed: u64) {
	tracing::debug!(seed, "reseeding fake data generator");
	RNG.with_borrow_mut(|rng| *rng = StdRng::seed_from_u64(seed));
}

fn with_rng<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
	RNG.with_borrow_mut(f)
}

fn random_uuid(rng: &mut StdRng) -> uuid::Uuid {
	let mut bytes = [0_u8; 16];
	rng.fill_bytes(&mut bytes);
	uuid::Builder::from_random_bytes(bytes).into_uuid()
}
