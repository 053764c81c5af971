//! Example models.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use model_factories::Model;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Author {
	pub id: Uuid,
	pub name: String,
	#[factory(readonly)]
	pub not_writable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Post {
	pub id: Uuid,
	pub title: String,
	pub body: String,
	pub created_at: DateTime<Utc>,
	pub published_from: Option<DateTime<Utc>>,
	pub author: Option<Author>,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Comment {
	pub id: Uuid,
	pub text: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: Option<DateTime<Utc>>,
	pub author: Option<Author>,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Blog {
	pub id: Uuid,
	pub name: String,
	pub featured: Option<Post>,
	pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct PostWithManyComments {
	pub id: u32,
	pub title: String,
	pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct ModelWithRandomValue {
	pub value: i32,
}

/// Post holding a shared author, for identity checks.
#[derive(Debug, Clone, Default, Model)]
#[factory(name = "SharedPost")]
pub struct SharedAuthorPost {
	pub title: String,
	pub author: Option<Arc<Author>>,
	#[factory(skip)]
	pub cache: Vec<u8>,
}
