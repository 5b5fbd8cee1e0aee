//! Built-in social network schema
//!
//! Declares the five entities of a small photo-sharing network: users write
//! posts, posts carry media items and receive comments, and a follower edge
//! links users to the users they follow.

use super::schema::{Column, Entity, Schema};

/// Build the social network schema
///
/// Declaration cannot fail; referential soundness is checked separately via
/// [`Schema::validate_relations`].
///
/// The follower entity intentionally does not forbid rows where
/// `user_from_id` equals `user_to_id` (a self-follow); the schema leaves
/// that policy to its consumers.
#[must_use]
pub fn social_schema() -> Schema {
    let mut schema = Schema::new("social");

    schema.add_entity(
        Entity::new("user")
            .with_column(Column::integer("id").primary_key())
            .with_column(Column::text("username").unique())
            .with_column(Column::text("email").unique())
            .with_column(Column::text("firstname"))
            .with_column(Column::text("lastname"))
            .with_column(Column::text("password"))
            .with_column(Column::timestamp("created_at").default_now()),
    );

    schema.add_entity(
        Entity::new("post")
            .with_column(Column::integer("id").primary_key())
            .with_column(Column::integer("user_id").references("user", "id"))
            .with_column(Column::text("caption").nullable())
            .with_column(Column::timestamp("created_at").default_now()),
    );

    schema.add_entity(
        Entity::new("media")
            .with_column(Column::integer("id").primary_key())
            .with_column(Column::integer("post_id").references("post", "id"))
            .with_column(Column::enumeration("type", "media_type", &["image", "video"]))
            .with_column(Column::text("url")),
    );

    schema.add_entity(
        Entity::new("comment")
            .with_column(Column::integer("id").primary_key())
            .with_column(Column::integer("post_id").references("post", "id"))
            .with_column(Column::integer("author_id").references("user", "id"))
            .with_column(Column::text("comment_text"))
            .with_column(Column::timestamp("created_at").default_now()),
    );

    schema.add_entity(
        Entity::new("follower")
            .with_column(Column::integer("user_from_id").primary_key().references("user", "id"))
            .with_column(Column::integer("user_to_id").primary_key().references("user", "id")),
    );

    schema
}
