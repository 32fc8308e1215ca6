use diesel::Column;

use super::{Catalog, ColumnDef, ColumnType, Relationship, TableDef};
use crate::schema::{comments, followers, media, posts, users};

const USERS: &str = "users";
const POSTS: &str = "posts";
const MEDIA: &str = "media";
const COMMENTS: &str = "comments";
const FOLLOWERS: &str = "followers";

impl Catalog {
    /// The users / posts / media / comments / followers schema.
    pub fn social() -> Self {
        Catalog::new()
            .table(followers_table())
            .table(users_table())
            .table(posts_table())
            .table(media_table())
            .table(comments_table())
    }
}

// Each (user_from_id, user_to_id) pair is one directed "follows" edge.
fn followers_table() -> TableDef {
    TableDef::new(FOLLOWERS)
        .column(
            ColumnDef::new(followers::user_from_id::NAME, ColumnType::Integer)
                .primary_key()
                .references(USERS, users::id::NAME),
        )
        .column(
            ColumnDef::new(followers::user_to_id::NAME, ColumnType::Integer)
                .primary_key()
                .references(USERS, users::id::NAME),
        )
        .relationship(Relationship::many_to_one(
            "user_from",
            USERS,
            followers::user_from_id::NAME,
            "following",
        ))
        .relationship(Relationship::many_to_one(
            "user_to",
            USERS,
            followers::user_to_id::NAME,
            "followers",
        ))
}

fn users_table() -> TableDef {
    TableDef::new(USERS)
        .column(ColumnDef::new(users::id::NAME, ColumnType::Integer).primary_key())
        .column(
            ColumnDef::new(users::username::NAME, ColumnType::Varchar(50))
                .unique()
                .not_null(),
        )
        .column(ColumnDef::new(users::firstname::NAME, ColumnType::Varchar(50)))
        .column(ColumnDef::new(users::lastname::NAME, ColumnType::Varchar(50)))
        .column(ColumnDef::new(users::email::NAME, ColumnType::Varchar(100)).unique())
        .relationship(Relationship::one_to_many(
            "posts",
            POSTS,
            posts::user_id::NAME,
            "user",
        ))
        .relationship(Relationship::one_to_many(
            "comments",
            COMMENTS,
            comments::author_id::NAME,
            "author",
        ))
        .relationship(Relationship::one_to_many(
            "following",
            FOLLOWERS,
            followers::user_from_id::NAME,
            "user_from",
        ))
        .relationship(Relationship::one_to_many(
            "followers",
            FOLLOWERS,
            followers::user_to_id::NAME,
            "user_to",
        ))
}

fn posts_table() -> TableDef {
    TableDef::new(POSTS)
        .column(ColumnDef::new(posts::id::NAME, ColumnType::Integer).primary_key())
        .column(
            ColumnDef::new(posts::user_id::NAME, ColumnType::Integer)
                .references(USERS, users::id::NAME),
        )
        .relationship(Relationship::many_to_one(
            "user",
            USERS,
            posts::user_id::NAME,
            "posts",
        ))
        .relationship(Relationship::one_to_many(
            "media",
            MEDIA,
            media::post_id::NAME,
            "post",
        ))
        .relationship(Relationship::one_to_many(
            "comments",
            COMMENTS,
            comments::post_id::NAME,
            "post",
        ))
}

fn media_table() -> TableDef {
    TableDef::new(MEDIA)
        .column(ColumnDef::new(media::id::NAME, ColumnType::Integer).primary_key())
        .column(ColumnDef::new(media::type_::NAME, ColumnType::Varchar(50)))
        .column(ColumnDef::new(media::url::NAME, ColumnType::Varchar(250)))
        .column(
            ColumnDef::new(media::post_id::NAME, ColumnType::Integer)
                .references(POSTS, posts::id::NAME),
        )
        .relationship(Relationship::many_to_one(
            "post",
            POSTS,
            media::post_id::NAME,
            "media",
        ))
}

fn comments_table() -> TableDef {
    TableDef::new(COMMENTS)
        .column(ColumnDef::new(comments::id::NAME, ColumnType::Integer).primary_key())
        .column(ColumnDef::new(comments::comment_text::NAME, ColumnType::Text))
        .column(
            ColumnDef::new(comments::author_id::NAME, ColumnType::Integer)
                .references(USERS, users::id::NAME),
        )
        .column(
            ColumnDef::new(comments::post_id::NAME, ColumnType::Integer)
                .references(POSTS, posts::id::NAME),
        )
        .relationship(Relationship::many_to_one(
            "author",
            USERS,
            comments::author_id::NAME,
            "comments",
        ))
        .relationship(Relationship::many_to_one(
            "post",
            POSTS,
            comments::post_id::NAME,
            "comments",
        ))
}
