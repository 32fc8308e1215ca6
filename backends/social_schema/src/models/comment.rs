use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::models::post::Post;
use crate::models::user::User;
use crate::schema::comments;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(User, foreign_key = author_id))]
#[diesel(belongs_to(Post))]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub comment_text: Option<String>,
    pub author_id: Option<i32>,
    pub post_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub comment_text: Option<String>,
    pub author_id: Option<i32>,
    pub post_id: Option<i32>,
}
