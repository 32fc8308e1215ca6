use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::schema::posts;

/// A post; `user_id` carries no NOT NULL constraint, so an orphaned post is
/// representable.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: i32,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub user_id: Option<i32>,
}
