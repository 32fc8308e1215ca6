use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::followers;

/// A directed "follows" edge: `user_from_id` follows `user_to_id`.
///
/// Both ends reference `users.id`, so no `Associations` derive: diesel allows a
/// single `BelongsTo<User>` per child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(primary_key(user_from_id, user_to_id))]
#[diesel(table_name = followers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Follower {
    pub user_from_id: i32,
    pub user_to_id: i32,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = followers)]
pub struct NewFollower {
    pub user_from_id: i32,
    pub user_to_id: i32,
}

impl Follower {
    pub fn is_self_follow(&self) -> bool {
        self.user_from_id == self.user_to_id
    }
}
