use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::models::post::Post;
use crate::schema::media;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(Post))]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Media {
    pub id: i32,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub url: Option<String>,
    pub post_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = media)]
pub struct NewMedia {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub url: Option<String>,
    pub post_id: Option<i32>,
}
