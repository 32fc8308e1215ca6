diesel::table! {
    comments (id) {
        id -> Integer,
        comment_text -> Nullable<Text>,
        author_id -> Nullable<Integer>,
        post_id -> Nullable<Integer>,
    }
}

diesel::table! {
    followers (user_from_id, user_to_id) {
        user_from_id -> Integer,
        user_to_id -> Integer,
    }
}

diesel::table! {
    media (id) {
        id -> Integer,
        #[sql_name = "type"]
        #[max_length = 50]
        type_ -> Nullable<Varchar>,
        #[max_length = 250]
        url -> Nullable<Varchar>,
        post_id -> Nullable<Integer>,
    }
}

diesel::table! {
    posts (id) {
        id -> Integer,
        user_id -> Nullable<Integer>,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 50]
        firstname -> Nullable<Varchar>,
        #[max_length = 50]
        lastname -> Nullable<Varchar>,
        #[max_length = 100]
        email -> Nullable<Varchar>,
    }
}

// followers points at users twice, so it has no joinable! entry.
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(media -> posts (post_id));
diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    comments,
    followers,
    media,
    posts,
    users,
);
