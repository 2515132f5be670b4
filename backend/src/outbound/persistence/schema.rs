//! Diesel table definitions for the ledger schema.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Accounts and their coin balances.
    users (id) {
        id -> Int8,
        #[max_length = 64]
        username -> Varchar,
        password_hash -> Text,
        coins -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Static merch catalog.
    merch_items (id) {
        id -> Int8,
        #[max_length = 64]
        name -> Varchar,
        price -> Int8,
    }
}

diesel::table! {
    /// Owned item counts keyed by (user, item).
    user_inventory (user_id, item_id) {
        user_id -> Int8,
        item_id -> Int8,
        quantity -> Int8,
    }
}

diesel::table! {
    /// Append-only transfer log.
    coin_transactions (id) {
        id -> Int8,
        sender_id -> Int8,
        receiver_id -> Int8,
        amount -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_inventory -> merch_items (item_id));
diesel::joinable!(user_inventory -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(coin_transactions, merch_items, user_inventory, users);
