//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    ///
    /// `seq` preserves insertion order; `entry_ids` is the append-only list
    /// of entries the user has created.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Monotonic insertion counter.
        seq -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        /// Owned entry identifiers, oldest first.
        entry_ids -> Array<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog entries.
    entries (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Monotonic insertion counter.
        seq -> Int8,
        title -> Varchar,
        author -> Varchar,
        url -> Varchar,
        likes -> Int8,
        /// Owning user.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(entries -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(entries, users);
