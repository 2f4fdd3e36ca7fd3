//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Notes scoped by anonymous owner identifier.
    notes (id) {
        /// Store-assigned identifier from a `BIGSERIAL` sequence.
        id -> Int8,
        /// Non-blank title.
        title -> Text,
        /// Body text, empty by default.
        content -> Text,
        /// Client-minted anonymous identifier; never updated.
        owner_id -> Text,
        /// Insert timestamp.
        created_at -> Timestamptz,
        /// Refreshed by every update.
        updated_at -> Timestamptz,
    }
}
