//! Diesel schema for project persistence.

diesel::table! {
    /// Project documents with embedded assignment and score lists.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Assignment list payload.
        assigned_to -> Jsonb,
        /// Referenced task identifiers.
        task_ids -> Jsonb,
        /// Running total of task scores.
        total_score -> Int8,
        /// Per-user score entries.
        score_by_user -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
