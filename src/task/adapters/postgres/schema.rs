//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records owned by a project.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Task description.
        description -> Text,
        /// Point value credited on completion.
        score -> Int8,
        /// Identifiers of progress records for this task.
        progress_ids -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
