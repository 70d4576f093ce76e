//! Diesel schema for progress persistence.

diesel::table! {
    /// One row per (user, task) completion state.
    progress_records (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Project of the tracked task.
        project_id -> Uuid,
        /// Tracked task.
        task_id -> Uuid,
        /// Completion status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
