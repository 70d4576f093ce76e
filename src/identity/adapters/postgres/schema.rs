//! Diesel schema for the externally-owned users table.

diesel::table! {
    /// Accounts managed by the authentication service.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Login name.
        #[max_length = 255]
        username -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
        /// Given name.
        #[max_length = 255]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 255]
        last_name -> Varchar,
        /// Account role.
        #[max_length = 50]
        role -> Varchar,
    }
}
