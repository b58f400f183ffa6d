//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Customer repair requests.
    ///
    /// `tracking_token` carries a unique constraint; `status` and
    /// `contact_method` hold the kebab/lowercase wire values.
    repair_requests (id) {
        id -> Uuid,
        name -> Varchar,
        device_type -> Varchar,
        problem -> Varchar,
        contact_method -> Varchar,
        contact -> Varchar,
        status -> Varchar,
        notes -> Nullable<Varchar>,
        tracking_token -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accounts allowed to sign in to the dashboard.
    admin_accounts (id) {
        id -> Uuid,
        email -> Varchar,
        password_hash -> Text,
        is_admin -> Bool,
        created_at -> Timestamptz,
    }
}
