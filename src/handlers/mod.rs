// Two-tier handler layout: public (no auth) and admin (bearer token).
pub mod admin;
pub mod public;
