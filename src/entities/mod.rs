// ABOUTME: SeaORM entities module for database models and relationships
// ABOUTME: Exports the profile and diary entry definitions

pub mod entry;
pub mod profile;

pub use entry::Entity as Entry;
pub use profile::Entity as Profile;
