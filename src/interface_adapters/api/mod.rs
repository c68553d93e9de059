// Port implementations for each backend resource, all on the shared `ApiClient`.
mod activities;
mod auth;
mod categories;
mod constraints;
mod groups;
mod import;
mod insights;
mod tasks;
mod timer;
