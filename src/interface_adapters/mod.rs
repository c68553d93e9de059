pub mod api;
pub mod casing;
pub mod clients;
pub mod clock;
pub mod i18n;
pub mod jwt;
pub mod state;
pub mod storage;
pub mod telemetry;
