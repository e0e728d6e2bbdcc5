pub mod analytics;
pub mod auth;
pub mod criteria;
pub mod error;
pub mod goals;
pub mod report;
pub mod reviews;
pub mod routes;
pub mod seed;
pub mod state;
pub mod users;
