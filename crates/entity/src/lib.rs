pub mod goal;
pub mod review;
pub mod review_criteria;
pub mod user;
