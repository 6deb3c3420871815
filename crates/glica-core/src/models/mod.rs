pub mod adjustment;
pub mod follow_up;
pub mod handout;
pub mod history;
pub mod patient;
pub mod report;
