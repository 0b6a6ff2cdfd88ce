pub mod activity;
pub mod alerts;
pub mod appointments;
pub mod follow_ups;
pub mod forms;
pub mod health;
pub mod interventions;
pub mod me;
pub mod referrals;
pub mod students;
