pub mod alert;
pub mod appointment;
pub mod follow_up;
pub mod form;
pub mod intervention;
pub mod referral;
pub mod student;
