pub mod alert;
pub mod reading;
