pub mod alert_repo;
pub mod reading_repo;

pub use alert_repo::AlertRepo;
pub use reading_repo::ReadingRepo;
