pub mod backup_exchange;
pub mod complaints;
pub mod core;
pub mod feedback;
pub mod menus;
pub mod session;
pub mod staff;
pub mod stats;
pub mod users;
