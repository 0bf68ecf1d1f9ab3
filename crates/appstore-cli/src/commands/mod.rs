//! Command implementations

pub mod adapt;
pub mod categories;
pub mod list;
pub mod tag;
pub mod upgradable;

pub use adapt::run_adapt;
pub use categories::run_categories;
pub use list::run_list;
pub use tag::run_tag;
pub use upgradable::run_upgradable;
