pub mod core;
pub mod option_store;

pub use core::PgOptionStore;
