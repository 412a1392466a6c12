pub mod book;
pub mod provider;

pub use book::AccountBook;
pub use provider::AccountProvider;
