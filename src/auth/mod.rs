pub mod basic;
pub mod dto;
pub(crate) mod extractors;
pub mod password;

pub use dto::PublicUser;
pub use extractors::CurrentUser;
