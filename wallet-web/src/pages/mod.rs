//! Page modules

pub mod about;
pub mod home;
pub mod status;

pub use about::AboutPage;
pub use home::HomePage;
pub use status::StatusPage;
