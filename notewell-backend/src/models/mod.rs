pub mod note;
pub mod share;
pub mod user;
pub mod version;

pub use note::*;
pub use share::*;
pub use user::*;
pub use version::*;
