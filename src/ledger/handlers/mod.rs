pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::{login, method_not_allowed};

pub mod logout;
pub use self::logout::logout;

pub mod user;
pub use self::user::user;

pub mod types;
