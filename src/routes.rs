mod contact;
mod health_check;
mod seo;

pub use contact::*;
pub use health_check::*;
pub use seo::*;
