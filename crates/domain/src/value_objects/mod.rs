//! Value objects - Immutable objects defined by their attributes

mod email_style;
mod sender;
mod website;

pub use email_style::EmailStyle;
pub use sender::Sender;
pub use website::Website;
