//! Support for gettext `.po`/`.pot` catalogs.
//!
//! Reading happens in stages, each an [`Iterator`] pulling from the one before:
//! [`Lexer`] turns lines into tokens, [`Units`] groups tokens into entries, and
//! [`classify`]/[`parse_message`] turn each entry into catalog data.

pub mod header;
pub mod lexer;
pub mod message;
pub mod unit;

pub use header::classify;
pub use lexer::{CommentKind, Lexer, Token, escape};
pub use message::parse_message;
pub use unit::{Message, Unit, Units};
