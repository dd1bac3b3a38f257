//! Design tokens and the token table.

mod table;
mod token;

pub use table::{ResolvedValue, TokenTable};
pub use token::{FontBundle, Scalar, Token, TokenId, TokenKind, TokenValue};
