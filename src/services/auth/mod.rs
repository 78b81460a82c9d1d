pub mod jwt_service;
pub mod token_service;

pub use jwt_service::{JwtService, TokenSigner};
pub use token_service::TokenService;
