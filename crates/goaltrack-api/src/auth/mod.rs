// Authentication: config, token service, extractor, HTTP routes

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::{AuthConfig, JwtConfig};
pub use jwt::JwtService;
pub use middleware::{AuthState, AuthUser, FromRef};
pub use routes::routes;
