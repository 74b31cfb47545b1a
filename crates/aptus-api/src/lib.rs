// aptus-api: Async HTTP client for the CSB resident portal and the Aptus
// lock portal (login handshake + per-door unlock requests).

pub mod client;
pub mod endpoints;
pub mod error;
pub mod jsonp;
pub mod session;
pub mod transport;

mod auth;
mod locks;

pub use client::AptusClient;
pub use endpoints::Endpoints;
pub use error::Error;
pub use session::Session;
pub use transport::TransportConfig;
