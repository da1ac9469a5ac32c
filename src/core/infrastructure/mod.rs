pub mod fixture_transport;
pub mod http_transport;
pub mod transport;
