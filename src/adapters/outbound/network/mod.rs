/// Network adapters for the IQ Server and Confluence REST APIs
mod confluence_client;
mod iq_client;

pub use confluence_client::ConfluenceClient;
pub use iq_client::{find_cookie, IqServerClient};
