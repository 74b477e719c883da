pub mod filter_template;
pub mod superset_client;

pub use filter_template::render_filter;
pub use superset_client::SupersetClient;
