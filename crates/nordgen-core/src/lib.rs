//! Server selection and WireGuard config generation for NordVPN.
//!
//! The pipeline is strictly sequential: resolve the private key, fetch and
//! sort candidate servers, apply the user's selection, render one config per
//! server and write them to disk.

pub mod catalog;
pub mod error;
pub mod output;
pub mod render;
pub mod selection;
pub mod types;

pub use catalog::{Catalog, find_country, list_countries, list_servers, resolve_private_key};
pub use error::{AuthError, FetchError, OutputError, SelectionError, ValidationError};
pub use output::{DEFAULT_OUTPUT_DIR, write_configs};
pub use render::{RenderOptions, RenderedConfig, render, safe_name};
pub use selection::{Selection, select};
pub use types::{AccessToken, CountryCode};
