mod domain;
mod error;
mod options;
mod types;
mod zone;

pub use domain::DomainStatus;
pub use error::FetchError;
pub use options::{Options, OutputKind};
pub use types::{DomainData, DomainList, LeafCertificate};
pub use zone::Zone;
