pub mod certificate;
pub mod certificate_renderer;

pub use certificate::CertificateError;
