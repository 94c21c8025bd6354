mod regenerate;

pub use regenerate::*;
