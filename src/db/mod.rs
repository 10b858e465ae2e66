pub mod package;

pub use package::PackageStore;
