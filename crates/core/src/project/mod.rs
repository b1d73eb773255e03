pub mod locator;
pub mod root;

pub use locator::{ProjectDescriptor, ProjectLocation, ProjectLocator};
pub use root::{RootIdentifier, RootNamespaceReader, RootSource};
