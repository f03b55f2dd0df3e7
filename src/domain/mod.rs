pub mod command;
pub mod package;
mod selection;
pub mod traits;

pub use command::{Check, CommandOutput, CommandSpec, Invocation};
pub use package::{Catalog, DOCKER_COMPONENTS, PackageKind};
pub use selection::{Selection, SelectionError};
pub use traits::{HostSystem, Prompter};
