// Registry credential selection
//
// Picks the one entry of a container auth file that applies to an image
// reference, so that a build step can be handed a minimal auth file instead
// of every credential the user holds.

mod auth_file;
mod reference;
mod resolver;

pub use auth_file::AuthFile;
pub use reference::ImageReference;
pub use resolver::{resolve, scope_to_registry};
