//! Packages that ship with the interpreter.

mod stats;

use crate::registry::PackageRegistry;

pub(crate) fn register_bundled(registry: &mut PackageRegistry) {
    registry.register("stats", stats::init);
}
