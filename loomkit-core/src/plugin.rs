//! The plugin abstraction driven by the orchestrator: a named,
//! dependency-declaring unit that subscribes to the event bus once,
//! during instantiation, and does all its work from inside those
//! subscriptions.

use crate::context::Context;
use crate::events::EventBus;

/// One plugin, instantiated once per run and bound to a [`Context`].
///
/// `handler` is expected to call [`EventBus::subscribe`] for whichever
/// events it cares about and return; the orchestrator never invokes
/// it a second time. Plugins that emit files do so lazily, from
/// inside their subscriptions, via `Context::files_mut`.
pub trait Plugin {
    fn name(&self) -> &str;

    fn dependencies(&self) -> &[String] {
        &[]
    }

    fn handler(&self, ctx: &Context, bus: &mut EventBus);
}
