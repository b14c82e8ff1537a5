//! The pub/sub channel between the dialect parsers and the plugins.
//!
//! Delivery is sequential, in subscription order, and subscription
//! order equals plugin instantiation order, which equals
//! `pluginOrder`. A subscriber's failure is wrapped with the
//! event name, the subscribing plugin's name, a descriptor of the
//! payload it was handling, and the original cause, and halts the
//! pipeline: `broadcast` returns the first error instead of invoking
//! remaining subscribers.

use crate::error::{BroadcastError, LoomError};
use crate::ir::{
    IrModel, OperationObject, ParameterObject, RequestBodyObject, SchemaObject, SecuritySchemeObject,
    ServerObject,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Event {
    Before,
    After,
    Operation,
    Parameter,
    RequestBody,
    Schema,
    SecurityScheme,
    Server,
}

impl Event {
    fn name(self) -> &'static str {
        match self {
            Event::Before => "before",
            Event::After => "after",
            Event::Operation => "operation",
            Event::Parameter => "parameter",
            Event::RequestBody => "requestBody",
            Event::Schema => "schema",
            Event::SecurityScheme => "securityScheme",
            Event::Server => "server",
        }
    }
}

/// The payload delivered alongside an [`Event`].
pub enum Payload<'a> {
    Before,
    After,
    Operation(&'a OperationObject),
    Parameter { ref_: &'a str, parameter: &'a ParameterObject },
    RequestBody { ref_: &'a str, request_body: &'a RequestBodyObject },
    Schema { ref_: &'a str, schema: &'a SchemaObject },
    SecurityScheme { ref_: &'a str, security_scheme: &'a SecuritySchemeObject },
    Server(&'a ServerObject),
}

impl Payload<'_> {
    /// A short, owned descriptor of this payload for error reporting,
    /// since the payload itself borrows from the IR and can't be
    /// carried inside an error that outlives the broadcast call.
    fn describe(&self) -> String {
        match self {
            Payload::Before => "before".to_string(),
            Payload::After => "after".to_string(),
            Payload::Operation(operation) => format!("operation {} {}", operation.method.as_str(), operation.path),
            Payload::Parameter { ref_, .. } => format!("parameter {ref_}"),
            Payload::RequestBody { ref_, .. } => format!("requestBody {ref_}"),
            Payload::Schema { ref_, .. } => format!("schema {ref_}"),
            Payload::SecurityScheme { ref_, .. } => format!("securityScheme {ref_}"),
            Payload::Server(server) => format!("server {}", server.url),
        }
    }
}

type Callback = Box<dyn FnMut(&IrModel, &Payload<'_>) -> Result<(), LoomError>>;

struct Subscriber {
    plugin_name: String,
    callback: Callback,
}

/// Owns subscriptions for every [`Event`] and drives sequential
/// broadcast.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(Event, Subscriber)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `event`, attributed to `plugin_name`
    /// for error reporting. Subscriptions are delivered in the order
    /// they're registered.
    pub fn subscribe(
        &mut self,
        event: Event,
        plugin_name: impl Into<String>,
        callback: impl FnMut(&IrModel, &Payload<'_>) -> Result<(), LoomError> + 'static,
    ) {
        self.subscribers.push((
            event,
            Subscriber {
                plugin_name: plugin_name.into(),
                callback: Box::new(callback),
            },
        ));
    }

    /// Invokes every subscriber of `event`, in subscription order,
    /// awaiting each synchronously (scheduling is single-threaded
    /// cooperative) before invoking the next. The first failure is
    /// wrapped as a [`BroadcastError`] and returned; no further
    /// subscribers run.
    pub fn broadcast(&mut self, ir: &IrModel, event: Event, payload: &Payload<'_>) -> Result<(), LoomError> {
        for (subscribed_event, subscriber) in &mut self.subscribers {
            if *subscribed_event != event {
                continue;
            }
            if let Err(cause) = (subscriber.callback)(ir, payload) {
                return Err(LoomError::Broadcast(BroadcastError {
                    event: event.name().to_string(),
                    plugin_name: subscriber.plugin_name.clone(),
                    args: payload.describe(),
                    cause: Box::new(cause),
                }));
            }
        }
        Ok(())
    }
}
