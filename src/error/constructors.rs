//! Error-node construction and node-local accessors.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;

use super::types::{Cause, Error, ErrorInner, Payload, Tag};
use crate::stack::{capture, frame::resolve_frames, CaptureConfig, StackFrame};

impl Error {
    /// Create a leaf node from a message.
    ///
    /// Anything that implements [`Display`](fmt::Display) is accepted and
    /// coerced to its textual representation; construction never fails.
    /// The call stack is captured here.
    #[must_use]
    pub fn new(message: impl fmt::Display) -> Self {
        Self::new_with_config(message, &CaptureConfig::default())
    }

    /// [`new`](Self::new) with an explicit capture configuration.
    #[must_use]
    pub fn new_with_config(message: impl fmt::Display, config: &CaptureConfig) -> Self {
        Self::construct(Payload::Message(message.to_string()), None, config)
    }

    /// Create a node with an explicit causal parent.
    ///
    /// The parent may be another node of this crate or any foreign error
    /// value. Callers without a parent use [`new`](Self::new).
    #[must_use]
    pub fn with_cause<E>(message: impl fmt::Display, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_cause_config(message, cause, &CaptureConfig::default())
    }

    /// [`with_cause`](Self::with_cause) with an explicit capture
    /// configuration.
    #[must_use]
    pub fn with_cause_config<E>(
        message: impl fmt::Display,
        cause: E,
        config: &CaptureConfig,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let parent: Cause = Arc::new(cause);
        Self::construct(Payload::Message(message.to_string()), Some(parent), config)
    }

    /// Create a node whose causal parent is an already-shared link.
    #[must_use]
    pub fn with_cause_arc(message: impl fmt::Display, cause: Cause) -> Self {
        Self::construct(
            Payload::Message(message.to_string()),
            Some(cause),
            &CaptureConfig::default(),
        )
    }

    /// Normalize an arbitrary error value into a node.
    ///
    /// A value that is already an [`Error`] is handed back unchanged: same
    /// identity, no new stack capture, no nesting. Any other error becomes
    /// the payload of a new leaf node; its own causal chain (via
    /// [`source`](StdError::source)) stays reachable through it.
    ///
    /// Callers holding an `Option` keep the absent case absent with
    /// `opt.map(Error::wrap)`.
    #[must_use]
    pub fn wrap<E>(value: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::wrap_with_config(value, &CaptureConfig::default())
    }

    /// [`wrap`](Self::wrap) with an explicit capture configuration.
    #[must_use]
    pub fn wrap_with_config<E>(value: E, config: &CaptureConfig) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut slot = Some(value);
        if let Some(node) = (&mut slot as &mut dyn Any)
            .downcast_mut::<Option<Error>>()
            .and_then(Option::take)
        {
            return node;
        }
        if let Some(value) = slot {
            return Self::construct(
                Payload::Foreign {
                    error: Arc::new(value),
                    type_name: std::any::type_name::<E>(),
                },
                None,
                config,
            );
        }
        // the slot is only drained on the downcast path, which returned above
        Self::construct(Payload::Message(String::new()), None, config)
    }

    /// Normalize an already-shared error link into a node.
    ///
    /// Idempotent like [`wrap`](Self::wrap): a link that holds a node of
    /// this crate yields that node, identity preserved.
    #[must_use]
    pub fn wrap_arc(value: Cause) -> Self {
        Self::wrap_arc_with_config(value, &CaptureConfig::default())
    }

    /// [`wrap_arc`](Self::wrap_arc) with an explicit capture configuration.
    #[must_use]
    pub fn wrap_arc_with_config(value: Cause, config: &CaptureConfig) -> Self {
        if let Some(node) = value.downcast_ref::<Error>() {
            return node.clone();
        }
        Self::construct(
            Payload::Foreign {
                error: value,
                type_name: "dyn std::error::Error",
            },
            None,
            config,
        )
    }

    pub(crate) fn construct(
        payload: Payload,
        parent: Option<Cause>,
        config: &CaptureConfig,
    ) -> Self {
        Error {
            inner: Arc::new(ErrorInner {
                payload,
                parent,
                tags: RwLock::new(Vec::new()),
                stack: capture(config),
                frames: OnceCell::new(),
            }),
        }
    }

    /// Append classification tags to this node, returning it for chaining.
    ///
    /// Tags attach only to this node; aggregate views surface them for any
    /// chain containing it. Duplicates are permitted here and removed at
    /// aggregation.
    #[must_use]
    pub fn add_tags<I>(self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        {
            let mut own = match self.inner.tags.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            own.extend(tags.into_iter().map(Into::into));
        }
        self
    }

    /// Append a single classification tag, returning the node for chaining.
    #[must_use]
    pub fn tag(self, tag: impl Into<Tag>) -> Self {
        self.add_tags([tag.into()])
    }

    /// The tags attached to this node itself, in insertion order.
    ///
    /// Chain-wide aggregation is [`tags`](Self::tags).
    #[must_use]
    pub fn own_tags(&self) -> Vec<Tag> {
        match self.inner.tags.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The raw program counters captured at construction.
    #[must_use]
    pub fn callers(&self) -> &[usize] {
        &self.inner.stack
    }

    /// The resolved stack frames for this node.
    ///
    /// Resolution happens on first access and is cached; concurrent first
    /// access resolves once.
    #[must_use]
    pub fn stack_frames(&self) -> &[StackFrame] {
        self.inner.frames.get_or_init(|| resolve_frames(&self.inner.stack))
    }

    /// The concrete type name of this node's payload: the wrapped error's
    /// type for wrapped nodes, this crate's node type otherwise.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.inner.payload {
            Payload::Message(_) => std::any::type_name::<Self>(),
            Payload::Foreign { type_name, .. } => type_name,
        }
    }
}
