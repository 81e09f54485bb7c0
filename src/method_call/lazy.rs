use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::CallArgs;
use crate::CallbackContainer;
use crate::Callbacks;
use crate::DescriptorKind;
use crate::Error;
use crate::HasCallbacks;
use crate::NoCallbacks;
use crate::Result;

pub(crate) type CallbacksProducer<A, R> =
    Arc<dyn Fn(Callbacks<A, R, NoCallbacks>, A) -> Callbacks<A, R, HasCallbacks> + Send + Sync>;

/// Continuation finishing a descriptor's configuration from the arguments
/// of an actual call.
///
/// Every invocation builds a fresh container from its own arguments. The
/// explicit [`Self::generate`] step is one-shot.
pub struct LazyCallbacks<A, R> {
    description: String,
    kind: DescriptorKind,
    producer: CallbacksProducer<A, R>,
    generated: Mutex<Option<CallbackContainer<A, R>>>,
}

impl<A: CallArgs, R: Send + 'static> LazyCallbacks<A, R> {
    pub(crate) fn new(
        description: String,
        kind: DescriptorKind,
        producer: CallbacksProducer<A, R>,
    ) -> Self {
        Self {
            description,
            kind,
            producer,
            generated: Mutex::new(None),
        }
    }

    /// True until callbacks were generated, explicitly or by a call.
    pub fn can_generate(&self) -> bool {
        self.generated.lock().is_none()
    }

    /// Container built for the most recent call or [`Self::generate`].
    pub fn generated(&self) -> Option<CallbackContainer<A, R>> {
        self.generated.lock().clone()
    }

    /// Runs the producer with the live arguments. Fails if callbacks were
    /// already generated.
    pub fn generate(
        &self,
        args: A,
    ) -> Result<CallbackContainer<A, R>> {
        let mut generated = self.generated.lock();
        if generated.is_some() {
            return Err(Error::AlreadyConfigured {
                method: self.description.clone(),
                detail: "callbacks were already generated from a call",
            });
        }
        let container = self.run(args)?;
        *generated = Some(container.clone());
        Ok(container)
    }

    /// Container for the current call, always built from `args`.
    pub(crate) fn generate_for_call(
        &self,
        args: A,
    ) -> Result<CallbackContainer<A, R>> {
        let container = self.run(args)?;
        *self.generated.lock() = Some(container.clone());
        Ok(container)
    }

    fn run(
        &self,
        args: A,
    ) -> Result<CallbackContainer<A, R>> {
        debug!("{}: generating callbacks from call arguments", self.description);
        let empty = CallbackContainer::new(self.description.clone(), self.kind);
        (self.producer)(Callbacks::new(empty), args)
            .into_container()
            .seal()
    }
}

impl<A, R> std::fmt::Debug for LazyCallbacks<A, R> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("LazyCallbacks")
            .field("description", &self.description)
            .field("kind", &self.kind)
            .finish()
    }
}
