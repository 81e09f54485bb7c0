//! Arity machinery shared by every callback and descriptor.
//!
//! A described method's parameters travel through the engine as one tuple
//! `A` (`()`, `(T1,)` ... `(T1, T2, T3, T4, T5)`). The macro below generates,
//! for each arity, the [`CallArgs`] shape plus the adapters that let callers
//! hand in closures over the unpacked parameters.

use crate::Error;
use crate::Result;
use crate::MAX_ARITY;

/// Parameter tuple of a described method.
pub trait CallArgs: Clone + Send + 'static {
    /// Number of parameters
    const ARITY: usize;

    /// Type names of the parameters, in declaration order
    fn parameter_types() -> Vec<&'static str>;
}

/// Return type of a described method (`()` for void shapes).
pub trait CallResult: Send + 'static {}

impl<R: Send + 'static> CallResult for R {}

/// Side-effecting callback over a method's parameters.
pub trait IntoAction<A>: Send + Sync + 'static {
    fn call_with(
        &self,
        args: A,
    );
}

/// Result-producing callback over a method's parameters.
pub trait IntoResultFn<A, R>: Send + Sync + 'static {
    fn call_with(
        &self,
        args: A,
    ) -> R;
}

macro_rules! impl_arity {
    ($arity:expr; $($t:ident => $v:ident),*) => {
        impl<$($t: Clone + Send + 'static),*> CallArgs for ($($t,)*) {
            const ARITY: usize = $arity;

            fn parameter_types() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$t>()),*]
            }
        }

        impl<F $(, $t)*> IntoAction<($($t,)*)> for F
        where
            F: Fn($($t),*) + Send + Sync + 'static,
        {
            fn call_with(
                &self,
                ($($v,)*): ($($t,)*),
            ) {
                (self)($($v),*)
            }
        }

        impl<F, R $(, $t)*> IntoResultFn<($($t,)*), R> for F
        where
            F: Fn($($t),*) -> R + Send + Sync + 'static,
        {
            fn call_with(
                &self,
                ($($v,)*): ($($t,)*),
            ) -> R {
                (self)($($v),*)
            }
        }
    };
}

impl_arity!(0;);
impl_arity!(1; T1 => a1);
impl_arity!(2; T1 => a1, T2 => a2);
impl_arity!(3; T1 => a1, T2 => a2, T3 => a3);
impl_arity!(4; T1 => a1, T2 => a2, T3 => a3, T4 => a4);
impl_arity!(5; T1 => a1, T2 => a2, T3 => a3, T4 => a4, T5 => a5);

/// Canonical shape of a callback: parameter count and types, no closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTemplate {
    pub arity: usize,
    pub parameter_types: Vec<&'static str>,
    /// `None` for side-effecting callbacks
    pub result_type: Option<&'static str>,
}

impl CallbackTemplate {
    /// Template of a statically typed parameter tuple.
    pub fn of<A: CallArgs>() -> Self {
        Self {
            arity: A::ARITY,
            parameter_types: A::parameter_types(),
            result_type: None,
        }
    }

    /// Template built from a runtime list of parameter types, e.g. one read
    /// back from an adapter's reflection data.
    pub fn from_parameter_types(parameter_types: Vec<&'static str>) -> Result<Self> {
        check_arity(parameter_types.len())?;
        Ok(Self {
            arity: parameter_types.len(),
            parameter_types,
            result_type: None,
        })
    }

    pub fn with_result_type(
        mut self,
        result_type: &'static str,
    ) -> Self {
        self.result_type = Some(result_type);
        self
    }
}

pub(crate) fn check_arity(arity: usize) -> Result<()> {
    if arity > MAX_ARITY {
        return Err(Error::UnsupportedArity { arity, max: MAX_ARITY });
    }
    Ok(())
}
