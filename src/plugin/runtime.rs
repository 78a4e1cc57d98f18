use arrow::array::RecordBatch;

use crate::plugin::context::ServerContext;
use crate::plugin::descriptor::FunctionDescriptor;
use crate::plugin::error::{InitError, InvocationError};
use crate::plugin::function::FlexFun;
use crate::plugin::invocation::Invocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionStatus {
    Discovered,
    Loaded,
    Error(String),
}

/// Drives one function from discovery through `on_load` to invocation.
#[derive(Debug)]
pub struct FunctionRuntime<F> {
    descriptor: FunctionDescriptor,
    function: Option<F>,
    status: FunctionStatus,
}

impl<F: FlexFun> FunctionRuntime<F> {
    pub fn new() -> Self {
        Self {
            descriptor: F::descriptor(),
            function: None,
            status: FunctionStatus::Discovered,
        }
    }

    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    pub fn status(&self) -> &FunctionStatus {
        &self.status
    }

    /// The loaded instance, if `load` has succeeded.
    pub fn function(&self) -> Option<&F> {
        self.function.as_ref()
    }

    /// Create the function and run its `on_load`. Only the first call does any work.
    pub fn load(&mut self, ctx: &ServerContext) -> Result<(), InitError> {
        match &self.status {
            FunctionStatus::Loaded => return Ok(()),
            FunctionStatus::Error(err) => return Err(InitError::Failed(err.clone())),
            FunctionStatus::Discovered => {}
        }

        let mut function = F::create();
        if let Err(err) = function.on_load(ctx) {
            tracing::warn!(function = F::NAME, "failed to load function: {err}");
            self.status = FunctionStatus::Error(err.to_string());
            return Err(err);
        }

        tracing::info!(function = F::NAME, "function loaded");
        self.function = Some(function);
        self.status = FunctionStatus::Loaded;
        Ok(())
    }

    /// Call the function and check the result against its declared schema.
    pub fn invoke(&self, invocation: &Invocation) -> Result<RecordBatch, InvocationError> {
        let function = self
            .function
            .as_ref()
            .ok_or(InvocationError::NotLoaded(F::NAME))?;

        let batch = function.call(
            &invocation.parameters,
            invocation.columns(),
            &invocation.headers,
        )?;
        self.descriptor.validate_result(&batch)?;

        Ok(batch)
    }
}

impl<F: FlexFun> Default for FunctionRuntime<F> {
    fn default() -> Self {
        Self::new()
    }
}
