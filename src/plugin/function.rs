use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;

use crate::plugin::context::ServerContext;
use crate::plugin::descriptor::FunctionDescriptor;
use crate::plugin::error::{InitError, InvocationError};
use crate::plugin::invocation::{Headers, Parameters};

/// A FlexFunction: a named, typed table producer the host exposes over Flight RPC.
///
/// The host may call [`FlexFun::call`] from several callers at once, so all
/// per-call work goes through `&self`. Anything that needs one-time setup
/// belongs in [`FlexFun::on_load`].
pub trait FlexFun: Send + Sync + 'static {
    /// Unique within the host's registry; shown to users as the function name.
    const NAME: &'static str;

    /// Columns of the result, in order.
    fn schema() -> SchemaRef;

    fn create() -> Self;

    /// Runs exactly once, after `create` and before the first call.
    fn on_load(&mut self, _ctx: &ServerContext) -> Result<(), InitError> {
        Ok(())
    }

    /// Produce the result table.
    ///
    /// `columns` is a hint listing the columns the caller cares about. It is
    /// always a subset of the schema and never changes what the rows mean;
    /// returning more columns than requested is allowed.
    fn call(
        &self,
        parameters: &Parameters,
        columns: Option<&[String]>,
        headers: &Headers,
    ) -> Result<RecordBatch, InvocationError>;

    fn descriptor() -> FunctionDescriptor {
        FunctionDescriptor::new(Self::NAME, Self::schema())
    }
}
